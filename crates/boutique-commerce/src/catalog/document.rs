//! Catalog document: carousel images plus named product sections.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::catalog::{Carousel, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Name of the section holding carousel images.
pub const CAROUSEL_SECTION: &str = "carousel";

/// Parsed catalog document.
///
/// The document is a JSON object. `carousel` holds image references; every
/// other key whose value is an array is a product section, e.g.
///
/// ```json
/// {
///   "carousel": ["img/slide1.jpg", "img/slide2.jpg"],
///   "corsets": [{"id": 1, "name": "Satin Corset", "price": 250, "image": "img/c1.jpg"}]
/// }
/// ```
///
/// Sections keep the order they appear in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    carousel: Vec<String>,
    sections: Vec<(String, Vec<Product>)>,
}

/// Top-level document entries in the order they were read.
struct DocumentEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for DocumentEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DocumentEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a catalog object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<DocumentEntries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(DocumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// Fails only when the input is not a JSON object. Products that do not
    /// match the expected shape are skipped.
    pub fn from_json(input: &str) -> Result<Self, CommerceError> {
        let DocumentEntries(entries) = serde_json::from_str(input)?;

        let mut catalog = Catalog::default();
        for (name, value) in entries {
            let Some(entries) = value.as_array() else {
                tracing::debug!(section = %name, "ignoring non-array catalog entry");
                continue;
            };

            if name == CAROUSEL_SECTION {
                catalog.carousel = entries
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                continue;
            }

            let products = entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    match serde_json::from_value::<Product>(entry.clone()) {
                        Ok(product) => Some(product),
                        Err(e) => {
                            tracing::warn!(section = %name, index, error = %e, "skipping malformed product");
                            None
                        }
                    }
                })
                .collect();
            catalog.insert_section(name, products);
        }

        Ok(catalog)
    }

    /// Add a section at the end, or replace an existing one in place.
    pub fn insert_section(&mut self, name: impl Into<String>, products: Vec<Product>) {
        let name = name.into();
        match self.sections.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = products,
            None => self.sections.push((name, products)),
        }
    }

    /// Replace the carousel images.
    pub fn set_carousel(&mut self, images: Vec<String>) {
        self.carousel = images;
    }

    /// Carousel image references in document order.
    pub fn carousel_images(&self) -> &[String] {
        &self.carousel
    }

    /// A carousel positioned on the first image.
    pub fn carousel(&self) -> Carousel {
        Carousel::new(self.carousel.clone())
    }

    /// Products in a section.
    pub fn section(&self, name: &str) -> Option<&[Product]> {
        self.sections
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, products)| products.as_slice())
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// All products with their section, in document order.
    pub fn products(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.sections
            .iter()
            .flat_map(|(name, products)| products.iter().map(move |p| (name.as_str(), p)))
    }

    /// Find a product by id; the first match in document order wins.
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products().map(|(_, p)| p).find(|p| &p.id == id)
    }

    /// Total number of products across sections.
    pub fn product_count(&self) -> usize {
        self.sections.iter().map(|(_, products)| products.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const DOCUMENT: &str = r#"{
        "carousel": ["img/s1.jpg", "img/s2.jpg", 3],
        "corsets": [
            {"id": 1, "name": "Satin Corset", "price": 250, "image": "img/c1.jpg"},
            {"id": 2, "name": "Broken", "price": "n/a"}
        ],
        "mens-briefs": [
            {"id": "mb-1", "name": "Cotton Brief", "price": 45.5, "image": "img/mb1.jpg"}
        ],
        "title": "Boutique"
    }"#;

    #[test]
    fn test_parse_sections() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();

        assert_eq!(catalog.carousel_images(), ["img/s1.jpg", "img/s2.jpg"]);
        assert_eq!(
            catalog.section_names().collect::<Vec<_>>(),
            vec!["corsets", "mens-briefs"]
        );
        assert_eq!(catalog.section("corsets").unwrap().len(), 1);
        assert_eq!(catalog.product_count(), 2);
        assert!(catalog.section("title").is_none());
    }

    #[test]
    fn test_find_product() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        let brief = catalog.find_product(&ProductId::new("mb-1")).unwrap();
        assert_eq!(brief.price, Decimal::new(455, 1));

        let corset = catalog.find_product(&ProductId::new("1")).unwrap();
        assert_eq!(corset.name, "Satin Corset");
        assert!(catalog.find_product(&ProductId::new("2")).is_none());
    }

    #[test]
    fn test_sections_keep_document_order() {
        let catalog = Catalog::from_json(
            r#"{
                "underwears": [{"id": 7, "name": "Lace Set", "price": 80}],
                "carousel": ["s1.jpg"],
                "corsets": [{"id": 7, "name": "Satin Corset", "price": 250}],
                "lingeries": []
            }"#,
        )
        .unwrap();

        assert_eq!(
            catalog.section_names().collect::<Vec<_>>(),
            vec!["underwears", "corsets", "lingeries"]
        );
        assert_eq!(
            catalog.find_product(&ProductId::new("7")).unwrap().name,
            "Lace Set"
        );
    }

    #[test]
    fn test_insert_section_replaces_in_place() {
        let mut catalog = Catalog::default();
        catalog.insert_section("b", vec![]);
        catalog.insert_section("a", vec![]);
        catalog.insert_section(
            "b",
            vec![Product::new("b1", "Brief", Decimal::from(5), "b1.jpg")],
        );

        assert_eq!(catalog.section_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(catalog.section("b").unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            Catalog::from_json("[1, 2]"),
            Err(CommerceError::Serialization(_))
        ));
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CommerceError::Serialization(_))
        ));
    }

    #[test]
    fn test_carousel_from_catalog() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        let carousel = catalog.carousel();
        assert_eq!(carousel.active(), Some("img/s1.jpg"));
    }

    #[test]
    fn test_build_programmatically() {
        let mut catalog = Catalog::default();
        catalog.set_carousel(vec!["a.jpg".into()]);
        catalog.insert_section(
            "underwears",
            vec![Product::new("u1", "Lace Set", Decimal::from(80), "u1.jpg")],
        );
        assert_eq!(catalog.products().count(), 1);
        assert_eq!(catalog.products().next().unwrap().0, "underwears");
    }
}
