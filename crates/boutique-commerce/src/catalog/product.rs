//! Catalog product type.

use crate::cart::CartCandidate;
use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listed in a catalog section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image reference.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// The add-to-cart candidate for this product.
    pub fn to_candidate(&self) -> CartCandidate {
        CartCandidate::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.image.clone(),
        )
    }
}

impl From<&Product> for CartCandidate {
    fn from(product: &Product) -> Self {
        product.to_candidate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_product() {
        let product: Product = serde_json::from_str(
            r#"{"id": 3, "name": "Satin Corset", "price": 250.5, "image": "img/c3.jpg"}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.price, Decimal::new(2505, 1));
    }

    #[test]
    fn test_to_candidate() {
        let product = Product::new("c-1", "Corset", Decimal::from(120), "c1.jpg");
        let candidate = CartCandidate::from(&product);
        assert_eq!(candidate.id, Some(ProductId::new("c-1")));
        assert_eq!(candidate.unit_price, Decimal::from(120));
        assert_eq!(candidate.image, "c1.jpg");
    }
}
