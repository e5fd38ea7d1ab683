//! Persisted cart format.
//!
//! The cart is stored as a JSON array of
//! `{"id", "name", "price", "image", "quantity"}` objects. Reading is
//! lenient: `unitPrice` is accepted for `price`, `qty` for `quantity`, ids may
//! be integers, and a missing image reads as empty. Entries that still fail
//! validation are dropped one by one.
//!
//! Lines merged by name rather than by product id carry `"key": "name"`, so
//! they keep that identity when read back under the product-id strategy.

use crate::cart::{Absorbed, Cart, LineItem};
use crate::error::CommerceError;
use crate::identity::{IdentityKey, IdentityStrategy};
use crate::ids::ProductId;
use crate::money::{amount_from_f64, Currency};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// `key` marker for lines merged by normalized name.
const NAME_KEY: &str = "name";

/// Wire shape of one persisted line.
#[derive(Debug, Serialize)]
pub struct PersistedLineItem<'a> {
    pub id: &'a ProductId,
    pub name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: &'a str,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'static str>,
}

/// Outcome of reading a persisted cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestoreReport {
    /// Lines now in the cart.
    pub restored: usize,
    /// Entries dropped for failing validation or overflowing a merge.
    pub dropped: usize,
    /// Valid entries folded into an earlier line with the same identity.
    pub merged: usize,
}

/// Borrow a cart as its wire shape.
pub fn encode(cart: &Cart) -> Vec<PersistedLineItem<'_>> {
    cart.items()
        .iter()
        .map(|item| PersistedLineItem {
            id: &item.id,
            name: &item.name,
            price: item.unit_price,
            image: &item.image,
            quantity: item.quantity,
            key: match item.key {
                IdentityKey::Name(_) => Some(NAME_KEY),
                IdentityKey::Product(_) => None,
            },
        })
        .collect()
}

/// Rebuild a cart from a persisted JSON document.
///
/// Never fails: a document that is not an array yields an empty cart, and
/// malformed entries are logged and skipped.
pub fn decode(
    document: &Value,
    strategy: IdentityStrategy,
    currency: Currency,
) -> (Cart, RestoreReport) {
    let mut cart = Cart::new(strategy, currency);
    let mut report = RestoreReport::default();

    let Some(entries) = document.as_array() else {
        tracing::warn!("persisted cart is not a JSON array, starting empty");
        return (cart, report);
    };

    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(index, entry) {
            Ok(line) => match cart.absorb(line.into_item(strategy)) {
                Absorbed::Inserted => {}
                Absorbed::Merged => report.merged += 1,
                Absorbed::Overflow => {
                    tracing::warn!(index, "dropping persisted cart entry, merged quantity overflows");
                    report.dropped += 1;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "dropping persisted cart entry");
                report.dropped += 1;
            }
        }
    }

    report.restored = cart.len();
    (cart, report)
}

struct DecodedLine {
    id: ProductId,
    name: String,
    price: Decimal,
    image: String,
    quantity: i64,
    name_keyed: bool,
}

impl DecodedLine {
    fn into_item(self, strategy: IdentityStrategy) -> LineItem {
        let key = if self.name_keyed {
            IdentityKey::name(&self.name)
        } else {
            strategy.key_for(Some(&self.id), &self.name)
        };
        LineItem {
            key,
            id: self.id,
            name: self.name,
            unit_price: self.price,
            image: self.image,
            quantity: self.quantity,
        }
    }
}

fn decode_entry(index: usize, entry: &Value) -> Result<DecodedLine, CommerceError> {
    let malformed = |reason: &str| CommerceError::MalformedPersistedEntry {
        index,
        reason: reason.to_string(),
    };

    let object = entry.as_object().ok_or_else(|| malformed("not an object"))?;

    let id = match object.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => ProductId::new(s.as_str()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => ProductId::new(n.to_string()),
        _ => return Err(malformed("missing id")),
    };

    let name = match object.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(malformed("missing name")),
    };

    let price = field(object, &["price", "unitPrice"])
        .and_then(Value::as_f64)
        .and_then(amount_from_f64)
        .ok_or_else(|| malformed("non-numeric price"))?;
    if price <= Decimal::ZERO {
        return Err(malformed("price must be positive"));
    }

    let image = match object.get("image") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(malformed("image is not a string")),
    };

    let quantity = field(object, &["quantity", "qty"])
        .and_then(Value::as_i64)
        .ok_or_else(|| malformed("non-integer quantity"))?;
    if quantity < 1 {
        return Err(malformed("quantity below 1"));
    }
    if price.checked_mul(Decimal::from(quantity)).is_none() {
        return Err(malformed("line total overflows"));
    }

    let name_keyed = object.get("key").and_then(Value::as_str) == Some(NAME_KEY);

    Ok(DecodedLine {
        id,
        name,
        price,
        image,
        quantity,
        name_keyed,
    })
}

fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| object.get(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartCandidate;
    use serde_json::json;

    fn restore(document: Value) -> (Cart, RestoreReport) {
        decode(&document, IdentityStrategy::ProductId, Currency::GHS)
    }

    #[test]
    fn test_encode_shape() {
        let mut cart = Cart::default();
        cart.add_item(CartCandidate::new("a", "Corset", Decimal::new(1999, 2), "a.jpg"))
            .unwrap();

        let value = serde_json::to_value(encode(&cart)).unwrap();
        assert_eq!(
            value,
            json!([{"id": "a", "name": "Corset", "price": 19.99, "image": "a.jpg", "quantity": 1}])
        );
    }

    #[test]
    fn test_roundtrip() {
        let mut cart = Cart::default();
        cart.add_item(CartCandidate::new("a", "Corset", Decimal::new(1999, 2), "a.jpg"))
            .unwrap();
        cart.add_item(CartCandidate::new("a", "Corset", Decimal::new(1999, 2), "a.jpg"))
            .unwrap();
        cart.add_item(CartCandidate::new("7", "Brief", Decimal::from(150), "b.jpg"))
            .unwrap();

        let value = serde_json::to_value(encode(&cart)).unwrap();
        let (restored, report) = restore(value);
        assert_eq!(restored, cart);
        assert_eq!(report.restored, 2);
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_accepts_legacy_field_names() {
        let (cart, report) = restore(json!([
            {"id": 12, "name": "Corset", "unitPrice": 10, "image": "c.jpg", "qty": 3},
        ]));
        assert_eq!(report.restored, 1);
        let item = &cart.items()[0];
        assert_eq!(item.id.as_str(), "12");
        assert_eq!(item.unit_price, Decimal::from(10));
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_drops_invalid_entries() {
        let (cart, report) = restore(json!([
            {"id": "ok", "name": "Corset", "price": 10, "quantity": 1},
            {"name": "No id", "price": 10, "quantity": 1},
            {"id": "b", "price": 10, "quantity": 1},
            {"id": "c", "name": "Bad price", "price": "ten", "quantity": 1},
            {"id": "d", "name": "Negative", "price": -5, "quantity": 1},
            {"id": "e", "name": "Zero qty", "price": 5, "quantity": 0},
            {"id": "f", "name": "Float qty", "price": 5, "quantity": 1.5},
            "not an object",
        ]));
        assert_eq!(report.restored, 1);
        assert_eq!(report.dropped, 7);
        assert_eq!(cart.items()[0].id.as_str(), "ok");
        assert_eq!(cart.items()[0].image, "");
    }

    #[test]
    fn test_non_array_document_is_empty() {
        let (cart, report) = restore(json!({"cart": []}));
        assert!(cart.is_empty());
        assert_eq!(report, RestoreReport::default());

        let (cart, _) = restore(Value::Null);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_duplicate_entries_merge_into_first() {
        let (cart, report) = restore(json!([
            {"id": "a", "name": "Corset", "price": 10, "quantity": 1},
            {"id": "b", "name": "Brief", "price": 5, "quantity": 1},
            {"id": "a", "name": "Corset", "price": 10, "quantity": 2},
        ]));
        assert_eq!(report.restored, 2);
        assert_eq!(report.merged, 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].id.as_str(), "b");
    }

    #[test]
    fn test_name_keyed_line_survives_roundtrip() {
        let mut cart = Cart::default();
        cart.add_item(CartCandidate::unidentified("Cotton Brief", Decimal::from(5), "b.jpg"))
            .unwrap();
        cart.add_item(CartCandidate::new("a", "Corset", Decimal::from(10), "a.jpg"))
            .unwrap();

        let value = serde_json::to_value(encode(&cart)).unwrap();
        assert_eq!(value[0]["key"], "name");
        assert!(value[1].get("key").is_none());

        let (mut restored, _) = restore(value);
        assert_eq!(restored, cart);
        assert_eq!(restored.items()[0].key, IdentityKey::name("cotton brief"));

        restored
            .add_item(CartCandidate::unidentified("cotton  brief", Decimal::from(5), "b.jpg"))
            .unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.items()[0].quantity, 2);
    }

    #[test]
    fn test_overflowing_entries_are_dropped() {
        let (cart, report) = restore(json!([
            {"id": "a", "name": "Corset", "price": 10, "quantity": i64::MAX - 1},
            {"id": "a", "name": "Corset", "price": 10, "quantity": 5},
            {"id": "g", "name": "Gown", "price": 1e10, "quantity": i64::MAX},
        ]));
        assert_eq!(report.restored, 1);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.merged, 0);
        assert_eq!(cart.items()[0].quantity, i64::MAX - 1);
        assert!(cart.compute_totals(&crate::cart::TotalsConfig::free()).is_ok());
    }
}
