//! Cart and line item types.

use crate::cart::{CartTotals, LineTotal, TotalsConfig};
use crate::error::CommerceError;
use crate::identity::{normalize_name, IdentityKey, IdentityStrategy};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;

/// A product the view layer wants to put in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartCandidate {
    /// Product id. `None` gets a generated id and a name-based identity.
    pub id: Option<ProductId>,
    /// Display name.
    pub name: String,
    /// Unit price; must be positive.
    pub unit_price: Decimal,
    /// Opaque image reference.
    pub image: String,
}

impl CartCandidate {
    /// Create a candidate with a product id.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            unit_price,
            image: image.into(),
        }
    }

    /// Create a candidate that has no product id.
    pub fn unidentified(
        name: impl Into<String>,
        unit_price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            unit_price,
            image: image.into(),
        }
    }

    fn validate(&self) -> Result<(), CommerceError> {
        if self.unit_price <= Decimal::ZERO {
            return Err(CommerceError::InvalidPrice {
                name: self.name.clone(),
                price: self.unit_price.to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::InvalidName);
        }
        Ok(())
    }
}

/// One product entry in the cart.
///
/// `quantity` is at least 1 for as long as the item is in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Identity this line is merged on.
    pub key: IdentityKey,
    /// Product id as persisted.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Decimal,
    /// Opaque image reference.
    pub image: String,
    /// Quantity.
    pub quantity: i64,
}

impl LineItem {
    /// Unrounded `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Decimal, CommerceError> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// What happened to a line read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Absorbed {
    /// Appended as a new line.
    Inserted,
    /// Folded into an earlier line with the same identity.
    Merged,
    /// Folding it in would overflow the quantity or line total; skipped.
    Overflow,
}

/// Result of a quantity adjustment.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// Line kept in place with a new quantity.
    Updated { quantity: i64 },
    /// Quantity dropped to zero or below; the line was removed.
    Removed(LineItem),
}

/// An ordered shopping cart.
///
/// Lines keep insertion order and there is at most one line per
/// [`IdentityKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    strategy: IdentityStrategy,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(strategy: IdentityStrategy, currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            strategy,
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// Merges into the existing line for the same identity, otherwise appends
    /// a new line with quantity 1. The cart is unchanged on error.
    pub fn add_item(&mut self, candidate: CartCandidate) -> Result<&LineItem, CommerceError> {
        candidate.validate()?;

        let key = self.strategy.key_for(candidate.id.as_ref(), &candidate.name);
        if let Some(pos) = self.position(&key) {
            let existing = &mut self.items[pos];
            existing.quantity = checked_quantity(existing, 1)?;
            return Ok(&self.items[pos]);
        }

        let id = match candidate.id {
            Some(id) if !id.is_blank() => id,
            _ => ProductId::generate(),
        };
        self.items.push(LineItem {
            key,
            id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image: candidate.image,
            quantity: 1,
        });
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Adjust a line's quantity by a signed delta.
    ///
    /// A resulting quantity of zero or less removes the line; otherwise the
    /// line is updated in place.
    pub fn set_quantity(
        &mut self,
        key: &IdentityKey,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let pos = self
            .position(key)
            .ok_or_else(|| CommerceError::NotFound(key.to_string()))?;

        let quantity = checked_quantity(&self.items[pos], delta)?;

        if quantity <= 0 {
            return Ok(QuantityChange::Removed(self.items.remove(pos)));
        }
        self.items[pos].quantity = quantity;
        Ok(QuantityChange::Updated { quantity })
    }

    /// Set a line's quantity to `target`; zero or less removes it.
    pub fn set_absolute_quantity(
        &mut self,
        key: &IdentityKey,
        target: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let current = self
            .get(key)
            .map(|item| item.quantity)
            .ok_or_else(|| CommerceError::NotFound(key.to_string()))?;
        let delta = target.checked_sub(current).ok_or(CommerceError::Overflow)?;
        self.set_quantity(key, delta)
    }

    /// Remove a line.
    pub fn remove_item(&mut self, key: &IdentityKey) -> Result<LineItem, CommerceError> {
        let pos = self
            .position(key)
            .ok_or_else(|| CommerceError::NotFound(key.to_string()))?;
        Ok(self.items.remove(pos))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compute subtotal, shipping, tax and grand total. Does not mutate.
    ///
    /// Fails with [`CommerceError::Overflow`] when an amount no longer fits
    /// in a decimal.
    pub fn compute_totals(&self, config: &TotalsConfig) -> Result<CartTotals, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(LineTotal {
                    key: item.key.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: Money::new(item.unit_price, self.currency),
                    total: Money::new(item.line_total()?, self.currency),
                })
            })
            .collect::<Result<Vec<LineTotal>, CommerceError>>()?;

        let subtotal = Money::checked_sum(lines.iter().map(|l| &l.total), self.currency)
            .ok_or(CommerceError::Overflow)?;
        let shipping = Money::new(config.shipping_flat(), self.currency);
        let tax = subtotal
            .checked_multiply_rate(config.tax_rate())
            .ok_or(CommerceError::Overflow)?;
        let grand_total = subtotal
            .checked_add(&shipping)
            .and_then(|m| m.checked_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            subtotal,
            shipping,
            tax,
            grand_total,
            lines,
        })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by identity.
    pub fn get(&self, key: &IdentityKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Find a line from user input: a product id or a product name.
    pub fn lookup(&self, raw: &str) -> Option<&LineItem> {
        let by_id = IdentityKey::product(raw.trim());
        let by_name = IdentityKey::Name(normalize_name(raw));
        self.items
            .iter()
            .find(|i| i.key == by_id)
            .or_else(|| self.items.iter().find(|i| i.key == by_name))
    }

    /// Get total item count (sum of quantities, saturating).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Get number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identity strategy used for merging.
    pub fn strategy(&self) -> IdentityStrategy {
        self.strategy
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Insert a line read back from storage.
    ///
    /// A line whose key is already present is folded into the earlier line,
    /// unless the combined quantity or line total would overflow.
    pub(crate) fn absorb(&mut self, line: LineItem) -> Absorbed {
        let Some(pos) = self.position(&line.key) else {
            self.items.push(line);
            return Absorbed::Inserted;
        };

        let existing = &self.items[pos];
        let merged = existing
            .quantity
            .checked_add(line.quantity)
            .filter(|&quantity| existing.unit_price.checked_mul(Decimal::from(quantity)).is_some());
        match merged {
            Some(quantity) => {
                self.items[pos].quantity = quantity;
                Absorbed::Merged
            }
            None => Absorbed::Overflow,
        }
    }

    fn position(&self, key: &IdentityKey) -> Option<usize> {
        self.items.iter().position(|i| &i.key == key)
    }
}

/// `item.quantity + delta`, rejecting results whose line total would not fit.
fn checked_quantity(item: &LineItem, delta: i64) -> Result<i64, CommerceError> {
    let quantity = item
        .quantity
        .checked_add(delta)
        .ok_or(CommerceError::Overflow)?;
    if quantity > 0 && item.unit_price.checked_mul(Decimal::from(quantity)).is_none() {
        return Err(CommerceError::Overflow);
    }
    Ok(quantity)
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(IdentityStrategy::default(), Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(units: i64) -> Decimal {
        Decimal::from(units)
    }

    fn candidate(id: &str, name: &str, units: i64) -> CartCandidate {
        CartCandidate::new(id, name, price(units), format!("{id}.jpg"))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.strategy(), IdentityStrategy::ProductId);
        assert_eq!(cart.currency(), Currency::GHS);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        let item = cart.add_item(candidate("a", "Corset", 10)).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.key, IdentityKey::product("a"));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::default();
        for _ in 0..4 {
            cart.add_item(candidate("a", "Corset", 10)).unwrap();
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&IdentityKey::product("a")).unwrap().quantity, 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.add_item(candidate("b", "Brief", 5)).unwrap();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_price_rejected() {
        let mut cart = Cart::default();
        let result = cart.add_item(candidate("a", "Bra", -5));
        assert!(matches!(result, Err(CommerceError::InvalidPrice { .. })));

        let result = cart.add_item(candidate("a", "Bra", 0));
        assert!(matches!(result, Err(CommerceError::InvalidPrice { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut cart = Cart::default();
        let result = cart.add_item(candidate("a", "   ", 5));
        assert!(matches!(result, Err(CommerceError::InvalidName)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_name_strategy_merges_by_name() {
        let mut cart = Cart::new(IdentityStrategy::Name, Currency::GHS);
        cart.add_item(CartCandidate::unidentified("Lace Bra", price(20), "1.jpg"))
            .unwrap();
        cart.add_item(CartCandidate::unidentified(" lace  BRA", price(25), "2.jpg"))
            .unwrap();

        assert_eq!(cart.len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.quantity, 2);
        // first entry's price and image are kept
        assert_eq!(item.unit_price, price(20));
        assert_eq!(item.image, "1.jpg");
        assert!(!item.id.is_blank());
    }

    #[test]
    fn test_missing_id_falls_back_to_name() {
        let mut cart = Cart::default();
        cart.add_item(CartCandidate::unidentified("Brief", price(5), "b.jpg"))
            .unwrap();
        cart.add_item(CartCandidate::unidentified("brief", price(5), "b.jpg"))
            .unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get(&IdentityKey::name("Brief")).is_some());
    }

    #[test]
    fn test_set_quantity_delta() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.add_item(candidate("b", "Brief", 5)).unwrap();
        let key = IdentityKey::product("a");

        let change = cart.set_quantity(&key, 3).unwrap();
        assert_eq!(change, QuantityChange::Updated { quantity: 4 });

        let change = cart.set_quantity(&key, -1).unwrap();
        assert_eq!(change, QuantityChange::Updated { quantity: 3 });
        // still first
        assert_eq!(cart.items()[0].key, key);
    }

    #[test]
    fn test_set_quantity_to_zero_removes() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        let key = IdentityKey::product("a");

        let change = cart.set_quantity(&key, -5).unwrap();
        assert!(matches!(change, QuantityChange::Removed(ref item) if item.quantity == 2));
        assert!(cart.get(&key).is_none());
    }

    #[test]
    fn test_set_quantity_not_found() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        let before = cart.clone();

        let result = cart.set_quantity(&IdentityKey::product("zzz"), 1);
        assert!(matches!(result, Err(CommerceError::NotFound(_))));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_absolute_quantity() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        let key = IdentityKey::product("a");

        assert_eq!(
            cart.set_absolute_quantity(&key, 7).unwrap(),
            QuantityChange::Updated { quantity: 7 }
        );
        assert!(matches!(
            cart.set_absolute_quantity(&key, 0).unwrap(),
            QuantityChange::Removed(_)
        ));
    }

    #[test]
    fn test_quantity_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        let key = IdentityKey::product("a");

        let result = cart.set_quantity(&key, i64::MAX);
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart.get(&key).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        let removed = cart.remove_item(&IdentityKey::product("a")).unwrap();
        assert_eq!(removed.name, "Corset");
        assert!(cart.is_empty());

        let result = cart.remove_item(&IdentityKey::product("a"));
        assert!(matches!(result, Err(CommerceError::NotFound(_))));
    }

    #[test]
    fn test_remove_then_add_starts_fresh() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.remove_item(&IdentityKey::product("a")).unwrap();

        let item = cart.add_item(candidate("a", "Corset", 10)).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_lookup_by_id_or_name() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.add_item(CartCandidate::unidentified("Lace Brief", price(5), ""))
            .unwrap();

        assert_eq!(cart.lookup("a").unwrap().name, "Corset");
        assert_eq!(cart.lookup("lace brief").unwrap().name, "Lace Brief");
        assert!(cart.lookup("nothing").is_none());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add_item(candidate("a", "Corset", 10)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    fn stored(id: &str, unit_price: Decimal, quantity: i64) -> LineItem {
        LineItem {
            key: IdentityKey::product(id),
            id: ProductId::new(id),
            name: "Corset".to_string(),
            unit_price,
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_absorb_merges_duplicates() {
        let mut cart = Cart::default();
        assert_eq!(cart.absorb(stored("a", price(10), 2)), Absorbed::Inserted);
        assert_eq!(cart.absorb(stored("a", price(10), 3)), Absorbed::Merged);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_absorb_refuses_overflowing_merge() {
        let mut cart = Cart::default();
        cart.absorb(stored("a", price(10), i64::MAX - 1));
        assert_eq!(cart.absorb(stored("a", price(10), 5)), Absorbed::Overflow);
        assert_eq!(cart.items()[0].quantity, i64::MAX - 1);

        // quantity fits but the line total would not
        let mut cart = Cart::default();
        let big = Decimal::from(10_000_000_000i64);
        cart.absorb(stored("b", big, 1));
        assert_eq!(cart.absorb(stored("b", big, i64::MAX - 1)), Absorbed::Overflow);
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(cart.compute_totals(&TotalsConfig::free()).is_ok());
    }

    #[test]
    fn test_line_total_overflow_is_rejected() {
        let mut cart = Cart::default();
        cart.add_item(CartCandidate::new("a", "Gown", Decimal::from(10_000_000_000i64), ""))
            .unwrap();
        let key = IdentityKey::product("a");

        let result = cart.set_quantity(&key, i64::MAX - 1);
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart.get(&key).unwrap().quantity, 1);
        assert!(cart.compute_totals(&TotalsConfig::free()).is_ok());
    }

    #[test]
    fn test_compute_totals_overflow_is_an_error() {
        let mut cart = Cart::default();
        let gown = Decimal::from(10_000_000_000i64);
        cart.add_item(CartCandidate::new("a", "Gown", gown, "")).unwrap();
        cart.add_item(CartCandidate::new("b", "Robe", gown, "")).unwrap();
        // each line is 5e28; together they exceed the decimal range
        let huge = 5_000_000_000_000_000_000i64;
        cart.set_absolute_quantity(&IdentityKey::product("a"), huge)
            .unwrap();
        cart.set_absolute_quantity(&IdentityKey::product("b"), huge)
            .unwrap();
        let before = cart.clone();

        let result = cart.compute_totals(&TotalsConfig::free());
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart, before);
        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn test_line_total() {
        let item = stored("a", Decimal::new(1999, 2), 3);
        assert_eq!(item.line_total().unwrap(), Decimal::new(5997, 2));
    }
}
