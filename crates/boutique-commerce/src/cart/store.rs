//! Cart store: a [`Cart`] bound to a key-value persistence backend.

use boutique_cache::{Cache, KeyValueStore};
use serde_json::Value;

use crate::cart::persist::{self, RestoreReport, CART_STORAGE_KEY};
use crate::cart::{Cart, CartCandidate, CartTotals, LineItem, QuantityChange, TotalsConfig};
use crate::error::CommerceError;
use crate::identity::{IdentityKey, IdentityStrategy};
use crate::money::Currency;

/// Settings fixed for the lifetime of a [`CartStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// How add-to-cart actions are merged.
    pub strategy: IdentityStrategy,
    /// Currency for totals.
    pub currency: Currency,
    /// Storage key the cart lives under.
    pub storage_key: String,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            strategy: IdentityStrategy::default(),
            currency: Currency::default(),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

impl CartOptions {
    /// Use a different identity strategy.
    pub fn with_strategy(mut self, strategy: IdentityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use a different currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Owns the session's cart and writes it through to storage.
///
/// Every successful mutation is followed by a flush. A failed flush is logged
/// and otherwise ignored: the in-memory cart stays authoritative for the
/// session. Operations that return an error leave both the cart and storage
/// untouched.
///
/// Two stores over the same backend key overwrite each other; the last flush
/// wins.
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    storage_key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store with an empty cart. Storage is not read.
    pub fn new(store: S, options: CartOptions) -> Self {
        Self {
            cart: Cart::new(options.strategy, options.currency),
            cache: Cache::new(store),
            storage_key: options.storage_key,
        }
    }

    /// Create a store and restore the persisted cart.
    pub fn open(store: S, options: CartOptions) -> Self {
        let mut cart_store = Self::new(store, options);
        cart_store.restore();
        cart_store
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Absent or unreadable data yields an empty cart; invalid entries are
    /// dropped individually.
    pub fn restore(&mut self) -> RestoreReport {
        let strategy = self.cart.strategy();
        let currency = self.cart.currency();

        let document = match self.cache.get::<Value>(&self.storage_key) {
            Ok(Some(document)) => document,
            Ok(None) => Value::Array(Vec::new()),
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "unreadable persisted cart, starting empty");
                Value::Array(Vec::new())
            }
        };

        let (cart, report) = persist::decode(&document, strategy, currency);
        self.cart = cart;
        tracing::info!(
            restored = report.restored,
            dropped = report.dropped,
            merged = report.merged,
            "cart restored"
        );
        report
    }

    /// Write the cart to storage.
    pub fn flush(&mut self) -> Result<(), CommerceError> {
        let lines = persist::encode(&self.cart);
        self.cache.set(&self.storage_key, &lines)?;
        Ok(())
    }

    /// Add one unit of a product, merging by identity.
    pub fn add_item(&mut self, candidate: CartCandidate) -> Result<LineItem, CommerceError> {
        let item = self.cart.add_item(candidate)?.clone();
        tracing::debug!(key = %item.key, quantity = item.quantity, "item added");
        self.persist();
        Ok(item)
    }

    /// Adjust a line's quantity by `delta`, removing it at zero or below.
    pub fn set_quantity(
        &mut self,
        key: &IdentityKey,
        delta: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let change = self.cart.set_quantity(key, delta)?;
        tracing::debug!(%key, delta, ?change, "quantity adjusted");
        self.persist();
        Ok(change)
    }

    /// Set a line's quantity, removing it at zero or below.
    pub fn set_absolute_quantity(
        &mut self,
        key: &IdentityKey,
        target: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let change = self.cart.set_absolute_quantity(key, target)?;
        tracing::debug!(%key, target, ?change, "quantity set");
        self.persist();
        Ok(change)
    }

    /// Remove a line.
    pub fn remove_item(&mut self, key: &IdentityKey) -> Result<LineItem, CommerceError> {
        let item = self.cart.remove_item(key)?;
        tracing::debug!(%key, "item removed");
        self.persist();
        Ok(item)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// Compute totals for the current cart.
    pub fn compute_totals(&self, config: &TotalsConfig) -> Result<CartTotals, CommerceError> {
        self.cart.compute_totals(config)
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Get a line by identity.
    pub fn get(&self, key: &IdentityKey) -> Option<&LineItem> {
        self.cart.get(key)
    }

    /// Storage key in use.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Borrow the persistence backend.
    pub fn backend(&self) -> &S {
        self.cache.backend()
    }

    /// Consume the store and return the backend.
    pub fn into_backend(self) -> S {
        self.cache.into_inner()
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(key = %self.storage_key, error = %e, "cart flush failed, keeping in-memory cart");
        }
    }
}
