//! Cart store, totals and catalog types for the Boutique storefront.
//!
//! - **Cart**: ordered line items merged by identity, quantity adjustments,
//!   totals with flat shipping and tax, and a store that persists the cart to
//!   a key-value backend after every change
//! - **Catalog**: the product document the storefront renders, and its
//!   image carousel
//!
//! # Example
//!
//! ```rust
//! use boutique_cache::MemoryStore;
//! use boutique_commerce::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::open(MemoryStore::new(), CartOptions::default());
//!
//! store
//!     .add_item(CartCandidate::new("a", "Satin Corset", Decimal::from(10), "a.jpg"))
//!     .unwrap();
//! store
//!     .add_item(CartCandidate::new("a", "Satin Corset", Decimal::from(10), "a.jpg"))
//!     .unwrap();
//! store
//!     .add_item(CartCandidate::new("b", "Cotton Brief", Decimal::from(5), "b.jpg"))
//!     .unwrap();
//!
//! let config = TotalsConfig::new(Decimal::from(10), Decimal::ZERO).unwrap();
//! let totals = store.compute_totals(&config).unwrap();
//! assert_eq!(totals.grand_total.display(), "GHS 35.00");
//! ```

pub mod error;
pub mod identity;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use identity::{IdentityKey, IdentityStrategy};
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::identity::{IdentityKey, IdentityStrategy};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartCandidate, CartOptions, CartStore, CartTotals, LineItem, LineTotal,
        QuantityChange, RestoreReport, TotalsConfig, CART_STORAGE_KEY,
    };

    // Catalog
    pub use crate::catalog::{Carousel, Catalog, Product};
}
