//! Shopping cart module.
//!
//! Contains the cart, its line items, totals, the persisted format and the
//! store that ties a cart to a storage backend.

mod cart;
pub mod persist;
mod pricing;
mod store;

pub use cart::{Cart, CartCandidate, LineItem, QuantityChange};
pub(crate) use cart::Absorbed;
pub use persist::{RestoreReport, CART_STORAGE_KEY};
pub use pricing::{CartTotals, LineTotal, TotalsConfig};
pub use store::{CartOptions, CartStore};
