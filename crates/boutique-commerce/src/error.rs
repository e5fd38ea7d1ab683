//! Commerce error types.

use boutique_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
///
/// None of these are fatal: every cart operation that returns one has left
/// the cart exactly as it was.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Price is not a positive amount; the item was not added.
    #[error("Invalid price for {name:?}: {price}")]
    InvalidPrice { name: String, price: String },

    /// Name is empty; the item was not added.
    #[error("Product name must not be empty")]
    InvalidName,

    /// Operation referenced an identity that is not in the cart.
    #[error("Item not in cart: {0}")]
    NotFound(String),

    /// A persisted cart entry failed shape validation.
    ///
    /// Restore drops such entries and only logs this error.
    #[error("Malformed persisted entry at index {index}: {reason}")]
    MalformedPersistedEntry { index: usize, reason: String },

    /// Totals configuration is out of range.
    #[error("Invalid totals configuration: {0}")]
    InvalidConfig(String),

    /// Arithmetic overflow in a quantity calculation.
    #[error("Arithmetic overflow in quantity calculation")]
    Overflow,

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    /// Document could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
