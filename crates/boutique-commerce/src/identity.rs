//! Cart line identity.
//!
//! Two add-to-cart actions land on the same line when they produce the same
//! [`IdentityKey`]. Which key a candidate produces depends on the configured
//! [`IdentityStrategy`].

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How add-to-cart actions are matched to existing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityStrategy {
    /// Key by product id when one is supplied, else by normalized name.
    #[default]
    ProductId,
    /// Always key by normalized name.
    Name,
}

impl IdentityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityStrategy::ProductId => "product-id",
            IdentityStrategy::Name => "name",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "product-id" | "product_id" | "id" => Some(IdentityStrategy::ProductId),
            "name" => Some(IdentityStrategy::Name),
            _ => None,
        }
    }

    /// Derive the identity key for a product.
    pub fn key_for(&self, id: Option<&ProductId>, name: &str) -> IdentityKey {
        match (self, id) {
            (IdentityStrategy::ProductId, Some(id)) if !id.is_blank() => {
                IdentityKey::Product(id.clone())
            }
            _ => IdentityKey::name(name),
        }
    }
}

impl fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value that decides whether two cart actions refer to the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Caller-supplied product id.
    Product(ProductId),
    /// Normalized product name.
    Name(String),
}

impl IdentityKey {
    /// Key for a product id.
    pub fn product(id: impl Into<ProductId>) -> Self {
        IdentityKey::Product(id.into())
    }

    /// Key for a product name. The name is normalized.
    pub fn name(name: &str) -> Self {
        IdentityKey::Name(normalize_name(name))
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Product(id) => write!(f, "id:{id}"),
            IdentityKey::Name(name) => write!(f, "name:{name}"),
        }
    }
}

/// Trim, collapse internal whitespace and lowercase a product name.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
