//! Type-safe key-value persistence layer for the Boutique storefront.
//!
//! Provides a small storage port ([`KeyValueStore`]) with an in-memory and a
//! file-backed implementation, plus a [`Cache`] wrapper that handles JSON
//! serialization on top of any backend.
//!
//! # Example
//!
//! ```rust
//! use boutique_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Entry {
//!     name: String,
//! }
//!
//! let mut cache = Cache::new(MemoryStore::new());
//!
//! cache.set("entry", &Entry { name: "Lace Bra".into() }).unwrap();
//!
//! let entry: Option<Entry> = cache.get("entry").unwrap();
//! assert_eq!(entry.unwrap().name, "Lace Bra");
//!
//! cache.delete("entry").unwrap();
//! assert!(!cache.exists("entry").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
