//! Product catalog module.
//!
//! Contains the catalog document the storefront is rendered from and the
//! rotating carousel over its images.

mod carousel;
mod document;
mod product;

pub use carousel::{Carousel, ROTATION_INTERVAL};
pub use document::{Catalog, CAROUSEL_SECTION};
pub use product::Product;
