//! Medicine catalog module.
//!
//! Catalog items are owned by the backend; the storefront only reads them.

mod category;
mod medicine;

pub use category::{slugify, Category};
pub use medicine::Medicine;
