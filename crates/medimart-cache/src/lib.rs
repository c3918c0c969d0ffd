//! Type-safe key-value storage layer for MediMart.
//!
//! Models the client-local persistent storage a storefront keeps its cart
//! and last order in: named slots holding whole JSON values, overwritten in
//! full on every write.
//!
//! # Example
//!
//! ```rust
//! use medimart_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Slot {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &Slot { items: vec!["aspirin".into()] }).unwrap();
//!
//! let slot: Option<Slot> = cache.get("cart").unwrap();
//! assert_eq!(slot.unwrap().items, vec!["aspirin".to_string()]);
//!
//! cache.delete("cart").unwrap();
//! assert!(!cache.exists("cart").unwrap());
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
