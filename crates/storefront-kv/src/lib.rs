//! Type-safe key-value storage for the storefront.
//!
//! Provides a small blob-store abstraction ([`KvStore`]) with an in-memory
//! and a directory-backed implementation, plus a [`Cache`] wrapper that
//! handles JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use storefront_kv::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct CartLine {
//!     product_id: u64,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &vec![CartLine { product_id: 1, quantity: 2 }]).unwrap();
//!
//! // Retrieve a value
//! let cart: Option<Vec<CartLine>> = cache.get("cart").unwrap();
//! assert_eq!(cart.map(|c| c.len()), Some(1));
//!
//! // Delete a value
//! cache.delete("cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::KvError;
pub use file::FileStore;
pub use kv::{Batch, Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Batch, Cache, FileStore, KvError, KvStore, MemoryStore};
}
