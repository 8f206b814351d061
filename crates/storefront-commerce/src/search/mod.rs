//! Catalog search module.
//!
//! Contains the filter predicates and sort options used to list products.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
