//! Product catalog module.
//!
//! Contains product records, the catalog store, bulk import and demo data.

pub mod import;
mod product;
pub mod seed;
mod store;

pub use import::parse_import;
pub use product::{
    placeholder_image, Product, ProductDraft, ProductPatch, DEFAULT_CATEGORY, DEFAULT_VENDOR,
    IMPORT_DEFAULT_STOCK, IMPORT_VENDOR,
};
pub use store::Catalog;
