//! Product filter predicates.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A filter over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive substring of the title or description.
    Text(String),
    /// Exact category match.
    Category(String),
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Check if a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            Filter::Category(category) => product.category == *category,
        }
    }
}
