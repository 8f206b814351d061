//! The catalog store: exclusive owner of product records and stock.

use crate::catalog::import::draft_from_record;
use crate::catalog::{Product, ProductDraft, ProductPatch};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::search::CatalogQuery;
use serde_json::Value;

/// Products in insertion order, with id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    currency: Currency,
    next_id: ProductId,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new(currency: Currency) -> Self {
        Self {
            products: Vec::new(),
            currency,
            next_id: ProductId::new(1),
        }
    }

    /// Create a catalog from stored products.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn from_products(products: Vec<Product>, currency: Currency) -> Self {
        let mut catalog = Self::new(currency);
        for product in products {
            if catalog.product(product.id).is_some() {
                tracing::warn!(product_id = %product.id, "dropping duplicate product id");
                continue;
            }
            catalog.reserve_ids_through(product.id);
            catalog.products.push(product);
        }
        catalog
    }

    /// Make sure ids up to and including `id` are never handed out again.
    ///
    /// Used for ids still referenced by carts or orders after the product
    /// itself is gone.
    pub fn reserve_ids_through(&mut self, id: ProductId) {
        if id >= self.next_id {
            self.next_id = id.next();
        }
    }

    /// Currency used for new prices.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add a product and return its new id.
    pub fn add_product(&mut self, draft: ProductDraft) -> ProductId {
        let id = self.next_id;
        self.next_id = id.next();
        let product = draft.into_product(id, self.currency);
        tracing::debug!(product_id = %id, title = %product.title, "product added");
        self.products.push(product);
        id
    }

    /// Merge `patch` onto an existing product.
    ///
    /// Returns `false` (and changes nothing) if the id is unknown.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> bool {
        match self.product_mut(id) {
            Some(product) => {
                patch.apply(product);
                tracing::debug!(product_id = %id, "product updated");
                true
            }
            None => false,
        }
    }

    /// Remove a product, returning it if it existed.
    ///
    /// Cart lines pointing at the product are left in place and treated as
    /// absent from then on.
    pub fn delete_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        tracing::debug!(product_id = %id, "product deleted");
        Some(self.products.remove(index))
    }

    /// Get a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products matching a query.
    pub fn list_products(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Take `quantity` units out of stock and return what remains.
    pub fn decrement_stock(&mut self, id: ProductId, quantity: u32) -> Result<u32, CommerceError> {
        let product = self
            .product_mut(id)
            .ok_or(CommerceError::ProductNotFound(id))?;
        let remaining = product
            .stock
            .checked_sub(quantity)
            .ok_or(CommerceError::InsufficientStock {
                product_id: id,
                requested: quantity,
                available: product.stock,
            })?;
        product.stock = remaining;
        Ok(remaining)
    }

    /// Add every valid record and return how many were imported.
    pub fn import_batch(&mut self, records: &[Value]) -> usize {
        let mut imported = 0;
        for (index, record) in records.iter().enumerate() {
            match draft_from_record(record) {
                Some(draft) => {
                    self.add_product(draft);
                    imported += 1;
                }
                None => tracing::warn!(index, "skipping import record missing title, price or description"),
            }
        }
        imported
    }
}
