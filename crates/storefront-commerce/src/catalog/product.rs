//! Product records and the inputs that create or edit them.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "other";

/// Vendor label for products added through the vendor panel.
pub const DEFAULT_VENDOR: &str = "Your Store";

/// Vendor label for products that arrived through a bulk import.
pub const IMPORT_VENDOR: &str = "Imported Store";

/// Stock given to imported products that don't state one.
pub const IMPORT_DEFAULT_STOCK: u32 = 10;

/// Placeholder image reference for a product without one.
pub fn placeholder_image(id: ProductId) -> String {
    format!("https://picsum.photos/seed/product-{}/400/300", id)
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier, never changed after creation.
    pub id: ProductId,
    /// Product name.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Free-text category tag.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Units on hand.
    pub stock: u32,
    /// Selling vendor's display name.
    pub vendor: String,
}

impl Product {
    /// Check if at least one unit can be sold.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if `quantity` units can be sold.
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

/// Input for adding a product.
///
/// Numeric fields hold raw user input; they are coerced when the product
/// is created (negative or non-finite values become zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
    pub vendor: Option<String>,
}

impl ProductDraft {
    /// Create a draft with the required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            ..Self::default()
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Build the product record, filling defaults for absent fields.
    pub(crate) fn into_product(self, id: ProductId, currency: Currency) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: Money::price(self.price, currency),
            category: non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image: non_blank(self.image).unwrap_or_else(|| placeholder_image(id)),
            stock: coerce_stock(self.stock),
            vendor: non_blank(self.vendor).unwrap_or_else(|| DEFAULT_VENDOR.to_string()),
        }
    }
}

/// A partial edit of an existing product. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<i64>,
    pub vendor: Option<String>,
}

impl ProductPatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = Money::price(price, product.price.currency);
        }
        if let Some(category) = non_blank(self.category) {
            product.category = category;
        }
        if let Some(image) = non_blank(self.image) {
            product.image = image;
        }
        if let Some(stock) = self.stock {
            product.stock = coerce_stock(stock);
        }
        if let Some(vendor) = non_blank(self.vendor) {
            product.vendor = vendor;
        }
    }
}

/// Clamp raw stock input into the valid range.
pub(crate) fn coerce_stock(stock: i64) -> u32 {
    u32::try_from(stock.max(0)).unwrap_or(u32::MAX)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
