//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Every variant is recoverable: a failed operation leaves catalog, cart
/// and ledger exactly as they were before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product has no stock left.
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    /// Requested cart quantity is more than the product has in stock.
    #[error("Cannot exceed available stock for {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Stock decrement larger than the stock on hand.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Import text is not valid JSON.
    #[error("Invalid import data: {0}")]
    ImportParseError(String),

    /// Import JSON is not an array of products.
    #[error("Import data must be an array of products, got {0}")]
    ImportShapeError(String),

    /// Quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Delivery estimate lands past the last representable date.
    #[error("Delivery estimate of {0} days is out of range")]
    DeliveryOutOfRange(u32),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<storefront_kv::KvError> for CommerceError {
    fn from(e: storefront_kv::KvError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
