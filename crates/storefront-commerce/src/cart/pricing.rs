//! Cart pricing against current catalog prices.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Lines whose product still exists, in cart order.
    pub lines: Vec<PricedLine>,
    /// Sum of line totals.
    pub total: Money,
    /// Lines skipped because their product was deleted.
    pub dangling: Vec<ProductId>,
}

impl CartPricing {
    /// Total units across priced lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// A cart line resolved against its product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedLine {
    /// Product ID.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Current unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
    /// Units currently in stock.
    pub stock: u32,
}

impl PricedLine {
    /// Check if the line asks for more than is in stock.
    pub fn is_over_stock(&self) -> bool {
        self.quantity > self.stock
    }
}
