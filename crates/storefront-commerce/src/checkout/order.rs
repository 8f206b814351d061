//! Order records.

use crate::checkout::{CustomerInfo, DeliveryEstimate};
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed and awaiting delivery.
    #[default]
    Processing,
    /// Handed to the customer.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Check if moving to `next` is allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Processing, OrderStatus::Delivered))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => Ok(OrderStatus::Processing),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// A purchased line, frozen at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order id.
    pub id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Customer contact details.
    pub customer: CustomerInfo,
    /// Purchased lines.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals.
    pub total: Money,
    /// Current status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Estimated delivery window.
    pub estimated_delivery: DeliveryEstimate,
    /// Expected delivery date.
    pub delivery_date: NaiveDate,
}

impl Order {
    /// Total units across lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if the order has been delivered.
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Check if any line is for `product_id`.
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }
}
