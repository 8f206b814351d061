//! The order ledger.
//!
//! A single append-only sequence of orders backs both the customer's order
//! history and the vendor's order list, so the two views can never drift
//! apart.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Orders in placement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

/// Result of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The order moved to the new status.
    Changed,
    /// The order already had that status, or the move is not allowed.
    Unchanged,
    /// No order with that id.
    NotFound,
}

/// Headline numbers for the vendor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VendorStats {
    pub total_products: usize,
    pub total_orders: usize,
    pub total_sales: Money,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from stored orders, keeping the first of any
    /// duplicate ids.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let mut ledger = Self::new();
        for order in orders {
            if ledger.contains(&order.id) {
                tracing::warn!(order_id = %order.id, "dropping duplicate order id");
                continue;
            }
            ledger.orders.push(order);
        }
        ledger
    }

    pub(crate) fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Orders in placement order, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The customer's order history, newest first.
    pub fn customer_view(&self) -> Vec<&Order> {
        self.orders.iter().rev().collect()
    }

    /// The vendor's order list, newest first.
    pub fn vendor_view(&self) -> Vec<&Order> {
        self.orders.iter().rev().collect()
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.order(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Move an order to `status`.
    ///
    /// Only `processing -> delivered` is allowed. Anything else, including
    /// an unknown id, leaves the ledger untouched.
    pub fn update_status(&mut self, id: &OrderId, status: OrderStatus) -> StatusUpdate {
        let Some(order) = self.orders.iter_mut().find(|o| &o.id == id) else {
            return StatusUpdate::NotFound;
        };
        if !order.status.can_transition_to(status) {
            return StatusUpdate::Unchanged;
        }
        order.status = status;
        tracing::debug!(order_id = %id, status = %status, "order status changed");
        StatusUpdate::Changed
    }

    /// Id for an order placed at `now`, unique within this ledger.
    pub fn next_order_id(&self, now: DateTime<Utc>) -> OrderId {
        let base = OrderId::from_timestamp_millis(now.timestamp_millis());
        if !self.contains(&base) {
            return base;
        }
        (1..)
            .map(|n| base.with_suffix(n))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(base)
    }

    /// Highest product id any order line refers to.
    pub fn max_product_id(&self) -> Option<ProductId> {
        self.orders
            .iter()
            .flat_map(|o| o.lines.iter().map(|l| l.product_id))
            .max()
    }

    /// Sum of all order totals.
    pub fn total_sales(&self, currency: Currency) -> Result<Money, CommerceError> {
        Money::try_sum(self.orders.iter().map(|o| &o.total), currency).ok_or(CommerceError::Overflow)
    }

    /// Dashboard numbers given the current product count.
    pub fn stats(&self, total_products: usize, currency: Currency) -> Result<VendorStats, CommerceError> {
        Ok(VendorStats {
            total_products,
            total_orders: self.orders.len(),
            total_sales: self.total_sales(currency)?,
        })
    }
}
