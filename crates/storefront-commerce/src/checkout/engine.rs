//! Order placement.

use crate::cart::{Cart, CartPricing};
use crate::catalog::Catalog;
use crate::checkout::{CustomerInfo, DeliveryPolicy, Order, OrderLine, OrderStatus, RandomSource, ThreadRandom};
use crate::clock::{Clock, SystemClock};
use crate::error::CommerceError;
use crate::ledger::OrderLedger;

/// Turns a cart into an order.
///
/// Either every effect of a checkout happens (stock decremented, order
/// appended, cart emptied) or none does.
pub struct CheckoutEngine {
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
    policy: DeliveryPolicy,
}

impl Default for CheckoutEngine {
    fn default() -> Self {
        Self::new(DeliveryPolicy::default())
    }
}

impl CheckoutEngine {
    /// Engine on the system clock and thread RNG.
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self {
            clock: Box::new(SystemClock),
            random: Box::new(ThreadRandom),
            policy,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Current time according to the engine's clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Place an order for everything in `cart`.
    ///
    /// Lines whose product has been deleted are skipped. Fails with
    /// `EmptyCart` if nothing purchasable remains and with `StockExceeded`
    /// for the first line asking for more than is on hand, or with
    /// `DeliveryOutOfRange` if the estimate cannot be dated. On failure
    /// nothing is changed.
    pub fn checkout(
        &mut self,
        catalog: &mut Catalog,
        cart: &mut Cart,
        ledger: &mut OrderLedger,
        customer: CustomerInfo,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let pricing = cart.pricing(catalog)?;
        if !pricing.dangling.is_empty() {
            tracing::warn!(products = ?pricing.dangling, "skipping cart lines for deleted products");
        }
        if pricing.lines.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        validate_stock(&pricing)?;

        let placed_at = self.clock.now();
        let estimate = self.policy.estimate(self.random.as_mut());
        let delivery_date = estimate
            .delivery_date(placed_at)
            .ok_or(CommerceError::DeliveryOutOfRange(estimate.days))?;

        let mut staged = catalog.clone();
        for line in &pricing.lines {
            staged.decrement_stock(line.product_id, line.quantity)?;
        }

        let order = Order {
            id: ledger.next_order_id(placed_at),
            placed_at,
            customer,
            lines: pricing
                .lines
                .into_iter()
                .map(|l| OrderLine {
                    product_id: l.product_id,
                    title: l.title,
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                    line_total: l.line_total,
                })
                .collect(),
            total: pricing.total,
            status: OrderStatus::Processing,
            estimated_delivery: estimate,
            delivery_date,
        };

        *catalog = staged;
        ledger.append(order.clone());
        cart.clear();

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }
}

fn validate_stock(pricing: &CartPricing) -> Result<(), CommerceError> {
    match pricing.lines.iter().find(|l| l.is_over_stock()) {
        Some(line) => Err(CommerceError::StockExceeded {
            product_id: line.product_id,
            requested: line.quantity,
            available: line.stock,
        }),
        None => Ok(()),
    }
}
