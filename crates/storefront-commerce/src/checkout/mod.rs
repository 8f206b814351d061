//! Checkout: customer details, delivery estimates, orders and the engine
//! that places them.

mod customer;
mod delivery;
mod engine;
mod order;

pub use customer::CustomerInfo;
pub use delivery::{DeliveryEstimate, DeliveryPolicy, FixedRandom, RandomSource, ThreadRandom};
pub use engine::CheckoutEngine;
pub use order::{Order, OrderLine, OrderStatus};
