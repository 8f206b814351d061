//! Shopping cart module.
//!
//! Contains cart lines and the pricing view resolved against the catalog.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine};
pub use pricing::{CartPricing, PricedLine};
