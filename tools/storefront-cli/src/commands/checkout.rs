//! Place an order.

use anyhow::{bail, Result};
use dialoguer::Input;
use storefront_commerce::checkout::CustomerInfo;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    if store.cart().is_empty() {
        bail!("Your cart is empty");
    }

    let customer = CustomerInfo::new(
        field(args.name, "Full name", ctx)?,
        field(args.email, "Email", ctx)?,
        field(args.address, "Shipping address", ctx)?,
    );

    let order = store.checkout(customer)?;
    ctx.warn_if_unsaved(&store);

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success("Order placed successfully!");
    ctx.output.kv("Order ID", order.id.as_str());
    ctx.output.kv("Total", &order.total.display());
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Estimated delivery", &order.estimated_delivery.label());
    ctx.output.kv("Delivery by", &order.delivery_date.format("%-d %b %Y").to_string());
    Ok(())
}

/// Use the flag value, or ask for it when running interactively.
fn field(value: Option<String>, prompt: &str, ctx: &Context) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if ctx.output.is_json() => bail!("{} is required", prompt),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
