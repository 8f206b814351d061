//! Order history, vendor order list and stats.

use anyhow::{bail, Context as _, Result};
use chrono::Local;
use storefront_commerce::checkout::Order;
use storefront_commerce::ledger::StatusUpdate;
use storefront_commerce::OrderId;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the orders command.
pub fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(OrdersCommand::List { vendor: false }) {
        OrdersCommand::List { vendor } => list_orders(vendor, ctx),
        OrdersCommand::Show { id } => show_order(&OrderId::new(id), ctx),
        OrdersCommand::Deliver { id } => deliver_order(&OrderId::new(id), ctx),
    }
}

fn list_orders(vendor: bool, ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let orders = if vendor {
        store.vendor_orders()
    } else {
        store.orders()
    };

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    let title = if vendor { "Vendor Orders" } else { "My Orders" };
    ctx.output.header(&format!("{} ({})", title, orders.len()));
    if orders.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }

    let widths = [20, 18, 20, 6, 14, 10];
    ctx.output.table_row(&["ORDER", "PLACED", "CUSTOMER", "ITEMS", "TOTAL", "STATUS"], &widths);
    for order in orders {
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &placed_at(order),
                &truncate(&order.customer.name, 20),
                &order.item_count().to_string(),
                &order.total.display(),
                &status_badge(order.status),
            ],
            &widths,
        );
    }
    Ok(())
}

fn show_order(id: &OrderId, ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let order = store
        .order(id)
        .with_context(|| format!("Order not found: {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("Placed", &placed_at(order));
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Customer", &order.customer.one_line());
    ctx.output.kv("Estimated delivery", &order.estimated_delivery.label());
    ctx.output.kv("Delivery by", &order.delivery_date.format("%-d %b %Y").to_string());
    for line in &order.lines {
        ctx.output.list_item(&format!(
            "{} × {} @ {} = {}",
            line.title,
            line.quantity,
            line.unit_price.display(),
            line.line_total.display()
        ));
    }
    ctx.output.kv("Total", &order.total.display());
    Ok(())
}

fn deliver_order(id: &OrderId, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let update = store.mark_delivered(id);
    ctx.warn_if_unsaved(&store);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": id,
            "changed": update == StatusUpdate::Changed,
        }));
        return Ok(());
    }

    match update {
        StatusUpdate::Changed => ctx.output.success(&format!("Order {} marked as delivered", id)),
        StatusUpdate::Unchanged => ctx.output.info(&format!("Order {} is already delivered", id)),
        StatusUpdate::NotFound => bail!("Order not found: {}", id),
    }
    Ok(())
}

/// Show vendor statistics.
pub fn stats(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let stats = store.vendor_stats()?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Vendor Dashboard");
    ctx.output.kv("Total products", &stats.total_products.to_string());
    ctx.output.kv("Total orders", &stats.total_orders.to_string());
    ctx.output.kv("Total sales", &stats.total_sales.display());
    Ok(())
}

fn placed_at(order: &Order) -> String {
    order
        .placed_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
