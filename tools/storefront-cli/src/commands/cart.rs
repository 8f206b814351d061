//! Cart commands.

use anyhow::Result;
use storefront_commerce::{ProductId, Storefront};
use storefront_kv::FileStore;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let result = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&store, ctx),
        CartCommand::Add { id, qty } => {
            let quantity = store.add_to_cart(id, qty)?;
            let title = product_title(&store, id);
            ctx.output.success(&format!("Added {} to cart ({} in cart)", title, quantity));
            show_cart(&store, ctx)
        }
        CartCommand::Set { id, qty } => {
            store.set_cart_quantity(id, qty)?;
            if qty <= 0 {
                ctx.output.success(&format!("Removed {} from cart", product_title(&store, id)));
            } else {
                ctx.output.success(&format!("Set {} to {}", product_title(&store, id), qty));
            }
            show_cart(&store, ctx)
        }
        CartCommand::Remove { id } => {
            if store.remove_from_cart(id) {
                ctx.output.success(&format!("Removed {} from cart", product_title(&store, id)));
            } else {
                ctx.output.info(&format!("Product {} was not in the cart", id));
            }
            show_cart(&store, ctx)
        }
        CartCommand::Clear => {
            store.clear_cart();
            ctx.output.success("Cart cleared");
            show_cart(&store, ctx)
        }
    };
    ctx.warn_if_unsaved(&store);
    result
}

fn product_title(store: &Storefront<FileStore>, id: ProductId) -> String {
    store
        .product(id)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("product {}", id))
}

fn show_cart(store: &Storefront<FileStore>, ctx: &Context) -> Result<()> {
    let pricing = store.cart_pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&pricing);
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", pricing.item_count()));
    if pricing.lines.is_empty() {
        ctx.output.info("Your cart is empty");
    } else {
        let widths = [5, 32, 12, 5, 14];
        ctx.output.table_row(&["ID", "TITLE", "PRICE", "QTY", "TOTAL"], &widths);
        for line in &pricing.lines {
            ctx.output.table_row(
                &[
                    &line.product_id.to_string(),
                    &line.title,
                    &line.unit_price.display(),
                    &line.quantity.to_string(),
                    &line.line_total.display(),
                ],
                &widths,
            );
        }
        ctx.output.kv("Total", &pricing.total.display());
    }

    for line in pricing.lines.iter().filter(|l| l.is_over_stock()) {
        ctx.output.warn(&format!(
            "{} has only {} in stock; lower the quantity before checkout",
            line.title, line.stock
        ));
    }
    if !pricing.dangling.is_empty() {
        ctx.output.warn(&format!(
            "{} cart line(s) refer to deleted products and are ignored",
            pricing.dangling.len()
        ));
    }

    Ok(())
}
