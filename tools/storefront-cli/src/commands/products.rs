//! Catalog commands.

use std::io::Read;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::catalog::{Product, ProductDraft, ProductPatch};
use storefront_commerce::search::{CatalogQuery, SortOption};
use storefront_commerce::ProductId;

use super::{AddProductArgs, EditProductArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List {
            search,
            category,
            sort,
        } => list_products(search, category, sort, ctx),
        ProductsCommand::Show { id } => show_product(id, ctx),
        ProductsCommand::Add(args) => add_product(args, ctx),
        ProductsCommand::Edit { id, fields } => edit_product(id, fields, ctx),
        ProductsCommand::Delete { id, yes } => delete_product(id, yes, ctx),
        ProductsCommand::Import { file } => import_products(&file, ctx),
        ProductsCommand::Sample => import_sample(ctx),
        ProductsCommand::Categories => list_categories(ctx),
    }
}

fn list_products(
    search: Option<String>,
    category: Option<String>,
    sort: SortOption,
    ctx: &Context,
) -> Result<()> {
    let store = ctx.open_storefront()?;

    let mut query = CatalogQuery::new().with_sort(sort);
    if let Some(text) = search.filter(|t| !t.trim().is_empty()) {
        query = query.with_text(text);
    }
    if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
        query = query.with_category(category);
    }
    let products = store.list_products(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));
    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    let widths = [5, 32, 14, 16, 12];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "CATEGORY", "STOCK"], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &truncate(&product.title, 32),
                &product.price.display(),
                &truncate(&product.category, 16),
                &stock_badge(product.stock),
            ],
            &widths,
        );
    }

    Ok(())
}

fn show_product(id: ProductId, ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let product = store
        .product(id)
        .with_context(|| format!("Product not found: {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, ctx);
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("stock", &stock_badge(product.stock));
    ctx.output.kv("vendor", &product.vendor);
    ctx.output.kv("image", &product.image);
    ctx.output.kv("description", &product.description);
}

fn add_product(args: AddProductArgs, ctx: &Context) -> Result<()> {
    if args.title.trim().is_empty() {
        bail!("--title must not be empty");
    }
    if args.description.trim().is_empty() {
        bail!("--description must not be empty");
    }

    let mut store = ctx.open_storefront()?;

    let draft = ProductDraft {
        title: args.title,
        description: args.description,
        price: args.price,
        category: args.category,
        image: args.image,
        stock: args.stock,
        vendor: args.vendor,
    };
    let id = store.add_product(draft);
    ctx.warn_if_unsaved(&store);
    let product = store
        .product(id)
        .context("Product disappeared after being added")?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.success(&format!("Added product {}: {}", id, product.title));
    Ok(())
}

fn edit_product(id: ProductId, fields: EditProductArgs, ctx: &Context) -> Result<()> {
    let patch = ProductPatch {
        title: fields.title,
        description: fields.description,
        price: fields.price,
        category: fields.category,
        image: fields.image,
        stock: fields.stock,
        vendor: fields.vendor,
    };
    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one field, e.g. --price 499 or --stock 10.");
    }

    let mut store = ctx.open_storefront()?;
    if !store.update_product(id, patch) {
        bail!("Product not found: {}", id);
    }
    ctx.warn_if_unsaved(&store);

    if ctx.output.is_json() {
        ctx.output.json(&store.product(id));
        return Ok(());
    }

    ctx.output.success(&format!("Updated product {}", id));
    Ok(())
}

fn delete_product(id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let title = match store.product(id) {
        Some(product) => product.title.clone(),
        None => bail!("Product not found: {}", id),
    };

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {} ({})?", id, title))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.delete_product(id);
    ctx.warn_if_unsaved(&store);
    let in_cart = store.cart().quantity_of(id).is_some();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id, "in_cart": in_cart }));
        return Ok(());
    }

    ctx.output.success(&format!("Deleted product {} ({})", id, title));
    if in_cart {
        ctx.output.warn("The cart still lists this product; it will be skipped at checkout.");
    }
    Ok(())
}

fn import_products(file: &str, ctx: &Context) -> Result<()> {
    let text = if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read import data from stdin")?;
        text
    } else {
        let path = ctx.cwd.join(file);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read import file: {}", path.display()))?
    };

    let mut store = ctx.open_storefront()?;
    let imported = store.import_products(&text)?;
    ctx.warn_if_unsaved(&store);
    report_import(imported, ctx);
    Ok(())
}

fn import_sample(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let imported = store.import_sample();
    ctx.warn_if_unsaved(&store);
    report_import(imported, ctx);
    Ok(())
}

fn report_import(imported: usize, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "imported": imported }));
    } else if imported == 0 {
        ctx.output.warn("No products imported. Each record needs title, price and description.");
    } else {
        ctx.output.success(&format!("Successfully imported {} products", imported));
    }
}

fn list_categories(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let categories = store.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        ctx.output.list_item(category);
    }
    Ok(())
}
