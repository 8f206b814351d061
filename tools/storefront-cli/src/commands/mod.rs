//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;
pub mod session;

use clap::{Args, Subcommand};
use storefront_commerce::search::SortOption;
use storefront_commerce::session::Role;
use storefront_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products.
    List {
        /// Only products whose title or description contains this text.
        #[arg(short, long)]
        search: Option<String>,

        /// Only products in this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order: featured, name, price-low, price-high.
        #[arg(long, default_value = "featured")]
        sort: SortOption,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: ProductId,
    },
    /// Add a product.
    Add(AddProductArgs),
    /// Edit a product.
    Edit {
        /// Product ID.
        id: ProductId,

        #[command(flatten)]
        fields: EditProductArgs,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: ProductId,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Import products from a JSON file (`-` for stdin).
    Import {
        /// Path to a JSON array of products.
        file: String,
    },
    /// Import the built-in sample products.
    Sample,
    /// List categories.
    Categories,
}

/// Fields for a new product.
#[derive(Args)]
pub struct AddProductArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    /// Unit price in major units, e.g. 499.99.
    #[arg(long)]
    pub price: f64,

    #[arg(long)]
    pub category: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub stock: i64,

    #[arg(long)]
    pub vendor: Option<String>,
}

/// Fields to change on an existing product.
#[derive(Args)]
pub struct EditProductArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<i64>,

    #[arg(long)]
    pub vendor: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: ProductId,

        /// Quantity to add.
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        qty: i64,
    },
    /// Set a line's quantity (0 removes it).
    Set {
        /// Product ID.
        id: ProductId,

        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        qty: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name (prompted if missing).
    #[arg(long)]
    pub name: Option<String>,

    /// Customer email (prompted if missing).
    #[arg(long)]
    pub email: Option<String>,

    /// Shipping address (prompted if missing).
    #[arg(long)]
    pub address: Option<String>,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders, newest first.
    List {
        /// Show the vendor order list instead of order history.
        #[arg(long)]
        vendor: bool,
    },
    /// Show one order.
    Show {
        /// Order ID.
        id: String,
    },
    /// Mark an order delivered.
    Deliver {
        /// Order ID.
        id: String,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Role: user, vendor or admin.
    pub role: Role,

    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
