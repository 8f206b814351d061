//! Storefront CLI - catalog, cart and orders from the command line.
//!
//! Commands:
//! - `storefront products` - Browse and manage the catalog
//! - `storefront cart` - Inspect and change the cart
//! - `storefront checkout` - Place an order for the cart
//! - `storefront orders` - List orders and mark them delivered
//! - `storefront stats` - Vendor dashboard numbers
//! - `storefront login` / `logout` / `whoami` - Switch panels
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, LoginArgs, OrdersArgs, ProductsArgs};

/// Storefront CLI - Manage a local storefront
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage products
    Products(ProductsArgs),

    /// Inspect and change the cart
    Cart(CartArgs),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// List and update orders
    Orders(OrdersArgs),

    /// Show vendor statistics
    Stats,

    /// Switch to a role
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.log, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Orders(args) => commands::orders::run(args, &ctx),
        Commands::Stats => commands::orders::stats(&ctx),
        Commands::Login(args) => commands::session::login(args, &ctx),
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami => commands::session::whoami(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
