//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &ctx.config.store.data_dir);
    ctx.output.kv("resolved data_dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("currency", &ctx.config.store.currency);
    ctx.output.kv("seed_catalog", &ctx.config.store.seed_catalog.to_string());

    ctx.output.info("[checkout]");
    ctx.output.kv("min_delivery_days", &ctx.config.checkout.min_delivery_days.to_string());
    ctx.output.kv("max_delivery_days", &ctx.config.checkout.max_delivery_days.to_string());

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());

    // Surface settings the storefront would reject.
    if let Err(e) = ctx.config.storefront_config() {
        ctx.output.warn(&format!("{:#}", e));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}
