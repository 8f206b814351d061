//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::checkout::DeliveryPolicy;
use storefront_commerce::{Currency, StorefrontConfig};

/// File names searched for, in order of preference.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storage and catalog settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Settings for opening the storefront.
    pub fn storefront_config(&self) -> Result<StorefrontConfig> {
        let currency = Currency::from_code(&self.store.currency)
            .with_context(|| format!("Unsupported currency: {}", self.store.currency))?;

        if self.checkout.min_delivery_days > self.checkout.max_delivery_days {
            bail!(
                "checkout.min_delivery_days ({}) is greater than checkout.max_delivery_days ({})",
                self.checkout.min_delivery_days,
                self.checkout.max_delivery_days
            );
        }
        if self.checkout.max_delivery_days > DeliveryPolicy::MAX_DAYS {
            bail!(
                "checkout.max_delivery_days ({}) exceeds the limit of {} days",
                self.checkout.max_delivery_days,
                DeliveryPolicy::MAX_DAYS
            );
        }

        Ok(StorefrontConfig {
            currency,
            seed_catalog: self.store.seed_catalog,
            delivery: DeliveryPolicy::new(
                self.checkout.min_delivery_days,
                self.checkout.max_delivery_days,
            ),
        })
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the store files, relative to the config file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Currency code for new prices (default: INR).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Start from the demo catalog when the store is empty.
    #[serde(default = "default_true")]
    pub seed_catalog: bool,
}

fn default_data_dir() -> String {
    ".storefront".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            currency: default_currency(),
            seed_catalog: true,
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_min_days")]
    pub min_delivery_days: u32,

    #[serde(default = "default_max_days")]
    pub max_delivery_days: u32,
}

fn default_min_days() -> u32 {
    4
}

fn default_max_days() -> u32 {
    6
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            min_delivery_days: default_min_days(),
            max_delivery_days: default_max_days(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `warn` or `storefront_commerce=debug`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Human,
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
# Where catalog, cart and orders are kept, relative to this file.
data_dir = ".storefront"
currency = "INR"
# Start from the demo catalog when no products are stored.
seed_catalog = true

[checkout]
min_delivery_days = 4
max_delivery_days = 6

[log]
# Overridden by RUST_LOG.
level = "warn"
# "human" or "json"
format = "human"
"#
    .to_string()
}
