//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use medimart_commerce::cart::PricingPolicy;
use medimart_commerce::listing::ListingQuery;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tax, shipping and currency rules.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Where the cart and order slots live.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items per page when `--per-page` is not given.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Catalog JSON file used when `--catalog` is not given.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
}

fn default_page_size() -> usize {
    ListingQuery::DEFAULT_PAGE_SIZE
}

fn default_catalog() -> PathBuf {
    PathBuf::from("medicines.json")
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            catalog: default_catalog(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Slot holding the cart.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Slot holding the last order confirmation.
    #[serde(default = "default_order_key")]
    pub order_key: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".medimart")
}

fn default_cart_key() -> String {
    "cart".to_string()
}

fn default_order_key() -> String {
    "last-order".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cart_key: default_cart_key(),
            order_key: default_order_key(),
        }
    }
}

/// Generate a default medimart.toml config file.
pub fn generate_default_config() -> String {
    r#"# MediMart storefront configuration

[pricing]
tax_rate = 0.08
free_shipping_threshold = 50.0
flat_shipping_fee = 5.99
# Charge the flat fee even when the cart is empty.
charge_shipping_on_empty = false
currency = "USD"

[listing]
page_size = 10
catalog = "medicines.json"

[storage]
data_dir = ".medimart"
cart_key = "cart"
order_key = "last-order"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.pricing, PricingPolicy::default());
        assert_eq!(config.listing.page_size, 10);
        assert_eq!(config.storage.cart_key, "cart");
    }

    #[test]
    fn test_missing_sections_default() {
        let config: CliConfig = toml::from_str("[pricing]\ntax_rate = 0.05\n").unwrap();
        assert_eq!(config.pricing.tax_rate, Decimal::new(5, 2));
        assert_eq!(config.pricing.flat_shipping_fee, Decimal::new(599, 2));
        assert_eq!(config.storage.order_key, "last-order");
    }
}
