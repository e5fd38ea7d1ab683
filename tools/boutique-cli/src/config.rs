//! CLI configuration.

use anyhow::{Context, Result};
use boutique_commerce::cart::{CartOptions, TotalsConfig, CART_STORAGE_KEY};
use boutique_commerce::{Currency, IdentityStrategy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage and identity.
    #[serde(default)]
    pub cart: CartConfig,

    /// Shipping, tax and currency.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; `path` decides between JSON and TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Cart store options derived from this config.
    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            strategy: self.cart.identity,
            currency: self.pricing.currency,
            storage_key: self.cart.storage_key.clone(),
        }
    }
}

/// Cart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory for the file-backed cart store.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// How repeated adds are merged.
    #[serde(default)]
    pub identity: IdentityStrategy,
}

fn default_storage_dir() -> String {
    ".boutique".to_string()
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
            identity: IdentityStrategy::default(),
        }
    }
}

/// Pricing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat shipping fee.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub shipping_flat: Decimal,

    /// Tax rate as a fraction in [0, 1].
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
}

impl PricingConfig {
    /// Validated totals configuration, with optional per-run overrides.
    pub fn totals(
        &self,
        shipping_override: Option<Decimal>,
        tax_override: Option<Decimal>,
    ) -> Result<TotalsConfig> {
        let shipping = shipping_override.unwrap_or(self.shipping_flat);
        let tax = tax_override.unwrap_or(self.tax_rate);
        TotalsConfig::new(shipping, tax).context("Invalid pricing configuration")
    }
}

/// Catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog document.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "products.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Generate a default boutique.toml config file.
pub fn generate_default_config() -> String {
    r#"# Boutique storefront configuration

[cart]
storage_dir = ".boutique"
storage_key = "cart"
# "product-id" merges by product id, "name" by normalized product name
identity = "product-id"

[pricing]
shipping_flat = 10
tax_rate = 0
currency = "GHS"

[catalog]
path = "products.json"
"#
    .to_string()
}
