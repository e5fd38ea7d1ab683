//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use rust_decimal::Decimal;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("storage_dir", &ctx.config.cart.storage_dir);
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key);
    ctx.output.kv("identity", ctx.config.cart.identity.as_str());

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output
        .kv("shipping_flat", &ctx.config.pricing.shipping_flat.to_string());
    ctx.output.kv("tax_rate", &ctx.config.pricing.tax_rate.to_string());
    ctx.output.kv("currency", ctx.config.pricing.currency.code());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("boutique.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.pricing.totals(None, None) {
        errors.push(format!("{:#}", e));
    }

    if config.cart.storage_key.trim().is_empty() {
        errors.push("cart.storage_key must not be empty".to_string());
    }

    if config.cart.storage_dir.trim().is_empty() {
        errors.push("cart.storage_dir must not be empty".to_string());
    }

    if config.pricing.shipping_flat.is_zero() {
        warnings.push("pricing.shipping_flat is 0; checkout will not charge shipping".to_string());
    }

    if config.pricing.tax_rate > Decimal::new(5, 1) {
        warnings.push(format!(
            "pricing.tax_rate {} is unusually high; it is a fraction, not a percentage",
            config.pricing.tax_rate
        ));
    }

    if !config.catalog.path.ends_with(".json") {
        warnings.push(format!(
            "catalog.path '{}' does not look like a JSON document",
            config.catalog.path
        ));
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let config = CliConfig::parse("boutique.toml", &generate_default_config()).unwrap();
        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_negative_shipping_is_an_error() {
        let config =
            CliConfig::parse("boutique.toml", "[pricing]\nshipping_flat = -1\n").unwrap();
        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_percentage_tax_rate_warns() {
        let config = CliConfig::parse(
            "boutique.toml",
            "[pricing]\nshipping_flat = 10\ntax_rate = 0.75\n",
        )
        .unwrap();
        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
