//! Checkout totals command.

use anyhow::{Context as _, Result};
use boutique_commerce::cart::CartTotals;
use boutique_commerce::Money;
use serde_json::json;

use super::TotalsArgs;
use crate::context::Context;
use crate::output::decimal_json;

/// Run the totals command.
pub async fn run(args: TotalsArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config.pricing.totals(args.shipping, args.tax_rate)?;
    let store = ctx.open_cart()?;
    ctx.output.debug(&format!(
        "Shipping {} / tax rate {}",
        config.shipping_flat(),
        config.tax_rate()
    ));

    let totals = store
        .compute_totals(&config)
        .context("Cart totals are too large to compute")?
        .rounded();

    if ctx.output.is_json() {
        ctx.output.json(&totals_json(&totals));
        return Ok(());
    }

    ctx.output.header("Order Summary");

    if totals.is_empty() {
        ctx.output.info("Your cart is empty");
    }
    for line in totals.summary_lines() {
        ctx.output.list_item(&line);
    }

    println!();
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping.display());
    if !totals.tax.is_zero() {
        ctx.output.kv("Tax", &totals.tax.display());
    }
    ctx.output.kv("Total", &totals.grand_total.display());

    Ok(())
}

fn money_json(money: &Money) -> serde_json::Value {
    decimal_json(money.amount)
}

fn totals_json(totals: &CartTotals) -> serde_json::Value {
    let lines: Vec<_> = totals
        .lines
        .iter()
        .map(|line| {
            json!({
                "key": line.key.to_string(),
                "name": line.name,
                "quantity": line.quantity,
                "unit_price": money_json(&line.unit_price),
                "total": money_json(&line.total),
            })
        })
        .collect();

    json!({
        "currency": totals.subtotal.currency.code(),
        "lines": lines,
        "subtotal": money_json(&totals.subtotal),
        "shipping": money_json(&totals.shipping),
        "tax": money_json(&totals.tax),
        "grand_total": money_json(&totals.grand_total),
    })
}
