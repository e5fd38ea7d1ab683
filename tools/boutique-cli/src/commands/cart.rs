//! Cart commands.

use anyhow::{anyhow, bail, Context as _, Result};
use boutique_cache::FileStore;
use boutique_commerce::cart::{CartCandidate, CartStore, LineItem, QuantityChange};
use boutique_commerce::{IdentityKey, Money, ProductId};
use console::style;
use dialoguer::Confirm;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{decimal_json, quantity_badge};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;

    match args.command {
        CartCommand::Add {
            name,
            price,
            id,
            image,
        } => {
            let candidate = match id {
                Some(id) => CartCandidate::new(id, name, price, image),
                None => CartCandidate::unidentified(name, price, image),
            };
            add(candidate, &mut store, ctx)
        }
        CartCommand::AddProduct { id, catalog } => {
            let catalog = ctx.load_catalog(catalog.as_deref()).await?;
            let product = catalog
                .find_product(&ProductId::new(id.as_str()))
                .ok_or_else(|| anyhow!("No catalog product with id '{}'", id))?;
            add(product.to_candidate(), &mut store, ctx)
        }
        CartCommand::Qty { key, delta } => {
            let key = resolve_key(&store, &key)?;
            let change = store.set_quantity(&key, delta)?;
            report_change(&key, change, ctx);
            Ok(())
        }
        CartCommand::Set { key, quantity } => {
            let key = resolve_key(&store, &key)?;
            let change = store.set_absolute_quantity(&key, quantity)?;
            report_change(&key, change, ctx);
            Ok(())
        }
        CartCommand::Remove { key } => {
            let key = resolve_key(&store, &key)?;
            let item = store.remove_item(&key)?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "removed": item_json(&item) }));
            } else {
                ctx.output.success(&format!("Removed {}", item.name));
            }
            Ok(())
        }
        CartCommand::Show => show(&store, ctx),
        CartCommand::Clear { yes } => clear(yes, &mut store, ctx),
    }
}

fn add(candidate: CartCandidate, store: &mut CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let item = store.add_item(candidate)?;

    if ctx.output.is_json() {
        ctx.output.json(&item_json(&item));
    } else {
        ctx.output.success(&format!(
            "{} is in your cart {}",
            style(&item.name).cyan(),
            quantity_badge(item.quantity)
        ));
    }

    Ok(())
}

fn show(store: &CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let currency = store.cart().currency();

    if ctx.output.is_json() {
        let items: Vec<_> = store.items().iter().map(item_json).collect();
        ctx.output.json(&json!({
            "currency": currency.code(),
            "items": items,
            "item_count": store.cart().item_count(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if store.cart().is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [16, 24, 6, 14];
    ctx.output.table_row(&["KEY", "NAME", "QTY", "PRICE"], &widths);
    for item in store.items() {
        let price = Money::new(item.unit_price, currency).rounded().display();
        ctx.output.table_row(
            &[
                &item.key.to_string(),
                &item.name,
                &item.quantity.to_string(),
                &price,
            ],
            &widths,
        );
    }

    println!();
    ctx.output
        .kv("Items", &store.cart().item_count().to_string());

    Ok(())
}

fn clear(yes: bool, store: &mut CartStore<FileStore>, ctx: &Context) -> Result<()> {
    if store.cart().is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !yes {
        if ctx.output.is_json() {
            bail!("Refusing to clear the cart without --yes in JSON mode");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                store.cart().item_count()
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cleared": true }));
    } else {
        ctx.output.success("Cart cleared");
    }

    Ok(())
}

/// Resolve a user-typed product id or name to a line identity.
fn resolve_key(store: &CartStore<FileStore>, raw: &str) -> Result<IdentityKey> {
    store
        .cart()
        .lookup(raw)
        .map(|item| item.key.clone())
        .ok_or_else(|| anyhow!("No cart line matches '{}'", raw))
}

fn report_change(key: &IdentityKey, change: QuantityChange, ctx: &Context) {
    match change {
        QuantityChange::Updated { quantity } => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&json!({ "key": key.to_string(), "quantity": quantity }));
            } else {
                ctx.output
                    .success(&format!("{} now {}", key, quantity_badge(quantity)));
            }
        }
        QuantityChange::Removed(item) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "removed": item_json(&item) }));
            } else {
                ctx.output
                    .success(&format!("Removed {} from the cart", item.name));
            }
        }
    }
}

fn item_json(item: &LineItem) -> serde_json::Value {
    json!({
        "key": item.key.to_string(),
        "id": item.id.as_str(),
        "name": item.name,
        "price": decimal_json(item.unit_price),
        "image": item.image,
        "quantity": item.quantity,
    })
}
