//! Catalog browsing commands.

use anyhow::{bail, Result};
use boutique_commerce::catalog::{Catalog, ROTATION_INTERVAL};
use boutique_commerce::Money;
use serde_json::json;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.path.as_deref()).await?;
    ctx.output.debug(&format!(
        "Loaded {} product(s) in {} section(s)",
        catalog.product_count(),
        catalog.section_names().count()
    ));

    match args.command {
        CatalogCommand::List { section } => list(&catalog, section.as_deref(), ctx),
        CatalogCommand::Carousel { steps, live } => carousel(&catalog, steps, live, ctx).await,
    }
}

fn list(catalog: &Catalog, section: Option<&str>, ctx: &Context) -> Result<()> {
    let names: Vec<&str> = match section {
        Some(name) => {
            if catalog.section(name).is_none() {
                bail!("Unknown catalog section: {}", name);
            }
            vec![name]
        }
        None => catalog.section_names().collect(),
    };

    if ctx.output.is_json() {
        let sections: Vec<_> = names
            .iter()
            .map(|name| {
                let products = catalog.section(name).unwrap_or_default();
                json!({ "section": name, "products": products })
            })
            .collect();
        ctx.output.json(&sections);
        return Ok(());
    }

    let currency = ctx.config.pricing.currency;
    let widths = [8, 28, 14];
    for name in names {
        ctx.output.header(name);
        for product in catalog.section(name).unwrap_or_default() {
            let price = Money::new(product.price, currency).rounded().display();
            ctx.output
                .table_row(&[product.id.as_str(), &product.name, &price], &widths);
        }
    }

    Ok(())
}

async fn carousel(catalog: &Catalog, steps: usize, live: bool, ctx: &Context) -> Result<()> {
    let mut carousel = catalog.carousel();

    if !carousel.rotates() {
        ctx.output.info("Catalog has no carousel images");
        return Ok(());
    }

    let mut shown = Vec::with_capacity(steps + 1);
    shown.extend(carousel.active().map(str::to_string));
    print_slide(carousel.active_index(), carousel.active(), ctx);

    for _ in 0..steps {
        if live {
            tokio::time::sleep(ROTATION_INTERVAL).await;
        }
        carousel.next();
        shown.extend(carousel.active().map(str::to_string));
        print_slide(carousel.active_index(), carousel.active(), ctx);
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "slides": carousel.len(),
            "interval_ms": ROTATION_INTERVAL.as_millis() as u64,
            "shown": shown,
        }));
    }

    Ok(())
}

fn print_slide(index: usize, image: Option<&str>, ctx: &Context) {
    if let Some(image) = image {
        ctx.output.list_item(&format!("[{}] {}", index, image));
    }
}
