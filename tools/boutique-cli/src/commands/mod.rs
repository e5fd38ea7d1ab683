//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod totals;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add {
        /// Product name.
        #[arg(short, long)]
        name: String,

        /// Unit price.
        #[arg(short, long, allow_hyphen_values = true)]
        price: Decimal,

        /// Product id (generated when omitted).
        #[arg(long)]
        id: Option<String>,

        /// Image reference.
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Add one unit of a catalog product by id.
    AddProduct {
        /// Catalog product id.
        id: String,

        /// Catalog path (overrides config).
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Adjust a line's quantity by a signed delta.
    Qty {
        /// Product id or name.
        key: String,

        /// Signed change, e.g. 2 or -1.
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Set a line's quantity.
    Set {
        /// Product id or name.
        key: String,

        /// New quantity; zero or below removes the line.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Product id or name.
        key: String,
    },
    /// Show the cart contents.
    Show,
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the totals command.
#[derive(Args)]
pub struct TotalsArgs {
    /// Flat shipping fee (overrides config).
    #[arg(long)]
    pub shipping: Option<Decimal>,

    /// Tax rate as a fraction (overrides config).
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,

    /// Catalog path (overrides config).
    #[arg(long, global = true)]
    pub path: Option<String>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List catalog products.
    List {
        /// Only list this section.
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Step through the carousel slides.
    Carousel {
        /// Number of rotations to show.
        #[arg(long, default_value = "0")]
        steps: usize,

        /// Wait the rotation interval between steps.
        #[arg(long)]
        live: bool,
    },
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
    /// Validate the config file.
    Validate,
}
