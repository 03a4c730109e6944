//! Fake Store CLI - inspect and edit visitor carts, query the catalog.
//!
//! # Usage
//!
//! ```bash
//! # Show a visitor's persisted cart
//! fs-cli cart show --visitor 67e55044-10b1-426f-9247-bb680e5fe0c8
//!
//! # Add a product with options
//! fs-cli cart add --visitor <uuid> --product 1 --option size=M --option color=Red
//!
//! # Remove one unit / empty the cart
//! fs-cli cart remove --visitor <uuid> --product 1 --option size=M --option color=Red
//! fs-cli cart clear --visitor <uuid>
//!
//! # Catalog
//! fs-cli catalog categories
//! fs-cli catalog products --category jewelery
//! fs-cli catalog product 5
//! ```
//!
//! Carts are read from `<data-dir>/visitors/<uuid>/cart.json`, the same
//! slots the storefront writes. A running storefront keeps its own copy of
//! an active cart and writes it back on that visitor's next change, which
//! replaces any edit made here. Edit carts while the storefront is stopped,
//! or only for visitors idle for more than 30 minutes.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fakestore_storefront::models::VisitorId;

mod commands;

#[derive(Parser)]
#[command(name = "fs-cli")]
#[command(author, version, about = "Fake Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or modify a visitor's persisted cart
    ///
    /// Edits write the cart file directly. A running storefront that has
    /// this visitor's cart open overwrites the file on the visitor's next
    /// change, so stop the storefront first or only edit carts idle for more
    /// than 30 minutes.
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Query the upstream catalog (uses `FAKESTORE_API_URL`)
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

/// Arguments shared by every cart action.
#[derive(clap::Args)]
struct CartTarget {
    /// Visitor id (the `fs_visitor` cookie value)
    #[arg(short, long)]
    visitor: VisitorId,

    /// Storefront data directory
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart's lines and total
    Show {
        #[command(flatten)]
        target: CartTarget,
    },
    /// Add one unit of a product
    Add {
        #[command(flatten)]
        target: CartTarget,

        /// Product id
        #[arg(short, long)]
        product: String,

        /// Option as `name=value` (repeatable)
        #[arg(short, long = "option", value_parser = commands::parse_option)]
        options: Vec<(String, String)>,
    },
    /// Remove one unit of a cart line
    Remove {
        #[command(flatten)]
        target: CartTarget,

        /// Product id
        #[arg(short, long)]
        product: String,

        /// Option as `name=value` (repeatable)
        #[arg(short, long = "option", value_parser = commands::parse_option)]
        options: Vec<(String, String)>,
    },
    /// Remove every line
    Clear {
        #[command(flatten)]
        target: CartTarget,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List category names
    Categories,
    /// List products, optionally in one category
    Products {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product and its option groups
    Product {
        /// Product id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing; command output goes through it at info level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { target } => {
                commands::cart::show(&target.data_dir, &target.visitor);
            }
            CartAction::Add {
                target,
                product,
                options,
            } => {
                commands::cart::add(&target.data_dir, &target.visitor, &product, &options).await?;
            }
            CartAction::Remove {
                target,
                product,
                options,
            } => {
                commands::cart::remove(&target.data_dir, &target.visitor, &product, &options);
            }
            CartAction::Clear { target } => {
                commands::cart::clear(&target.data_dir, &target.visitor);
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories().await?,
            CatalogAction::Products { category } => {
                commands::catalog::products(category.as_deref()).await?;
            }
            CatalogAction::Product { id } => commands::catalog::product(&id).await?,
        },
    }
    Ok(())
}
