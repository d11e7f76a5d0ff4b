//! GoMarketplace CLI - Inspect and edit the locally stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli cart list
//!
//! # Add a product
//! gm-cli cart add --id p1 --title "Shirt" --image-url https://example.com/shirt.png --price 10
//!
//! # Change quantities
//! gm-cli cart increment p1
//! gm-cli cart decrement p1
//!
//! # Drop a line or everything
//! gm-cli cart remove p1
//! gm-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `cart` - List and mutate the stored cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use go_marketplace_core::{NewProduct, Price, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::Mutation;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and subtotal
    List,
    /// Add a product, or increment it if already in the cart
    Add {
        /// Product identifier
        #[arg(long)]
        id: ProductId,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Price,
    },
    /// Increase a product's quantity by one
    Increment {
        /// Product identifier
        id: ProductId,
    },
    /// Decrease a product's quantity by one, removing it at zero
    Decrement {
        /// Product identifier
        id: ProductId,
    },
    /// Remove a product regardless of quantity
    Remove {
        /// Product identifier
        id: ProductId,
    },
    /// Remove everything from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gm_cli=info,go_marketplace_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
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
            CartAction::List => commands::cart::list().await?,
            CartAction::Add {
                id,
                title,
                image_url,
                price,
            } => {
                let candidate = NewProduct {
                    id,
                    title,
                    image_url,
                    price,
                };
                commands::cart::mutate(Mutation::Add(candidate)).await?;
            }
            CartAction::Increment { id } => {
                commands::cart::mutate(Mutation::Increment(id)).await?;
            }
            CartAction::Decrement { id } => {
                commands::cart::mutate(Mutation::Decrement(id)).await?;
            }
            CartAction::Remove { id } => commands::cart::mutate(Mutation::Remove(id)).await?,
            CartAction::Clear => commands::cart::mutate(Mutation::Clear).await?,
        },
    }
    Ok(())
}
