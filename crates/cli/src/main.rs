//! Wicker CLI - cart inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product (creates the cart on first use)
//! wicker-cli add -i prod-123 -p 19.99 -d 10 -s M
//!
//! # Set a line's quantity (0 removes the line)
//! wicker-cli update-qty -i prod-123 -q 3 -s M
//!
//! # Remove a line
//! wicker-cli remove -i prod-123 -s M
//!
//! # Print the cart
//! wicker-cli show
//!
//! # Empty the cart and delete the persisted record
//! wicker-cli clear
//! ```
//!
//! The cart record lives under a directory resolved from `--cart-dir`, the
//! `WICKER_CART_DIR` environment variable, or `./.wicker`, in that order.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "wicker-cli")]
#[command(author, version, about = "Wicker cart management tools")]
struct Cli {
    /// Directory holding the persisted cart record
    #[arg(long, global = true)]
    cart_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        #[arg(short, long)]
        id: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Discount percentage
        #[arg(short, long, default_value = "0")]
        discount: Decimal,

        /// Selected size
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove the line matching a product id and optional size
    Remove {
        /// Product id
        #[arg(short, long)]
        id: String,

        /// Selected size
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Set the quantity of a line (0 removes it)
    UpdateQty {
        /// Product id
        #[arg(short, long)]
        id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: i64,

        /// Selected size
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Print the cart
    Show,
    /// Empty the cart and delete the persisted record
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = commands::cart::open(cli.cart_dir)?;

    match cli.command {
        Commands::Add {
            id,
            price,
            discount,
            size,
        } => commands::cart::add(&mut store, id, price, discount, size.as_deref()),
        Commands::Remove { id, size } => commands::cart::remove(&mut store, &id, size.as_deref()),
        Commands::UpdateQty { id, quantity, size } => {
            commands::cart::update_qty(&mut store, &id, quantity, size.as_deref());
        }
        Commands::Show => commands::cart::show(&store),
        Commands::Clear => commands::cart::clear(&mut store),
    }

    Ok(())
}
