//! Cart manipulation commands.
//!
//! All commands operate on a file-backed cart record. The directory is
//! resolved from the `--cart-dir` flag, the `WICKER_CART_DIR` environment
//! variable, or `./.wicker`, in that order.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use wicker_cart::{CartStore, FilePersister};
use wicker_core::{ProductId, ProductPayload};

/// Environment variable overriding the cart directory.
const CART_DIR_ENV: &str = "WICKER_CART_DIR";

/// Fallback cart directory, relative to the working directory.
const DEFAULT_CART_DIR: &str = ".wicker";

/// Errors that can occur while opening the cart.
#[derive(Debug, Error)]
pub enum CartCliError {
    /// The cart directory could not be created or opened.
    #[error("cannot open cart directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Open (or create) the file-backed cart store.
///
/// # Errors
///
/// Returns [`CartCliError::Io`] if the cart directory cannot be created.
pub fn open(dir: Option<PathBuf>) -> Result<CartStore<FilePersister>, CartCliError> {
    let dir = dir
        .or_else(|| std::env::var_os(CART_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CART_DIR));

    let persister = FilePersister::open(dir)?;
    Ok(CartStore::load(persister))
}

/// Add one unit of a product.
pub fn add(
    store: &mut CartStore<FilePersister>,
    id: String,
    price: Decimal,
    discount: Decimal,
    size: Option<&str>,
) {
    let payload = ProductPayload::new(id, price).with_discount(discount);
    store.add_item(payload, size);
    report(store);
}

/// Remove the line matching the id and optional size.
pub fn remove(store: &mut CartStore<FilePersister>, id: &str, size: Option<&str>) {
    store.remove_item(&ProductId::new(id), size);
    report(store);
}

/// Set the quantity of a line; zero or less removes it.
pub fn update_qty(
    store: &mut CartStore<FilePersister>,
    id: &str,
    quantity: i64,
    size: Option<&str>,
) {
    store.update_quantity(&ProductId::new(id), quantity, size);
    report(store);
}

fn report(store: &CartStore<FilePersister>) {
    tracing::info!(
        "Cart now holds {} line(s), total {}",
        store.items().len(),
        store.total_amount()
    );
}

/// Print the cart contents.
#[allow(clippy::print_stdout)]
pub fn show(store: &CartStore<FilePersister>) {
    if store.is_empty() {
        println!("Cart is empty");
        return;
    }

    println!(
        "{:<24} {:<8} {:>4} {:>10} {:>6} {:>12}",
        "PRODUCT", "SIZE", "QTY", "PRICE", "DISC%", "LINE TOTAL"
    );
    for line in store.items() {
        println!(
            "{:<24} {:<8} {:>4} {:>10} {:>6} {:>12}",
            line.product_id,
            line.selected_size.as_deref().unwrap_or("-"),
            line.quantity,
            line.price,
            line.discount,
            line.line_total(),
        );
    }
    println!("{:>68}", format!("TOTAL {}", store.total_amount()));
}

/// Empty the cart and delete the persisted record.
pub fn clear(store: &mut CartStore<FilePersister>) {
    store.clear();
    tracing::info!("Cart cleared");
}
