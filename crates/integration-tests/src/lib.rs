//! Integration tests for Wicker.
//!
//! # Test Categories
//!
//! - `cart_scenario` - End-to-end cart flows over the file-backed persister
//! - `cart_properties` - Randomized operation sequences checking the store's
//!   invariants after every mutation
//!
//! This crate also provides the small helpers the tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;

use rust_decimal::Decimal;

use wicker_cart::CartState;
use wicker_core::ProductPayload;

/// Build a catalog payload from the fields the cart interprets.
#[must_use]
pub fn payload(id: &str, price: i64, discount: i64) -> ProductPayload {
    ProductPayload::new(id, Decimal::from(price)).with_discount(Decimal::from(discount))
}

/// Assert the store's structural invariants on a cart record.
///
/// - the persisted total equals the recomputed sum over the lines
/// - no two lines share a (product id, selected size) key
/// - every line has at least one unit
///
/// # Panics
///
/// Panics when any invariant is violated.
pub fn assert_cart_invariants(state: &CartState) {
    assert_eq!(
        state.total_amount,
        state.computed_total(),
        "total drifted from items"
    );

    let mut keys = HashSet::new();
    for line in &state.items {
        assert!(
            keys.insert((line.product_id.clone(), line.selected_size.clone())),
            "duplicate composite key: {} / {:?}",
            line.product_id,
            line.selected_size
        );
        assert!(line.quantity >= 1, "line with zero quantity survived");
    }
}
