//! Randomized operation sequences over the cart store.
//!
//! After every mutation the store must satisfy its structural invariants
//! and the persisted record must mirror the in-memory state exactly.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wicker_cart::{CartPersister, CartState, CartStore, MemoryPersister, persist::keys};
use wicker_core::ProductId;
use wicker_integration_tests::{assert_cart_invariants, payload};

const OPS_PER_RUN: usize = 400;
const RUNS: u64 = 8;

#[test]
fn randomized_sequences_hold_invariants() {
    let ids = ["A", "B", "C", "D"];
    let sizes = [None, Some("S"), Some("M"), Some("L")];

    for seed in 0..RUNS {
        let mut rng = StdRng::seed_from_u64(seed);
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());

        for step in 0..OPS_PER_RUN {
            let id = ids[rng.random_range(0..ids.len())];
            let size = sizes[rng.random_range(0..sizes.len())];

            match rng.random_range(0..10u8) {
                0..=4 => {
                    let price = rng.random_range(1..500);
                    let discount = rng.random_range(0..=90);
                    cart.add_item(payload(id, price, discount), size);
                }
                5 | 6 => {
                    let quantity = rng.random_range(-2..8);
                    cart.update_quantity(&ProductId::new(id), quantity, size);
                }
                7 | 8 => cart.remove_item(&ProductId::new(id), size),
                _ => cart.clear(),
            }

            assert_cart_invariants(cart.state());

            // Write-through: storage mirrors memory after every operation.
            match persister.get(keys::CART).unwrap() {
                Some(raw) => {
                    let persisted: CartState = serde_json::from_str(&raw).unwrap();
                    assert_eq!(&persisted, cart.state(), "seed {seed} step {step}");
                }
                None => assert!(
                    cart.is_empty(),
                    "seed {seed} step {step}: record missing while cart has lines"
                ),
            }

            // Periodically simulate a restart mid-sequence.
            if step % 100 == 99 {
                let before = cart.state().clone();
                cart = CartStore::load(persister.clone());
                assert_eq!(cart.state(), &before);
            }
        }
    }
}
