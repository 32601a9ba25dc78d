//! Wicker Cart - the cart store and its persistence surface.
//!
//! The store owns an ordered collection of line items and a derived total,
//! writes the whole state through to a key-value surface after every
//! mutation, and rehydrates from that surface at construction. See
//! [`store::CartStore`] for the operations and [`persist::CartPersister`]
//! for the storage contract.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod persist;
pub mod store;

pub use persist::{CartPersister, FilePersister, MemoryPersister};
pub use store::{CartState, CartStore};
