//! Wicker Core - Shared types library.
//!
//! This crate provides common types used across all Wicker components:
//! - `cart` - Cart store and its persistence surface
//! - `cli` - Command-line tools for inspecting and mutating a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, the product input contract, line items, and
//!   the order submission contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
