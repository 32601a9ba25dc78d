//! Core types for Wicker.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod order;
pub mod product;

pub use cart::LineItem;
pub use id::*;
pub use order::{OrderDraft, OrderError, OrderGateway, OrderReceipt, ShippingAddress};
pub use product::{ProductPayload, ProductPayloadError};
