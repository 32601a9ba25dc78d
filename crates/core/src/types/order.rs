//! Order submission contract.
//!
//! The cart hands a finished draft to an [`OrderGateway`]; transport,
//! authentication, and retries live in the host's gateway implementation.
//! Field names serialize in camelCase to match the order API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cart::LineItem;
use super::id::OrderId;

/// Destination address for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient name.
    pub name: String,
    /// Street address.
    pub line1: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country name or code, as collected from the customer.
    pub country: String,
}

/// The payload submitted to the order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Cart lines at the time of checkout.
    pub items: Vec<LineItem>,
    /// Cart total at the time of checkout.
    pub total_amount: Decimal,
    /// Payment method label, passed through unchanged.
    pub payment_method: String,
    /// Where to ship.
    pub shipping_address: ShippingAddress,
}

/// The created order record returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Gateway-assigned order id.
    pub id: OrderId,
    /// Total the order was placed with.
    pub total_amount: Decimal,
    /// When the order was accepted.
    pub placed_at: DateTime<Utc>,
}

/// Errors surfaced by an order gateway.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The session is no longer valid; the caller should invalidate it and
    /// send the customer back through sign-in.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other submission failure, surfaced to the UI layer.
    #[error("order gateway error: {0}")]
    Gateway(String),
}

/// Order submission collaborator.
///
/// Implementations own the HTTP client, credentials, and error mapping;
/// the cart only sees this trait.
pub trait OrderGateway {
    /// Submit a draft, returning the created order record.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Unauthorized`] when the customer session has
    /// expired, or [`OrderError::Gateway`] for any other failure.
    fn submit(&self, draft: OrderDraft) -> Result<OrderReceipt, OrderError>;
}
