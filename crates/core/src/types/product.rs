//! Product input contract for the cart.
//!
//! The catalog API supplies loosely-shaped JSON records. This module turns
//! them into an explicit value type at the boundary: an id and a price are
//! required, everything else rides along in an open attribute bag.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::id::ProductId;

/// Errors that can occur when accepting a catalog payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductPayloadError {
    /// Neither the primary nor the secondary id field was present.
    #[error("product payload carries no id field")]
    MissingId,
}

/// A product as supplied by the catalog.
///
/// Catalog records identify a product by either a primary record id (`_id`)
/// or a secondary `id` field. Deserialization normalizes whichever is
/// present into the canonical [`ProductId`], preferring the primary; a
/// payload with neither fails to deserialize. `price` is required and
/// `discount` (a percentage) defaults to zero — neither is range-checked.
/// All remaining fields (name, image, category, ...) are carried verbatim
/// in `attributes` for display and never interpreted.
///
/// ## Examples
///
/// ```
/// use wicker_core::ProductPayload;
///
/// let payload: ProductPayload = serde_json::from_str(
///     r#"{"_id":"p1","price":100,"discount":10,"name":"Linen Shirt"}"#,
/// )?;
/// assert_eq!(payload.product_id.as_str(), "p1");
/// assert_eq!(payload.attributes["name"], "Linen Shirt");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", into = "RawProduct")]
pub struct ProductPayload {
    /// Canonical product identity.
    pub product_id: ProductId,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Discount percentage (0-100 by convention, not enforced).
    pub discount: Decimal,
    /// All other supplied fields, untouched.
    pub attributes: Map<String, Value>,
}

impl ProductPayload {
    /// Create a payload from the required fields.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            discount: Decimal::ZERO,
            attributes: Map::new(),
        }
    }

    /// Set the discount percentage.
    #[must_use]
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    /// Attach an opaque display attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Wire shape of a catalog record, before id normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProduct {
    /// Primary record id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    record_id: Option<String>,
    /// Secondary id, used when the primary is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    price: Decimal,
    #[serde(default)]
    discount: Decimal,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl TryFrom<RawProduct> for ProductPayload {
    type Error = ProductPayloadError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let product_id = raw
            .record_id
            .or(raw.id)
            .map(ProductId::new)
            .ok_or(ProductPayloadError::MissingId)?;

        Ok(Self {
            product_id,
            price: raw.price,
            discount: raw.discount,
            attributes: raw.attributes,
        })
    }
}

impl From<ProductPayload> for RawProduct {
    fn from(payload: ProductPayload) -> Self {
        Self {
            record_id: Some(payload.product_id.into()),
            id: None,
            price: payload.price,
            discount: payload.discount,
            attributes: payload.attributes,
        }
    }
}
