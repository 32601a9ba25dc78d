//! Cart line item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::product::ProductPayload;

/// One entry in the cart.
///
/// A line is uniquely identified by the composite key of `product_id` and
/// `selected_size`; the same product in two sizes occupies two lines.
/// Field names serialize in camelCase, matching the persisted cart record
/// and the order submission wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Canonical product identity.
    pub product_id: ProductId,
    /// Selected variant, when the product has sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Discount percentage applied to this line.
    #[serde(default)]
    pub discount: Decimal,
    /// Number of units; always at least 1.
    pub quantity: u32,
    /// Display attributes carried verbatim from the catalog payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl LineItem {
    /// Create a single-unit line from a catalog payload.
    #[must_use]
    pub fn from_payload(payload: ProductPayload, selected_size: Option<String>) -> Self {
        Self {
            product_id: payload.product_id,
            selected_size,
            price: payload.price,
            discount: payload.discount,
            quantity: 1,
            attributes: payload.attributes,
        }
    }

    /// Whether this line matches the composite identity key exactly.
    ///
    /// A `None` size only matches a line that has no size.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, selected_size: Option<&str>) -> bool {
        self.product_id == *product_id && self.selected_size.as_deref() == selected_size
    }

    /// Line total: `quantity × price × (1 − discount/100)`.
    ///
    /// Exact decimal arithmetic; no per-line rounding.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price * (Decimal::ONE_HUNDRED - self.discount)
            / Decimal::ONE_HUNDRED
    }
}
