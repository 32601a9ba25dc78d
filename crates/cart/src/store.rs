//! The cart store: line items, derived total, write-through persistence.
//!
//! One `CartStore` is constructed per application root with an injected
//! persister and rehydrates itself from storage. Every mutating operation
//! recomputes the total and synchronously writes the whole state back
//! before returning. No operation here returns an error: read and parse
//! failures fall back to an empty cart, write failures are logged and
//! swallowed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wicker_core::{
    LineItem, OrderDraft, OrderError, OrderGateway, OrderReceipt, ProductId, ProductPayload,
    ShippingAddress,
};

use crate::persist::{CartPersister, keys};

/// The cart record: ordered lines plus the derived total.
///
/// `total_amount` is never set independently; it is recomputed from `items`
/// on every mutation and again on rehydration, so a stale persisted total
/// cannot drift from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Cart lines, unique by (product id, selected size).
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Derived sum of line totals.
    #[serde(default)]
    pub total_amount: Decimal,
}

impl CartState {
    /// Sum of `quantity × price × (1 − discount/100)` over all lines.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

/// Cart store with an injected persistence surface.
///
/// Operations take `&mut self`: there is one logical mutator (the UI
/// dispatch path) and the borrow checker enforces it. Hosts that share one
/// persisted cart between processes need their own mutual exclusion around
/// the store; this type does not provide it.
pub struct CartStore<P: CartPersister> {
    state: CartState,
    persister: P,
}

impl<P: CartPersister> CartStore<P> {
    /// Build a store by rehydrating from the persister.
    ///
    /// A missing record, an unreadable surface, or an unparseable record
    /// all yield an empty cart; none of them is surfaced to the caller.
    pub fn load(persister: P) -> Self {
        let state = match persister.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<CartState>(&raw) {
                Ok(mut state) => {
                    state.total_amount = state.computed_total();
                    state
                }
                Err(error) => {
                    tracing::debug!(%error, "stored cart record unparseable, starting empty");
                    CartState::default()
                }
            },
            Ok(None) => CartState::default(),
            Err(error) => {
                tracing::debug!(%error, "cart storage unreadable, starting empty");
                CartState::default()
            }
        };

        Self { state, persister }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// If a line with the same (product id, selected size) already exists,
    /// its quantity goes up by 1; otherwise a new single-unit line is
    /// appended carrying the payload's fields verbatim.
    pub fn add_item(&mut self, payload: ProductPayload, selected_size: Option<&str>) {
        let existing = self
            .state
            .items
            .iter()
            .position(|line| line.matches(&payload.product_id, selected_size));

        match existing {
            Some(index) => {
                if let Some(line) = self.state.items.get_mut(index) {
                    line.quantity += 1;
                }
            }
            None => self
                .state
                .items
                .push(LineItem::from_payload(payload, selected_size.map(str::to_owned))),
        }

        self.commit();
    }

    /// Remove the line matching the composite key. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId, selected_size: Option<&str>) {
        self.state
            .items
            .retain(|line| !line.matches(product_id, selected_size));
        self.commit();
    }

    /// Set the quantity of a line.
    ///
    /// With a size, the match must include it; without one, the first line
    /// with the product id wins regardless of its size. A quantity of zero
    /// or less removes the line entirely.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        selected_size: Option<&str>,
    ) {
        let position = self.state.items.iter().position(|line| match selected_size {
            Some(size) => line.matches(product_id, Some(size)),
            None => line.product_id == *product_id,
        });

        if let Some(index) = position {
            if quantity <= 0 {
                self.state.items.remove(index);
            } else if let Some(line) = self.state.items.get_mut(index) {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }

        self.commit();
    }

    /// Empty the cart and remove the persisted record.
    ///
    /// The record is removed, not rewritten as an empty cart, so a later
    /// rehydration takes the no-prior-cart path.
    pub fn clear(&mut self) {
        self.state = CartState::default();
        if let Err(error) = self.persister.remove(keys::CART) {
            tracing::warn!(%error, "failed to remove persisted cart record");
        }
    }

    /// Submit the cart as an order; clear it when the gateway accepts.
    ///
    /// On failure the cart (and its persisted record) is left untouched so
    /// the customer can retry.
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`OrderError`] unchanged.
    pub fn checkout<G: OrderGateway>(
        &mut self,
        gateway: &G,
        payment_method: impl Into<String>,
        shipping_address: ShippingAddress,
    ) -> Result<OrderReceipt, OrderError> {
        let draft = OrderDraft {
            items: self.state.items.clone(),
            total_amount: self.state.total_amount,
            payment_method: payment_method.into(),
            shipping_address,
        };

        let receipt = gateway.submit(draft)?;
        self.clear();
        Ok(receipt)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }

    /// Current derived total.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.state.total_amount
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// The full cart record.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Recompute the total and write the whole state through, synchronously.
    fn commit(&mut self) {
        self.state.total_amount = self.state.computed_total();

        match serde_json::to_string(&self.state) {
            Ok(raw) => {
                if let Err(error) = self.persister.set(keys::CART, &raw) {
                    tracing::warn!(%error, "failed to persist cart record");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to serialize cart record");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use chrono::Utc;
    use uuid::Uuid;

    use wicker_core::OrderId;

    use super::*;
    use crate::persist::MemoryPersister;

    fn payload(id: &str, price: i64, discount: i64) -> ProductPayload {
        ProductPayload::new(id, Decimal::from(price)).with_discount(Decimal::from(discount))
    }

    fn store() -> CartStore<MemoryPersister> {
        CartStore::load(MemoryPersister::new())
    }

    #[test]
    fn test_add_merges_on_composite_match() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), Some("M"));
        cart.add_item(payload("P", 50, 0), Some("M"));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().quantity, 2);
    }

    #[test]
    fn test_add_keeps_distinct_sizes_apart() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), Some("M"));
        cart.add_item(payload("P", 50, 0), Some("L"));

        assert_eq!(cart.items().len(), 2);
        assert!(cart.items().iter().all(|line| line.quantity == 1));
    }

    #[test]
    fn test_remove_is_key_scoped() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), Some("M"));
        cart.add_item(payload("P", 50, 0), Some("L"));

        cart.remove_item(&ProductId::new("P"), Some("M"));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().selected_size.as_deref(), Some("L"));
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), None);
        cart.remove_item(&ProductId::new("Q"), None);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_and_negative_remove() {
        for quantity in [0, -3] {
            let mut cart = store();
            cart.add_item(payload("P", 50, 0), Some("M"));
            cart.update_quantity(&ProductId::new("P"), quantity, Some("M"));

            assert!(cart.is_empty());
            assert_eq!(cart.total_amount(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_update_quantity_without_size_takes_first_match() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), Some("M"));
        cart.add_item(payload("P", 50, 0), Some("L"));

        cart.update_quantity(&ProductId::new("P"), 7, None);

        assert_eq!(cart.items().first().unwrap().quantity, 7);
        assert_eq!(cart.items().get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_with_size_must_match_it() {
        let mut cart = store();
        cart.add_item(payload("P", 50, 0), Some("M"));

        cart.update_quantity(&ProductId::new("P"), 9, Some("L"));

        assert_eq!(cart.items().first().unwrap().quantity, 1);
    }

    #[test]
    fn test_concrete_pricing_scenario() {
        let mut cart = store();

        cart.add_item(payload("A", 100, 10), None);
        assert_eq!(cart.total_amount(), Decimal::from(90));

        cart.add_item(payload("A", 100, 10), None);
        assert_eq!(cart.items().first().unwrap().quantity, 2);
        assert_eq!(cart.total_amount(), Decimal::from(180));

        cart.update_quantity(&ProductId::new("A"), 5, None);
        assert_eq!(cart.total_amount(), Decimal::from(450));

        cart.remove_item(&ProductId::new("A"), None);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());

        cart.add_item(payload("A", 100, 10), Some("M"));
        cart.add_item(payload("B", 25, 0), None);
        cart.update_quantity(&ProductId::new("B"), 3, None);
        cart.remove_item(&ProductId::new("A"), Some("M"));

        let raw = persister.get(keys::CART).unwrap().unwrap();
        let persisted: CartState = serde_json::from_str(&raw).unwrap();
        assert_eq!(&persisted, cart.state());
    }

    #[test]
    fn test_round_trip_across_restart() {
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());
        cart.add_item(payload("A", 100, 10), Some("M"));
        cart.update_quantity(&ProductId::new("A"), 4, Some("M"));
        let before = cart.state().clone();
        drop(cart);

        let rehydrated = CartStore::load(persister);
        assert_eq!(rehydrated.state(), &before);
    }

    #[test]
    fn test_clear_removes_persisted_record() {
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());
        cart.add_item(payload("A", 100, 0), None);
        cart.clear();

        assert_eq!(persister.get(keys::CART).unwrap(), None);
        assert!(CartStore::load(persister).is_empty());
    }

    #[test]
    fn test_unparseable_record_falls_back_to_empty() {
        let persister = MemoryPersister::new();
        persister.set(keys::CART, "not json at all").unwrap();

        let cart = CartStore::load(persister);
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_rehydration_recomputes_stale_total() {
        let persister = MemoryPersister::new();
        persister
            .set(
                keys::CART,
                r#"{"items":[{"productId":"A","price":"100","discount":"10","quantity":2}],"totalAmount":"9999"}"#,
            )
            .unwrap();

        let cart = CartStore::load(persister);
        assert_eq!(cart.total_amount(), Decimal::from(180));
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    struct FakeGateway {
        accept: bool,
        submitted_total: Cell<Option<Decimal>>,
    }

    impl FakeGateway {
        fn accepting(accept: bool) -> Self {
            Self {
                accept,
                submitted_total: Cell::new(None),
            }
        }
    }

    impl OrderGateway for FakeGateway {
        fn submit(&self, draft: OrderDraft) -> Result<OrderReceipt, OrderError> {
            self.submitted_total.set(Some(draft.total_amount));
            if self.accept {
                Ok(OrderReceipt {
                    id: OrderId::new(Uuid::new_v4()),
                    total_amount: draft.total_amount,
                    placed_at: Utc::now(),
                })
            } else {
                Err(OrderError::Unauthorized)
            }
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "A. Customer".to_owned(),
            line1: "1 Main St".to_owned(),
            line2: None,
            city: "Springfield".to_owned(),
            postal_code: "12345".to_owned(),
            country: "US".to_owned(),
        }
    }

    #[test]
    fn test_checkout_success_clears_cart_and_record() {
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());
        cart.add_item(payload("A", 100, 10), None);

        let gateway = FakeGateway::accepting(true);
        let receipt = cart.checkout(&gateway, "cod", address()).unwrap();

        assert_eq!(receipt.total_amount, Decimal::from(90));
        assert_eq!(gateway.submitted_total.get(), Some(Decimal::from(90)));
        assert!(cart.is_empty());
        assert_eq!(persister.get(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_checkout_failure_preserves_cart() {
        let persister = MemoryPersister::new();
        let mut cart = CartStore::load(persister.clone());
        cart.add_item(payload("A", 100, 10), None);

        let gateway = FakeGateway::accepting(false);
        let result = cart.checkout(&gateway, "cod", address());

        assert!(matches!(result, Err(OrderError::Unauthorized)));
        assert_eq!(cart.items().len(), 1);
        assert!(persister.get(keys::CART).unwrap().is_some());
    }
}
