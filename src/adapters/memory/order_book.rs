//! In-memory order book.
//!
//! Places at most one order per merchant reference and, when wired to an
//! [`InMemoryCartStore`], consumes the live cart on placement the way the
//! host's checkout does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::checkout::{Cart, Order};
use crate::domain::foundation::{DomainError, ErrorCode, MerchantReference, PspReference, Timestamp};
use crate::ports::OrderPlacer;

use super::cart_store::InMemoryCartStore;

#[derive(Default)]
pub struct InMemoryOrderBook {
    orders: RwLock<HashMap<MerchantReference, Order>>,
    cart_store: Option<Arc<InMemoryCartStore>>,
    place_calls: AtomicUsize,
}

impl InMemoryOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes live carts from `cart_store` when orders are placed.
    pub fn with_cart_store(cart_store: Arc<InMemoryCartStore>) -> Self {
        Self {
            cart_store: Some(cart_store),
            ..Self::default()
        }
    }

    // === Test Helpers ===

    /// Number of `place_order` calls, successful or not.
    pub fn place_calls(&self) -> usize {
        self.place_calls.load(Ordering::SeqCst)
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().expect("order lock poisoned").len()
    }

    /// Seeds an existing order, e.g. one placed by an earlier request.
    pub fn insert(&self, order: Order) {
        self.orders
            .write()
            .expect("order lock poisoned")
            .insert(order.merchant_reference.clone(), order);
    }
}

#[async_trait]
impl OrderPlacer for InMemoryOrderBook {
    async fn place_order(
        &self,
        cart: Cart,
        psp_reference: Option<PspReference>,
    ) -> Result<Order, DomainError> {
        self.place_calls.fetch_add(1, Ordering::SeqCst);

        let mut orders = self
            .orders
            .write()
            .map_err(|_| DomainError::storage("order lock poisoned"))?;

        if orders.contains_key(&cart.code) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrder,
                format!("order already placed for {}", cart.code),
            ));
        }

        let order = Order {
            code: cart.code.to_string(),
            merchant_reference: cart.code.clone(),
            total: cart.total.clone(),
            psp_reference,
            placed_at: Timestamp::now(),
        };
        orders.insert(cart.code.clone(), order.clone());

        if let Some(store) = &self.cart_store {
            store.consume_live(&cart.code);
        }

        Ok(order)
    }

    async fn find_order_by_reference(
        &self,
        reference: &MerchantReference,
    ) -> Result<Option<Order>, DomainError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| DomainError::storage("order lock poisoned"))?;
        Ok(orders.get(reference).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::Amount;

    fn cart() -> Cart {
        Cart::new(
            MerchantReference::new("ORDER123").unwrap(),
            Amount::new(1000, "EUR").unwrap(),
        )
    }

    #[tokio::test]
    async fn place_order_uses_cart_code_and_psp_reference() {
        let book = InMemoryOrderBook::new();
        let psp = PspReference::new("8815").unwrap();

        let order = book.place_order(cart(), Some(psp.clone())).await.unwrap();

        assert_eq!(order.code, "ORDER123");
        assert_eq!(order.psp_reference, Some(psp));
        assert_eq!(order.total, cart().total);
    }

    #[tokio::test]
    async fn second_order_for_same_reference_is_rejected() {
        let book = InMemoryOrderBook::new();
        book.place_order(cart(), None).await.unwrap();

        let err = book.place_order(cart(), None).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateOrder);
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.place_calls(), 2);
    }

    #[tokio::test]
    async fn find_by_reference_returns_placed_order() {
        let book = InMemoryOrderBook::new();
        let placed = book.place_order(cart(), None).await.unwrap();

        let found = book.find_order_by_reference(&cart().code).await.unwrap();
        let missing = book
            .find_order_by_reference(&MerchantReference::new("NOPE").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(placed));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn placing_consumes_live_cart() {
        let store = Arc::new(InMemoryCartStore::new());
        store.put_live(cart());
        let book = InMemoryOrderBook::with_cart_store(store.clone());

        book.place_order(cart(), None).await.unwrap();

        assert!(store.live_cart(&cart().code).is_none());
    }
}
