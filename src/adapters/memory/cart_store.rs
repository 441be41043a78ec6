//! In-memory cart store.
//!
//! Models the host's session cart handling: each merchant reference has at
//! most one live cart and at most one locked (parked) cart.
//!
//! # Security Note
//!
//! Intended for tests and local wiring. Helper accessors use `.expect()` on
//! lock operations and panic if a lock is poisoned.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::checkout::Cart;
use crate::domain::foundation::{DomainError, MerchantReference};
use crate::ports::CartStore;

#[derive(Default)]
pub struct InMemoryCartStore {
    live: RwLock<HashMap<MerchantReference, Cart>>,
    locked: RwLock<HashMap<MerchantReference, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Host Helpers ===

    /// Puts a cart into the live session, as the storefront would.
    pub fn put_live(&self, cart: Cart) {
        self.live
            .write()
            .expect("live cart lock poisoned")
            .insert(cart.code.clone(), cart);
    }

    /// Removes a live cart, as placing an order does.
    pub fn consume_live(&self, reference: &MerchantReference) -> Option<Cart> {
        self.live
            .write()
            .expect("live cart lock poisoned")
            .remove(reference)
    }

    pub fn live_cart(&self, reference: &MerchantReference) -> Option<Cart> {
        self.live
            .read()
            .expect("live cart lock poisoned")
            .get(reference)
            .cloned()
    }

    pub fn is_locked(&self, reference: &MerchantReference) -> bool {
        self.locked
            .read()
            .expect("locked cart lock poisoned")
            .contains_key(reference)
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn lock(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut live = self
            .live
            .write()
            .map_err(|_| DomainError::storage("live cart lock poisoned"))?;
        let mut locked = self
            .locked
            .write()
            .map_err(|_| DomainError::storage("locked cart lock poisoned"))?;

        live.remove(&cart.code);
        locked.insert(cart.code.clone(), cart.clone());
        tracing::debug!(merchant_reference = %cart.code, "Cart locked");
        Ok(())
    }

    async fn restore(&self, reference: &MerchantReference) -> Result<Option<Cart>, DomainError> {
        let mut live = self
            .live
            .write()
            .map_err(|_| DomainError::storage("live cart lock poisoned"))?;
        let mut locked = self
            .locked
            .write()
            .map_err(|_| DomainError::storage("locked cart lock poisoned"))?;

        let Some(cart) = locked.remove(reference) else {
            return Ok(None);
        };
        live.insert(reference.clone(), cart.clone());
        tracing::debug!(merchant_reference = %reference, "Cart restored");
        Ok(Some(cart))
    }
}
