//! Cart store port for parking the shopper's cart during a redirect.
//!
//! While the shopper is on the payment page the live session cart is moved
//! aside so it cannot be changed underneath the payment.

use async_trait::async_trait;

use crate::domain::checkout::Cart;
use crate::domain::foundation::{DomainError, MerchantReference};

/// Port for the host's session-cart handling.
///
/// Shared across shoppers; implementations isolate carts by merchant
/// reference.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Moves `cart` out of the live session into a locked slot.
    async fn lock(&self, cart: &Cart) -> Result<(), DomainError>;

    /// Puts the locked cart back into the live session.
    ///
    /// Returns `None` when no locked cart exists for the reference, e.g.
    /// because an order was already placed from it.
    async fn restore(&self, reference: &MerchantReference) -> Result<Option<Cart>, DomainError>;
}
