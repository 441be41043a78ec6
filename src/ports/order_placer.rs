//! Order placement port.

use async_trait::async_trait;

use crate::domain::checkout::{Cart, Order};
use crate::domain::foundation::{DomainError, MerchantReference, PspReference};

/// Port for the host's order pipeline.
#[async_trait]
pub trait OrderPlacer: Send + Sync {
    /// Places an order from a restored cart, consuming the cart.
    async fn place_order(
        &self,
        cart: Cart,
        psp_reference: Option<PspReference>,
    ) -> Result<Order, DomainError>;

    /// Finds an order by the merchant reference it was placed under.
    async fn find_order_by_reference(
        &self,
        reference: &MerchantReference,
    ) -> Result<Option<Order>, DomainError>;
}
