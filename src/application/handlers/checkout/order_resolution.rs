//! Shared order pipeline for redirect callbacks, challenge replies and
//! direct authorisations.

use std::sync::Arc;

use crate::domain::checkout::{
    Cart, CheckoutError, Order, PaymentOutcome, PaymentResolution, PaymentSession,
    ProcessorResult, ResolutionKind,
};
use crate::domain::foundation::{ErrorCode, PspReference};
use crate::ports::{CartStore, OrderPlacer, TransactionRecorder};

/// Turns processor answers into orders and terminal session states.
#[derive(Clone)]
pub(crate) struct OrderResolver {
    cart_store: Arc<dyn CartStore>,
    order_placer: Arc<dyn OrderPlacer>,
    transaction_recorder: Arc<dyn TransactionRecorder>,
}

impl OrderResolver {
    pub(crate) fn new(
        cart_store: Arc<dyn CartStore>,
        order_placer: Arc<dyn OrderPlacer>,
        transaction_recorder: Arc<dyn TransactionRecorder>,
    ) -> Self {
        Self {
            cart_store,
            order_placer,
            transaction_recorder,
        }
    }

    pub(crate) fn cart_store(&self) -> &Arc<dyn CartStore> {
        &self.cart_store
    }

    /// Puts the session's locked cart back into the live session.
    ///
    /// Fails with `CartUnavailable` when the session no longer holds a cart
    /// or the store has nothing parked under the reference. If the store
    /// itself fails the session keeps its snapshot so the caller can retry.
    pub(crate) async fn restore_locked_cart(
        &self,
        session: &mut PaymentSession,
    ) -> Result<Cart, CheckoutError> {
        let reference = session.merchant_reference().clone();
        if session.locked_cart().is_none() {
            return Err(CheckoutError::CartUnavailable(reference));
        }

        let restored = self.cart_store.restore(&reference).await?;
        session.take_locked_cart();

        restored.ok_or_else(|| {
            tracing::warn!(
                merchant_reference = %reference,
                "Locked cart missing from cart store"
            );
            CheckoutError::CartUnavailable(reference)
        })
    }

    /// Parks a restored cart again after the processor could not be reached,
    /// leaving the session ready for the same reply to be retried.
    pub(crate) async fn relock_cart(
        &self,
        session: &mut PaymentSession,
        cart: Cart,
    ) -> Result<(), CheckoutError> {
        self.cart_store.lock(&cart).await?;
        session.relock(cart)?;
        tracing::debug!(
            merchant_reference = %session.merchant_reference(),
            "Cart relocked for retry"
        );
        Ok(())
    }

    /// Applies a processor answer to a restored cart.
    ///
    /// Authorised and pending answers place the order; anything else leaves
    /// the cart live for another attempt and resolves as rejected.
    pub(crate) async fn settle(
        &self,
        session: &mut PaymentSession,
        cart: Cart,
        result: ProcessorResult,
    ) -> Result<PaymentResolution, CheckoutError> {
        let outcome = result.outcome();
        match &outcome {
            PaymentOutcome::Authorized => {
                let order = match self.place(cart, result.psp_reference.clone()).await? {
                    Placement::Placed(order) => order,
                    Placement::AlreadyPlaced(order) => {
                        return self.finish(session, PaymentResolution::Recovered { order });
                    }
                };
                if let Some(psp_reference) = &result.psp_reference {
                    self.record_authorization(&order, psp_reference).await;
                }
                self.finish(session, PaymentResolution::Authorized { order })
            }
            PaymentOutcome::Pending => {
                match self.place(cart, result.psp_reference.clone()).await? {
                    Placement::Placed(order) => {
                        self.finish(session, PaymentResolution::Pending { order })
                    }
                    Placement::AlreadyPlaced(order) => {
                        self.finish(session, PaymentResolution::Recovered { order })
                    }
                }
            }
            PaymentOutcome::RedirectRequired
            | PaymentOutcome::Rejected
            | PaymentOutcome::Error(_) => {
                tracing::info!(
                    merchant_reference = %session.merchant_reference(),
                    result_code = %result.result_code,
                    outcome = ?outcome,
                    "Payment not authorised, cart left live"
                );
                self.finish(session, PaymentResolution::Rejected { result })
            }
        }
    }

    /// Answers from the order book when the locked cart is gone.
    ///
    /// `result` is the processor answer when one is known; otherwise the
    /// session's recorded rejection is used. Without an order, a placing
    /// answer (or no answer at all) means the order was lost.
    pub(crate) async fn recover(
        &self,
        session: &mut PaymentSession,
        result: Option<ProcessorResult>,
    ) -> Result<PaymentResolution, CheckoutError> {
        let reference = session.merchant_reference().clone();
        if let Some(order) = self.order_placer.find_order_by_reference(&reference).await? {
            tracing::info!(
                merchant_reference = %reference,
                order_code = %order.code,
                "Recovered existing order"
            );
            return self.finish(session, PaymentResolution::Recovered { order });
        }

        let result = result.or_else(|| session.rejection().cloned());
        match result {
            Some(result) if !result.outcome().places_order() => {
                self.finish(session, PaymentResolution::Rejected { result })
            }
            _ => {
                tracing::error!(
                    merchant_reference = %reference,
                    "Cart consumed but no order exists"
                );
                Err(CheckoutError::OrderNotFound(reference))
            }
        }
    }

    /// Moves an open session to the resolution's terminal state.
    ///
    /// Already-resolved sessions are left as they are.
    pub(crate) fn finish(
        &self,
        session: &mut PaymentSession,
        resolution: PaymentResolution,
    ) -> Result<PaymentResolution, CheckoutError> {
        if !session.is_resolved() {
            match &resolution {
                PaymentResolution::Rejected { result } => session.reject(result.clone())?,
                _ => session.resolve(resolution.kind())?,
            }
        }

        if resolution.kind() != ResolutionKind::Rejected {
            tracing::info!(
                merchant_reference = %session.merchant_reference(),
                resolution = ?resolution.kind(),
                "Payment session resolved"
            );
        }
        Ok(resolution)
    }

    async fn place(
        &self,
        cart: Cart,
        psp_reference: Option<PspReference>,
    ) -> Result<Placement, CheckoutError> {
        let reference = cart.code.clone();
        match self.order_placer.place_order(cart, psp_reference).await {
            Ok(order) => Ok(Placement::Placed(order)),
            Err(err) if err.code == ErrorCode::DuplicateOrder => {
                tracing::warn!(
                    merchant_reference = %reference,
                    "Order already placed by a concurrent request"
                );
                self.order_placer
                    .find_order_by_reference(&reference)
                    .await?
                    .map(Placement::AlreadyPlaced)
                    .ok_or(CheckoutError::OrderNotFound(reference))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn record_authorization(&self, order: &Order, psp_reference: &PspReference) {
        if let Err(err) = self
            .transaction_recorder
            .record_authorization(order, psp_reference)
            .await
        {
            tracing::error!(
                order_code = %order.code,
                psp_reference = %psp_reference,
                error = %err,
                "Failed to record authorization; order kept"
            );
        }
    }
}

enum Placement {
    Placed(Order),
    AlreadyPlaced(Order),
}
