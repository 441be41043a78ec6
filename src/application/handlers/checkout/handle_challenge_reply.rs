//! HandleChallengeReplyHandler - Completes a 3-D Secure authorisation.

use std::sync::Arc;

use crate::domain::checkout::{
    CheckoutError, PaymentResolution, PaymentSession, PaymentSessionStatus,
};
use crate::ports::{CartStore, OrderPlacer, ProcessorClient, TransactionRecorder};

use super::order_resolution::OrderResolver;

/// Command carrying the issuer's reply.
#[derive(Debug, Clone)]
pub struct HandleChallengeReplyCommand {
    /// Payer authentication response from the issuer.
    pub pa_res: String,
    /// Session-binding token echoed back by the issuer.
    pub md: String,
}

/// Handler for the shopper returning from the card issuer.
///
/// The echoed `md` must match the token stored when the challenge was
/// issued. A mismatch aborts the session and the processor is never called.
/// If the processor call itself fails the cart is parked again and the
/// reply can be retried.
pub struct HandleChallengeReplyHandler {
    processor: Arc<dyn ProcessorClient>,
    resolver: OrderResolver,
}

impl HandleChallengeReplyHandler {
    pub fn new(
        processor: Arc<dyn ProcessorClient>,
        cart_store: Arc<dyn CartStore>,
        order_placer: Arc<dyn OrderPlacer>,
        transaction_recorder: Arc<dyn TransactionRecorder>,
    ) -> Self {
        Self {
            processor,
            resolver: OrderResolver::new(cart_store, order_placer, transaction_recorder),
        }
    }

    pub async fn handle(
        &self,
        session: &mut PaymentSession,
        cmd: HandleChallengeReplyCommand,
    ) -> Result<PaymentResolution, CheckoutError> {
        if !session.challenge_matches(&cmd.md) {
            tracing::warn!(
                session_id = %session.id(),
                merchant_reference = %session.merchant_reference(),
                expected_challenge = session.has_expected_challenge(),
                "Challenge reply does not match payment session"
            );
            if session.status() == PaymentSessionStatus::AwaitingRedirectResult {
                session.abort()?;
            }
            return Err(CheckoutError::ChallengeMismatch);
        }

        let cart = match self.resolver.restore_locked_cart(session).await {
            Ok(cart) => cart,
            Err(CheckoutError::CartUnavailable(_)) => {
                return self.resolver.recover(session, None).await;
            }
            Err(err) => return Err(err),
        };

        let result = match self.processor.authorize_challenge(&cmd.pa_res, &cmd.md).await {
            Ok(result) => result,
            Err(err) => {
                if let Err(relock_err) = self.resolver.relock_cart(session, cart).await {
                    tracing::error!(
                        merchant_reference = %session.merchant_reference(),
                        error = %relock_err,
                        "Failed to relock cart after processor failure"
                    );
                }
                return Err(err.into());
            }
        };

        tracing::info!(
            session_id = %session.id(),
            merchant_reference = %session.merchant_reference(),
            result_code = %result.result_code,
            "3-D Secure authorisation completed"
        );

        self.resolver.settle(session, cart, result).await
    }
}
