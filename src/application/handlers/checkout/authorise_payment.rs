//! AuthorisePaymentHandler - Direct API authorisation with 3-D Secure step-up.

use std::sync::Arc;

use crate::domain::checkout::{
    Cart, ChallengeRedirect, CheckoutError, PaymentOutcome, PaymentResolution, PaymentSession,
    PaymentSessionStatus,
};
use crate::ports::{CartStore, OrderPlacer, ProcessorClient, TransactionRecorder};

use super::order_resolution::OrderResolver;

/// Command to authorise the cart directly with the processor.
#[derive(Debug, Clone)]
pub struct AuthorisePaymentCommand {
    pub cart: Cart,
}

/// Result of a direct authorisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorisePaymentResult {
    /// The processor answered without a step-up.
    Resolved(PaymentResolution),
    /// The issuer wants to authenticate the shopper; redirect them there.
    ChallengeRequired(ChallengeRedirect),
}

/// Handler for direct (server-to-server) authorisation.
pub struct AuthorisePaymentHandler {
    processor: Arc<dyn ProcessorClient>,
    resolver: OrderResolver,
}

impl AuthorisePaymentHandler {
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
        cmd: AuthorisePaymentCommand,
    ) -> Result<AuthorisePaymentResult, CheckoutError> {
        if session.status() != PaymentSessionStatus::Initialized {
            return Err(CheckoutError::invalid_state(format!(
                "cannot authorise payment in state {:?}",
                session.status()
            )));
        }
        if cmd.cart.code != *session.merchant_reference() {
            return Err(CheckoutError::invalid_state(format!(
                "cart {} does not belong to session for {}",
                cmd.cart.code,
                session.merchant_reference()
            )));
        }

        let result = self.processor.authorize(&cmd.cart).await?;
        tracing::info!(
            session_id = %session.id(),
            merchant_reference = %session.merchant_reference(),
            result_code = %result.result_code,
            "Direct authorisation answered"
        );

        if result.outcome() != PaymentOutcome::RedirectRequired {
            let resolution = self.resolver.settle(session, cmd.cart, result).await?;
            return Ok(AuthorisePaymentResult::Resolved(resolution));
        }

        let Some(redirect) = result.redirect else {
            return Err(CheckoutError::Processor {
                message: "redirect requested without issuer details".to_string(),
                retryable: false,
            });
        };

        self.resolver.cart_store().lock(&cmd.cart).await?;
        session.await_redirect(cmd.cart, Some(redirect.md.clone()))?;

        tracing::info!(
            session_id = %session.id(),
            merchant_reference = %session.merchant_reference(),
            "Redirecting shopper to issuer for 3-D Secure"
        );
        Ok(AuthorisePaymentResult::ChallengeRequired(redirect))
    }
}
