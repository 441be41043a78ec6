//! BeginRedirectPaymentHandler - Signs the hosted payment page form and parks the cart.

use std::sync::Arc;

use crate::domain::checkout::{
    build_hosted_payment_payload, fields, Cart, CheckoutError, HostedPaymentForm,
    MerchantSettings, PaymentSession, PaymentSessionStatus,
};
use crate::domain::foundation::Timestamp;
use crate::ports::CartStore;

/// Command to start a hosted payment page redirect.
#[derive(Debug, Clone)]
pub struct BeginRedirectPaymentCommand {
    pub cart: Cart,
    /// Where the payment page sends the shopper back (`resURL`).
    pub return_url: String,
}

/// Handler for starting a redirect payment.
///
/// Builds and signs the outbound payload, locks the cart and moves the
/// session to `AwaitingRedirectResult`.
pub struct BeginRedirectPaymentHandler {
    settings: Arc<MerchantSettings>,
    cart_store: Arc<dyn CartStore>,
}

impl BeginRedirectPaymentHandler {
    pub fn new(settings: Arc<MerchantSettings>, cart_store: Arc<dyn CartStore>) -> Self {
        Self {
            settings,
            cart_store,
        }
    }

    pub async fn handle(
        &self,
        session: &mut PaymentSession,
        cmd: BeginRedirectPaymentCommand,
    ) -> Result<HostedPaymentForm, CheckoutError> {
        if session.status() != PaymentSessionStatus::Initialized {
            return Err(CheckoutError::invalid_state(format!(
                "cannot begin payment in state {:?}",
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

        let payload = build_hosted_payment_payload(
            &cmd.cart,
            &self.settings,
            &cmd.return_url,
            Timestamp::now(),
        );
        let signature = self
            .settings
            .codec()
            .sign(&payload, self.settings.secret());

        self.cart_store.lock(&cmd.cart).await?;
        session.await_redirect(cmd.cart, None)?;

        let mut form_fields = payload.into_map();
        form_fields.insert(fields::MERCHANT_SIG.to_string(), signature);

        tracing::info!(
            session_id = %session.id(),
            merchant_reference = %session.merchant_reference(),
            "Redirecting shopper to hosted payment page"
        );

        Ok(HostedPaymentForm {
            action_url: self.settings.hpp_url(),
            fields: form_fields,
        })
    }
}
