//! HandleRedirectCallbackHandler - Verifies the payment page result and settles the order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::checkout::{
    fields, CheckoutError, MerchantSettings, PaymentResolution, PaymentSession,
    PaymentSessionStatus, ProcessorResult, ResultCode,
};
use crate::domain::foundation::PspReference;
use crate::domain::signing::SignedPayload;
use crate::ports::{CartStore, OrderPlacer, TransactionRecorder};

use super::order_resolution::OrderResolver;

/// Command carrying the query parameters of a redirect callback.
#[derive(Debug, Clone)]
pub struct HandleRedirectCallbackCommand {
    /// Every parameter the shopper's browser brought back.
    pub received_fields: HashMap<String, String>,
}

/// Handler for the shopper returning from the hosted payment page.
///
/// Only the signed allow-list is trusted. Extra parameters are ignored and
/// a bad signature leaves the session untouched.
pub struct HandleRedirectCallbackHandler {
    settings: Arc<MerchantSettings>,
    resolver: OrderResolver,
}

impl HandleRedirectCallbackHandler {
    pub fn new(
        settings: Arc<MerchantSettings>,
        cart_store: Arc<dyn CartStore>,
        order_placer: Arc<dyn OrderPlacer>,
        transaction_recorder: Arc<dyn TransactionRecorder>,
    ) -> Self {
        Self {
            settings,
            resolver: OrderResolver::new(cart_store, order_placer, transaction_recorder),
        }
    }

    pub async fn handle(
        &self,
        session: &mut PaymentSession,
        cmd: HandleRedirectCallbackCommand,
    ) -> Result<PaymentResolution, CheckoutError> {
        // 1. Verify before reading anything from the callback
        let payload =
            SignedPayload::from_allow_listed(&cmd.received_fields, fields::INBOUND_SIGNED_FIELDS);
        let verified = cmd
            .received_fields
            .get(fields::MERCHANT_SIG)
            .map(|sig| {
                self.settings
                    .codec()
                    .verify(&payload, self.settings.secret(), sig)
            })
            .unwrap_or(false);

        if !verified {
            tracing::warn!(
                session_id = %session.id(),
                merchant_reference = ?payload.get(fields::MERCHANT_REFERENCE),
                "Redirect callback failed signature verification"
            );
            return Err(CheckoutError::Signature);
        }

        // 2. Bind the callback to this session
        match session.status() {
            PaymentSessionStatus::AwaitingRedirectResult | PaymentSessionStatus::Resolved(_) => {}
            status => {
                return Err(CheckoutError::invalid_state(format!(
                    "no redirect in progress (state {:?})",
                    status
                )));
            }
        }

        if payload.get(fields::MERCHANT_REFERENCE) != Some(session.merchant_reference().as_str()) {
            tracing::warn!(
                session_id = %session.id(),
                merchant_reference = %session.merchant_reference(),
                callback_reference = ?payload.get(fields::MERCHANT_REFERENCE),
                "Redirect callback belongs to another session"
            );
            return Err(CheckoutError::ChallengeMismatch);
        }

        let result = processor_result_from(&payload);
        tracing::info!(
            session_id = %session.id(),
            merchant_reference = %session.merchant_reference(),
            result_code = %result.result_code,
            "Verified redirect callback"
        );

        // 3. Settle against the restored cart, or recover from the order book
        match self.resolver.restore_locked_cart(session).await {
            Ok(cart) => self.resolver.settle(session, cart, result).await,
            Err(CheckoutError::CartUnavailable(_)) => {
                self.resolver.recover(session, Some(result)).await
            }
            Err(err) => Err(err),
        }
    }
}

fn processor_result_from(payload: &SignedPayload) -> ProcessorResult {
    let mut result = ProcessorResult::new(ResultCode::parse(
        payload.get(fields::AUTH_RESULT).unwrap_or_default(),
    ));
    if let Some(psp_reference) = payload
        .get(fields::PSP_REFERENCE)
        .and_then(|value| PspReference::new(value).ok())
    {
        result = result.with_psp_reference(psp_reference);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCartStore, InMemoryOrderBook, InMemoryTransactionLedger};
    use crate::domain::checkout::{Amount, Cart, ResolutionKind};
    use crate::domain::foundation::MerchantReference;
    use crate::domain::signing::{HmacKeyFormat, HmacSecret};

    struct Fixture {
        settings: Arc<MerchantSettings>,
        store: Arc<InMemoryCartStore>,
        orders: Arc<InMemoryOrderBook>,
        ledger: Arc<InMemoryTransactionLedger>,
        handler: HandleRedirectCallbackHandler,
    }

    fn settings() -> Arc<MerchantSettings> {
        Arc::new(
            MerchantSettings::new(
                "ShopAccount",
                "skin1",
                HmacSecret::from_config("k1", HmacKeyFormat::Raw).unwrap(),
                "https://test.example/hpp",
                60,
            )
            .unwrap(),
        )
    }

    fn fixture() -> Fixture {
        let settings = settings();
        let store = Arc::new(InMemoryCartStore::new());
        let orders = Arc::new(InMemoryOrderBook::with_cart_store(store.clone()));
        let ledger = Arc::new(InMemoryTransactionLedger::new());
        let handler = HandleRedirectCallbackHandler::new(
            settings.clone(),
            store.clone(),
            orders.clone(),
            ledger.clone(),
        );
        Fixture {
            settings,
            store,
            orders,
            ledger,
            handler,
        }
    }

    fn reference() -> MerchantReference {
        MerchantReference::new("ORDER123").unwrap()
    }

    fn cart() -> Cart {
        Cart::new(reference(), Amount::new(1000, "EUR").unwrap())
    }

    async fn awaiting_session(store: &InMemoryCartStore) -> PaymentSession {
        let mut session = PaymentSession::new(reference());
        store.lock(&cart()).await.unwrap();
        session.await_redirect(cart(), None).unwrap();
        session
    }

    fn signed_callback(
        settings: &MerchantSettings,
        auth_result: &str,
        reference: &str,
    ) -> HandleRedirectCallbackCommand {
        let mut fields_map: HashMap<String, String> = [
            (fields::AUTH_RESULT, auth_result),
            (fields::MERCHANT_REFERENCE, reference),
            (fields::PAYMENT_METHOD, "visa"),
            (fields::PSP_REFERENCE, "8815"),
            (fields::SHOPPER_LOCALE, "en_GB"),
            (fields::SKIN_CODE, "skin1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let payload = SignedPayload::from_allow_listed(&fields_map, fields::INBOUND_SIGNED_FIELDS);
        let signature = settings.codec().sign(&payload, settings.secret());
        fields_map.insert(fields::MERCHANT_SIG.to_string(), signature);

        HandleRedirectCallbackCommand {
            received_fields: fields_map,
        }
    }

    #[tokio::test]
    async fn authorised_callback_places_order_and_records_transaction() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;

        let resolution = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER123"))
            .await
            .unwrap();

        assert_eq!(resolution.kind(), ResolutionKind::Authorized);
        assert_eq!(resolution.order().unwrap().code, "ORDER123");
        assert_eq!(
            session.status(),
            PaymentSessionStatus::Resolved(ResolutionKind::Authorized)
        );
        assert_eq!(f.orders.place_calls(), 1);
        assert_eq!(f.ledger.records().len(), 1);
        assert!(session.locked_cart().is_none());
    }

    #[tokio::test]
    async fn pending_callback_places_order_without_recording() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;

        let resolution = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "PENDING", "ORDER123"))
            .await
            .unwrap();

        assert_eq!(resolution.kind(), ResolutionKind::Pending);
        assert_eq!(f.orders.order_count(), 1);
        assert!(f.ledger.records().is_empty());
    }

    #[tokio::test]
    async fn cancelled_callback_restores_cart_without_order() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;

        let resolution = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "CANCELLED", "ORDER123"))
            .await
            .unwrap();

        assert_eq!(resolution.kind(), ResolutionKind::Rejected);
        assert_eq!(f.orders.place_calls(), 0);
        assert_eq!(f.store.live_cart(&reference()), Some(cart()));
        assert_eq!(
            session.status(),
            PaymentSessionStatus::Resolved(ResolutionKind::Rejected)
        );
    }

    #[tokio::test]
    async fn tampered_callback_is_rejected_without_state_change() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;
        let mut cmd = signed_callback(&f.settings, "REFUSED", "ORDER123");
        cmd.received_fields
            .insert(fields::AUTH_RESULT.to_string(), "AUTHORISED".to_string());

        let result = f.handler.handle(&mut session, cmd).await;

        assert!(matches!(result, Err(CheckoutError::Signature)));
        assert_eq!(session.status(), PaymentSessionStatus::AwaitingRedirectResult);
        assert_eq!(session.locked_cart(), Some(&cart()));
        assert!(f.store.is_locked(&reference()));
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;
        let mut cmd = signed_callback(&f.settings, "AUTHORISED", "ORDER123");
        cmd.received_fields.remove(fields::MERCHANT_SIG);

        let result = f.handler.handle(&mut session, cmd).await;

        assert!(matches!(result, Err(CheckoutError::Signature)));
        assert_eq!(f.orders.place_calls(), 0);
    }

    #[tokio::test]
    async fn unsigned_extra_fields_are_ignored() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;
        let mut cmd = signed_callback(&f.settings, "AUTHORISED", "ORDER123");
        cmd.received_fields
            .insert("utm_source".to_string(), "newsletter".to_string());

        let resolution = f.handler.handle(&mut session, cmd).await.unwrap();

        assert_eq!(resolution.kind(), ResolutionKind::Authorized);
    }

    #[tokio::test]
    async fn duplicate_callback_recovers_same_order() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;
        let first = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER123"))
            .await
            .unwrap();

        let second = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER123"))
            .await
            .unwrap();

        assert_eq!(second.kind(), ResolutionKind::Recovered);
        assert_eq!(second.order(), first.order());
        assert_eq!(f.orders.place_calls(), 1);
        assert_eq!(
            session.status(),
            PaymentSessionStatus::Resolved(ResolutionKind::Authorized)
        );
    }

    #[tokio::test]
    async fn authorised_callback_without_cart_or_order_is_order_not_found() {
        let f = fixture();
        let mut session = PaymentSession::new(reference());
        // The store lost the parked cart.
        session.await_redirect(cart(), None).unwrap();

        let result = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER123"))
            .await;

        assert!(matches!(result, Err(CheckoutError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn callback_for_another_reference_is_mismatch() {
        let f = fixture();
        let mut session = awaiting_session(&f.store).await;

        let result = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER999"))
            .await;

        assert!(matches!(result, Err(CheckoutError::ChallengeMismatch)));
        assert_eq!(session.status(), PaymentSessionStatus::AwaitingRedirectResult);
        assert_eq!(f.orders.place_calls(), 0);
    }

    #[tokio::test]
    async fn callback_before_begin_is_invalid_state() {
        let f = fixture();
        let mut session = PaymentSession::new(reference());

        let result = f
            .handler
            .handle(&mut session, signed_callback(&f.settings, "AUTHORISED", "ORDER123"))
            .await;

        assert!(matches!(result, Err(CheckoutError::InvalidState(_))));
    }
}
