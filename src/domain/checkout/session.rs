//! PaymentSession - one in-flight payment attempt across redirects.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{MerchantReference, PaymentSessionId, StateMachine, Timestamp};

use super::cart::Cart;
use super::errors::CheckoutError;
use super::outcome::ProcessorResult;
use super::status::{PaymentSessionStatus, ResolutionKind};

/// Session context passed explicitly to every checkout operation.
///
/// The host keeps it in the shopper's session storage between redirects.
/// While the attempt is open the session is the only owner of the locked
/// cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    id: PaymentSessionId,
    merchant_reference: MerchantReference,
    status: PaymentSessionStatus,
    locked_cart: Option<Cart>,
    expected_challenge: Option<String>,
    #[serde(default)]
    rejection: Option<ProcessorResult>,
    created_at: Timestamp,
}

impl PaymentSession {
    pub fn new(merchant_reference: MerchantReference) -> Self {
        Self {
            id: PaymentSessionId::new(),
            merchant_reference,
            status: PaymentSessionStatus::Initialized,
            locked_cart: None,
            expected_challenge: None,
            rejection: None,
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> PaymentSessionId {
        self.id
    }

    pub fn merchant_reference(&self) -> &MerchantReference {
        &self.merchant_reference
    }

    pub fn status(&self) -> PaymentSessionStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn locked_cart(&self) -> Option<&Cart> {
        self.locked_cart.as_ref()
    }

    pub fn has_expected_challenge(&self) -> bool {
        self.expected_challenge.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// Processor answer that rejected this attempt, if it was rejected.
    pub fn rejection(&self) -> Option<&ProcessorResult> {
        self.rejection.as_ref()
    }

    /// Records the locked cart (and challenge token, for 3-D Secure) and
    /// moves to `AwaitingRedirectResult`.
    pub fn await_redirect(
        &mut self,
        locked_cart: Cart,
        expected_challenge: Option<String>,
    ) -> Result<(), CheckoutError> {
        if locked_cart.code != self.merchant_reference {
            return Err(CheckoutError::invalid_state(format!(
                "cart {} does not belong to session for {}",
                locked_cart.code, self.merchant_reference
            )));
        }

        self.status = self
            .status
            .transition_to(PaymentSessionStatus::AwaitingRedirectResult)?;
        self.locked_cart = Some(locked_cart);
        self.expected_challenge = expected_challenge;
        Ok(())
    }

    /// Hands the locked cart snapshot back to the caller. Returns `None`
    /// once it has been taken.
    pub fn take_locked_cart(&mut self) -> Option<Cart> {
        self.locked_cart.take()
    }

    /// Gives a taken snapshot back to a session that is still waiting,
    /// so the same redirect result can be processed again.
    pub fn relock(&mut self, cart: Cart) -> Result<(), CheckoutError> {
        if self.status != PaymentSessionStatus::AwaitingRedirectResult {
            return Err(CheckoutError::invalid_state(format!(
                "cannot relock cart while {:?}",
                self.status
            )));
        }
        if cart.code != self.merchant_reference {
            return Err(CheckoutError::invalid_state(format!(
                "cart {} does not belong to session for {}",
                cart.code, self.merchant_reference
            )));
        }
        if self.locked_cart.is_some() {
            return Err(CheckoutError::invalid_state("session already holds a locked cart"));
        }
        self.locked_cart = Some(cart);
        Ok(())
    }

    /// Constant-time check of an echoed challenge token.
    ///
    /// A session that never issued a challenge matches nothing.
    pub fn challenge_matches(&self, echoed: &str) -> bool {
        match &self.expected_challenge {
            Some(expected) => {
                expected.len() == echoed.len()
                    && bool::from(expected.as_bytes().ct_eq(echoed.as_bytes()))
            }
            None => false,
        }
    }

    /// Moves to a terminal resolution and drops the cart snapshot.
    ///
    /// The challenge token is kept so a replayed reply still binds to this
    /// session and can be answered from the placed order.
    pub fn resolve(&mut self, kind: ResolutionKind) -> Result<(), CheckoutError> {
        self.status = self.status.transition_to(PaymentSessionStatus::Resolved(kind))?;
        self.locked_cart = None;
        Ok(())
    }

    /// Resolves as rejected and keeps the processor answer, so a replayed
    /// redirect result gets the same answer back.
    pub fn reject(&mut self, result: ProcessorResult) -> Result<(), CheckoutError> {
        self.resolve(ResolutionKind::Rejected)?;
        self.rejection = Some(result);
        Ok(())
    }

    /// Ends the attempt after a session-binding violation.
    pub fn abort(&mut self) -> Result<(), CheckoutError> {
        self.status = self.status.transition_to(PaymentSessionStatus::Aborted)?;
        self.locked_cart = None;
        self.expected_challenge = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{Amount, ResultCode};

    fn reference() -> MerchantReference {
        MerchantReference::new("ORDER123").unwrap()
    }

    fn cart() -> Cart {
        Cart::new(reference(), Amount::new(1000, "EUR").unwrap())
    }

    #[test]
    fn new_session_is_initialized_without_cart() {
        let session = PaymentSession::new(reference());
        assert_eq!(session.status(), PaymentSessionStatus::Initialized);
        assert!(session.locked_cart().is_none());
        assert!(!session.has_expected_challenge());
    }

    #[test]
    fn await_redirect_stores_cart_and_challenge() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();

        assert_eq!(session.status(), PaymentSessionStatus::AwaitingRedirectResult);
        assert_eq!(session.locked_cart(), Some(&cart()));
        assert!(session.challenge_matches("md-1"));
    }

    #[test]
    fn await_redirect_rejects_foreign_cart() {
        let mut session = PaymentSession::new(reference());
        let foreign = Cart::new(
            MerchantReference::new("OTHER").unwrap(),
            Amount::new(1, "EUR").unwrap(),
        );

        let result = session.await_redirect(foreign, None);

        assert!(matches!(result, Err(CheckoutError::InvalidState(_))));
        assert_eq!(session.status(), PaymentSessionStatus::Initialized);
    }

    #[test]
    fn await_redirect_twice_is_invalid() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();

        assert!(matches!(
            session.await_redirect(cart(), None),
            Err(CheckoutError::InvalidState(_))
        ));
    }

    #[test]
    fn take_locked_cart_only_once() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();

        assert!(session.take_locked_cart().is_some());
        assert!(session.take_locked_cart().is_none());
    }

    #[test]
    fn challenge_without_expected_token_never_matches() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();

        assert!(!session.challenge_matches(""));
        assert!(!session.challenge_matches("md-1"));
    }

    #[test]
    fn challenge_mismatch_detected() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();

        assert!(!session.challenge_matches("md-2"));
        assert!(!session.challenge_matches("md-10"));
    }

    #[test]
    fn resolve_drops_cart_and_keeps_challenge() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();

        session.resolve(ResolutionKind::Authorized).unwrap();

        assert!(session.is_resolved());
        assert!(session.locked_cart().is_none());
        assert!(session.challenge_matches("md-1"));
    }

    #[test]
    fn resolved_session_cannot_resolve_again() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();
        session.resolve(ResolutionKind::Rejected).unwrap();

        assert!(session.resolve(ResolutionKind::Recovered).is_err());
    }

    #[test]
    fn relock_returns_snapshot_to_waiting_session() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();
        let taken = session.take_locked_cart().unwrap();

        session.relock(taken).unwrap();

        assert_eq!(session.locked_cart(), Some(&cart()));
        assert_eq!(session.status(), PaymentSessionStatus::AwaitingRedirectResult);
    }

    #[test]
    fn relock_refused_once_resolved() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();
        session.resolve(ResolutionKind::Authorized).unwrap();

        assert!(matches!(
            session.relock(cart()),
            Err(CheckoutError::InvalidState(_))
        ));
        assert!(session.locked_cart().is_none());
    }

    #[test]
    fn relock_refused_while_snapshot_held() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();

        assert!(session.relock(cart()).is_err());
    }

    #[test]
    fn reject_keeps_processor_answer() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), None).unwrap();

        session
            .reject(ProcessorResult::new(ResultCode::Refused).with_refusal_reason("Refused"))
            .unwrap();

        assert_eq!(
            session.status(),
            PaymentSessionStatus::Resolved(ResolutionKind::Rejected)
        );
        assert_eq!(
            session.rejection().map(|r| r.result_code.clone()),
            Some(ResultCode::Refused)
        );
    }

    #[test]
    fn abort_clears_everything() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();

        session.abort().unwrap();

        assert_eq!(session.status(), PaymentSessionStatus::Aborted);
        assert!(session.locked_cart().is_none());
        assert!(!session.challenge_matches("md-1"));
    }

    #[test]
    fn session_round_trips_through_session_storage() {
        let mut session = PaymentSession::new(reference());
        session.await_redirect(cart(), Some("md-1".to_string())).unwrap();

        let stored = serde_json::to_string(&session).unwrap();
        let restored: PaymentSession = serde_json::from_str(&stored).unwrap();

        assert_eq!(restored.id(), session.id());
        assert_eq!(restored.status(), PaymentSessionStatus::AwaitingRedirectResult);
        assert!(restored.challenge_matches("md-1"));
    }
}
