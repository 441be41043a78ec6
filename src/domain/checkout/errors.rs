//! Checkout error types.
//!
//! A refused payment is not an error: it resolves the session as
//! `Rejected` and is returned as a normal result.

use thiserror::Error;

use crate::domain::foundation::{DomainError, MerchantReference, ValidationError};
use crate::domain::signing::SigningError;

/// Errors raised while driving a payment session.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// Missing or invalid merchant configuration. Raised before any payload
    /// is built or verified.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redirect callback signature did not verify.
    #[error("Signature verification failed")]
    Signature,

    /// Echoed challenge token or reference does not belong to this session.
    #[error("Challenge token does not match the payment session")]
    ChallengeMismatch,

    /// The locked cart is gone, usually consumed by an earlier callback.
    #[error("Locked cart for {0} is no longer available")]
    CartUnavailable(MerchantReference),

    /// Neither the cart nor an order exists for the reference.
    #[error("No order found for merchant reference {0}")]
    OrderNotFound(MerchantReference),

    /// Operation not valid in the session's current state.
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// The processor client failed (network, authentication, ...).
    #[error("Processor error: {message}")]
    Processor { message: String, retryable: bool },

    /// A host collaborator (cart store, order placer) failed.
    #[error("Infrastructure error: {0}")]
    Infrastructure(DomainError),
}

impl CheckoutError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CheckoutError::Configuration(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CheckoutError::InvalidState(message.into())
    }

    /// True for errors that end the flow with a message to the shopper.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            CheckoutError::Configuration(_)
                | CheckoutError::Signature
                | CheckoutError::ChallengeMismatch
        )
    }

    /// True for tampering or replay indicators.
    pub fn is_security_event(&self) -> bool {
        matches!(self, CheckoutError::Signature | CheckoutError::ChallengeMismatch)
    }

    /// True when the same call may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Processor { retryable, .. } => *retryable,
            CheckoutError::Infrastructure(_) => true,
            _ => false,
        }
    }
}

impl From<SigningError> for CheckoutError {
    fn from(err: SigningError) -> Self {
        CheckoutError::Configuration(err.to_string())
    }
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        CheckoutError::Infrastructure(err)
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::InvalidState(err.to_string())
    }
}
