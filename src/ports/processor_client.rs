//! Processor client port for direct authorisation calls.
//!
//! The network client itself lives outside this crate; it only has to turn
//! the processor's reply into a [`ProcessorResult`]. Latency and retry
//! policy belong to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{Cart, CheckoutError, ProcessorResult};

/// Port for the payment processor's authorisation API.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    /// Authorises a payment for the cart.
    ///
    /// A 3-D Secure card answers `RedirectShopper` with issuer redirect data.
    async fn authorize(&self, cart: &Cart) -> Result<ProcessorResult, ProcessorError>;

    /// Completes a 3-D Secure authorisation with the issuer's reply.
    async fn authorize_challenge(
        &self,
        pa_res: &str,
        md: &str,
    ) -> Result<ProcessorResult, ProcessorError>;
}

/// Errors from processor client calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorError {
    /// Error code for categorization.
    pub code: ProcessorErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Processor's own error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl ProcessorError {
    /// Create a new processor error.
    pub fn new(code: ProcessorErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::InvalidRequest, message)
    }
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProcessorError {}

impl From<ProcessorError> for CheckoutError {
    fn from(err: ProcessorError) -> Self {
        CheckoutError::Processor {
            message: err.to_string(),
            retryable: err.retryable,
        }
    }
}

/// Processor error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API credentials rejected.
    AuthenticationError,

    /// Request rejected as malformed (e.g. stale PaRes).
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Processor-side failure.
    ProviderError,
}

impl ProcessorErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProcessorErrorCode::NetworkError
                | ProcessorErrorCode::RateLimitExceeded
                | ProcessorErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for ProcessorErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessorErrorCode::NetworkError => "network_error",
            ProcessorErrorCode::AuthenticationError => "authentication_error",
            ProcessorErrorCode::InvalidRequest => "invalid_request",
            ProcessorErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            ProcessorErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
