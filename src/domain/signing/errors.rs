//! Signing configuration errors.

use thiserror::Error;

/// Problems with the key material, raised before any signature is computed.
///
/// A signature that merely fails to match is not an error here:
/// verification reports that as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("HMAC secret is not configured")]
    MissingSecret,

    #[error("HMAC secret is invalid: {0}")]
    InvalidSecret(String),
}
