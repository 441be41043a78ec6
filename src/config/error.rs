//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid HMAC key: {0}")]
    InvalidHmacKey(String),

    #[error("Session validity must be between 1 and 1440 minutes")]
    InvalidSessionValidity,

    #[error("Invalid payment page endpoint URL")]
    InvalidEndpoint,

    #[error("Payment page endpoint must use HTTPS in live environment")]
    EndpointMustBeHttps,
}
