//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REDIRECT_CHECKOUT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use redirect_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let settings = config.merchant_settings().expect("Invalid merchant settings");
//! println!("Payment page at {}", settings.hpp_url());
//! ```

mod error;
mod hosted_page;
mod logging;
mod merchant;

pub use error::{ConfigError, ValidationError};
pub use hosted_page::{HostedPageConfig, PaymentEnvironment};
pub use logging::LoggingConfig;
pub use merchant::MerchantConfig;

use serde::Deserialize;

use crate::domain::checkout::{CheckoutError, MerchantSettings};
use crate::domain::signing::SignatureCodec;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Merchant account and HMAC key
    pub merchant: MerchantConfig,

    /// Hosted payment page environment and session window
    #[serde(default)]
    pub hosted_page: HostedPageConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REDIRECT_CHECKOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REDIRECT_CHECKOUT__MERCHANT__SKIN_CODE=skin1` -> `merchant.skin_code = skin1`
    /// - `REDIRECT_CHECKOUT__HOSTED_PAGE__ENVIRONMENT=live` -> `hosted_page.environment = live`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REDIRECT_CHECKOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.merchant.validate()?;
        self.hosted_page.validate()?;
        Ok(())
    }

    /// Build the domain settings used to sign and verify redirects.
    ///
    /// Fails with `CheckoutError::Configuration` when the key cannot be
    /// decoded or a required value is blank.
    pub fn merchant_settings(&self) -> Result<MerchantSettings, CheckoutError> {
        let secret = self.merchant.hmac_secret()?;
        let settings = MerchantSettings::new(
            self.merchant.merchant_account.clone(),
            self.merchant.skin_code.clone(),
            secret,
            self.hosted_page.endpoint(),
            self.hosted_page.session_validity_minutes,
        )?
        .with_codec(SignatureCodec::new(self.hosted_page.signature_encoding));
        Ok(settings)
    }
}
