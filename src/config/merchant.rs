//! Merchant account configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::signing::{HmacKeyFormat, HmacSecret, SigningError};

use super::error::ValidationError;

/// Merchant account and HMAC key for the hosted payment page
#[derive(Debug, Deserialize)]
pub struct MerchantConfig {
    /// Merchant account name at the processor
    pub merchant_account: String,

    /// Skin (payment page layout) code
    pub skin_code: String,

    /// HMAC key as shown in the processor's back office
    pub hmac_key: SecretString,

    /// How `hmac_key` is written
    #[serde(default)]
    pub hmac_key_format: HmacKeyFormat,
}

impl MerchantConfig {
    /// Decode the configured key into signing key material
    pub fn hmac_secret(&self) -> Result<HmacSecret, SigningError> {
        HmacSecret::from_config(self.hmac_key.expose_secret(), self.hmac_key_format)
    }

    /// Validate merchant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_account.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__MERCHANT_ACCOUNT"));
        }
        if self.skin_code.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__SKIN_CODE"));
        }
        if self.hmac_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__HMAC_KEY"));
        }
        self.hmac_secret()
            .map_err(|e| ValidationError::InvalidHmacKey(e.to_string()))?;
        Ok(())
    }
}
