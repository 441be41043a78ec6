//! Per-store merchant settings used to sign and verify redirects.

use crate::domain::signing::{HmacSecret, SignatureCodec};

use super::errors::CheckoutError;
use super::fields::HPP_DETAILS_PATH;

/// Merchant account, skin and key material for one store.
///
/// Built once from configuration; construction fails fast when anything
/// needed to sign is missing.
#[derive(Debug)]
pub struct MerchantSettings {
    merchant_account: String,
    skin_code: String,
    secret: HmacSecret,
    codec: SignatureCodec,
    hpp_endpoint: String,
    session_validity_minutes: i64,
}

impl MerchantSettings {
    pub fn new(
        merchant_account: impl Into<String>,
        skin_code: impl Into<String>,
        secret: HmacSecret,
        hpp_endpoint: impl Into<String>,
        session_validity_minutes: i64,
    ) -> Result<Self, CheckoutError> {
        let merchant_account = merchant_account.into();
        let skin_code = skin_code.into();
        let hpp_endpoint = hpp_endpoint.into();

        if merchant_account.trim().is_empty() {
            return Err(CheckoutError::configuration("merchant account is not configured"));
        }
        if skin_code.trim().is_empty() {
            return Err(CheckoutError::configuration("skin code is not configured"));
        }
        if hpp_endpoint.trim().is_empty() {
            return Err(CheckoutError::configuration("payment page endpoint is not configured"));
        }
        if session_validity_minutes <= 0 {
            return Err(CheckoutError::configuration(
                "session validity must be a positive number of minutes",
            ));
        }

        Ok(Self {
            merchant_account,
            skin_code,
            secret,
            codec: SignatureCodec::default(),
            hpp_endpoint,
            session_validity_minutes,
        })
    }

    pub fn with_codec(mut self, codec: SignatureCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn merchant_account(&self) -> &str {
        &self.merchant_account
    }

    pub fn skin_code(&self) -> &str {
        &self.skin_code
    }

    pub fn secret(&self) -> &HmacSecret {
        &self.secret
    }

    pub fn codec(&self) -> SignatureCodec {
        self.codec
    }

    pub fn session_validity_minutes(&self) -> i64 {
        self.session_validity_minutes
    }

    /// Form action URL of the hosted payment page.
    pub fn hpp_url(&self) -> String {
        format!(
            "{}{}",
            self.hpp_endpoint.trim_end_matches('/'),
            HPP_DETAILS_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signing::HmacKeyFormat;

    fn secret() -> HmacSecret {
        HmacSecret::from_config("k1", HmacKeyFormat::Raw).unwrap()
    }

    #[test]
    fn hpp_url_appends_details_path() {
        let settings =
            MerchantSettings::new("ShopAccount", "skin1", secret(), "https://test.example/hpp/", 60)
                .unwrap();
        assert_eq!(settings.hpp_url(), "https://test.example/hpp/details.shtml");
    }

    #[test]
    fn missing_merchant_account_is_configuration_error() {
        let result = MerchantSettings::new("", "skin1", secret(), "https://x", 60);
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }

    #[test]
    fn missing_skin_code_is_configuration_error() {
        let result = MerchantSettings::new("ShopAccount", " ", secret(), "https://x", 60);
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }

    #[test]
    fn non_positive_validity_is_configuration_error() {
        let result = MerchantSettings::new("ShopAccount", "skin1", secret(), "https://x", 0);
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }

    #[test]
    fn debug_output_redacts_key() {
        let settings =
            MerchantSettings::new("ShopAccount", "skin1", secret(), "https://x", 60).unwrap();
        let rendered = format!("{:?}", settings);
        assert!(rendered.contains("ShopAccount"));
        assert!(rendered.contains("HmacSecret([REDACTED])"));
    }
}
