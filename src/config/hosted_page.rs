//! Hosted payment page configuration

use serde::Deserialize;

use crate::domain::signing::SignatureEncoding;

use super::error::ValidationError;

const TEST_ENDPOINT: &str = "https://test.adyen.com/hpp";
const LIVE_ENDPOINT: &str = "https://live.adyen.com/hpp";

/// Hosted payment page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HostedPageConfig {
    /// Processor environment
    #[serde(default)]
    pub environment: PaymentEnvironment,

    /// How long the payment page accepts the session, in minutes
    #[serde(default = "default_session_validity")]
    pub session_validity_minutes: i64,

    /// Text encoding of `merchantSig`
    #[serde(default)]
    pub signature_encoding: SignatureEncoding,

    /// Replaces the environment's endpoint (e.g. for a local stub)
    pub endpoint_override: Option<String>,
}

/// Processor environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEnvironment {
    #[default]
    Test,
    Live,
}

impl HostedPageConfig {
    /// Base endpoint of the hosted payment page
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint_override, self.environment) {
            (Some(endpoint), _) => endpoint,
            (None, PaymentEnvironment::Test) => TEST_ENDPOINT,
            (None, PaymentEnvironment::Live) => LIVE_ENDPOINT,
        }
    }

    /// Check if running against the live environment
    pub fn is_live(&self) -> bool {
        self.environment == PaymentEnvironment::Live
    }

    /// Validate hosted page configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=1440).contains(&self.session_validity_minutes) {
            return Err(ValidationError::InvalidSessionValidity);
        }
        if let Some(endpoint) = &self.endpoint_override {
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(ValidationError::InvalidEndpoint);
            }
            if self.is_live() && !endpoint.starts_with("https://") {
                return Err(ValidationError::EndpointMustBeHttps);
            }
        }
        Ok(())
    }
}

impl Default for HostedPageConfig {
    fn default() -> Self {
        Self {
            environment: PaymentEnvironment::default(),
            session_validity_minutes: default_session_validity(),
            signature_encoding: SignatureEncoding::default(),
            endpoint_override: None,
        }
    }
}

fn default_session_validity() -> i64 {
    60
}
