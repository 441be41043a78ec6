//! Outbound payload for the hosted payment page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::signing::SignedPayload;

use super::cart::Cart;
use super::fields;
use super::settings::MerchantSettings;

/// Form the shopper's browser posts to the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedPaymentForm {
    pub action_url: String,
    /// Signed fields plus `merchantSig`.
    pub fields: BTreeMap<String, String>,
}

impl HostedPaymentForm {
    pub fn signature(&self) -> Option<&str> {
        self.fields.get(fields::MERCHANT_SIG).map(String::as_str)
    }
}

/// Builds the unsigned outbound payload for `cart`.
///
/// Optional hints that are absent on the cart are left out rather than sent
/// as empty strings.
pub fn build_hosted_payment_payload(
    cart: &Cart,
    settings: &MerchantSettings,
    return_url: &str,
    now: Timestamp,
) -> SignedPayload {
    let session_validity = now
        .add_minutes(settings.session_validity_minutes())
        .to_wire_string();

    let mut payload = SignedPayload::new();
    payload
        .insert(fields::PAYMENT_AMOUNT, cart.total.minor_units().to_string())
        .insert(fields::CURRENCY_CODE, cart.total.currency())
        .insert(fields::SHIP_BEFORE_DATE, session_validity.clone())
        .insert(fields::MERCHANT_REFERENCE, cart.code.as_str())
        .insert(fields::SKIN_CODE, settings.skin_code())
        .insert(fields::MERCHANT_ACCOUNT, settings.merchant_account())
        .insert(fields::SESSION_VALIDITY, session_validity)
        .insert_optional(fields::COUNTRY_CODE, cart.delivery_country.clone())
        .insert_optional(fields::BRAND_CODE, cart.brand_code.clone())
        .insert_optional(fields::ISSUER_ID, cart.issuer_id.clone())
        .insert_optional(fields::DF_VALUE, cart.device_fingerprint.clone())
        .insert(fields::RES_URL, return_url);
    payload
}
