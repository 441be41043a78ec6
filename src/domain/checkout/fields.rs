//! Wire field names of the hosted payment page protocol.
//!
//! These names and both allow-lists are part of the signed contract with the
//! processor and must stay byte-exact.

// Outbound request fields.
pub const PAYMENT_AMOUNT: &str = "paymentAmount";
pub const CURRENCY_CODE: &str = "currencyCode";
pub const SHIP_BEFORE_DATE: &str = "shipBeforeDate";
pub const MERCHANT_REFERENCE: &str = "merchantReference";
pub const SKIN_CODE: &str = "skinCode";
pub const MERCHANT_ACCOUNT: &str = "merchantAccount";
pub const SESSION_VALIDITY: &str = "sessionValidity";
pub const BRAND_CODE: &str = "brandCode";
pub const ISSUER_ID: &str = "issuerId";
pub const COUNTRY_CODE: &str = "countryCode";
pub const RES_URL: &str = "resURL";
pub const DF_VALUE: &str = "dfValue";

// Inbound response fields.
pub const AUTH_RESULT: &str = "authResult";
pub const PAYMENT_METHOD: &str = "paymentMethod";
pub const PSP_REFERENCE: &str = "pspReference";
pub const SHOPPER_LOCALE: &str = "shopperLocale";

/// Signature field, present in both directions and never itself signed.
pub const MERCHANT_SIG: &str = "merchantSig";

/// Fields that may appear in the outbound signed payload.
pub const OUTBOUND_FIELDS: &[&str] = &[
    PAYMENT_AMOUNT,
    CURRENCY_CODE,
    SHIP_BEFORE_DATE,
    MERCHANT_REFERENCE,
    SKIN_CODE,
    MERCHANT_ACCOUNT,
    SESSION_VALIDITY,
    BRAND_CODE,
    ISSUER_ID,
    COUNTRY_CODE,
    RES_URL,
    DF_VALUE,
];

/// Fields of a redirect callback that are covered by its signature.
pub const INBOUND_SIGNED_FIELDS: &[&str] = &[
    AUTH_RESULT,
    MERCHANT_REFERENCE,
    PAYMENT_METHOD,
    PSP_REFERENCE,
    SHOPPER_LOCALE,
    SKIN_CODE,
];

/// Path appended to the environment's endpoint to reach the payment page.
pub const HPP_DETAILS_PATH: &str = "/details.shtml";
