//! Cart, amount and order value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MerchantReference, PspReference, Timestamp, ValidationError};

/// Monetary amount in minor units (cents for EUR, yen for JPY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    minor_units: i64,
    currency: String,
}

impl Amount {
    /// Creates an amount. Currency must be a three-letter upper-case ISO 4217 code.
    pub fn new(minor_units: i64, currency: impl Into<String>) -> Result<Self, ValidationError> {
        if minor_units < 0 {
            return Err(ValidationError::out_of_range(
                "amount",
                0,
                i64::MAX,
                minor_units,
            ));
        }

        let currency = currency.into();
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("expected ISO 4217 code, got '{}'", currency),
            ));
        }

        Ok(Self {
            minor_units,
            currency,
        })
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// Snapshot of the shopper's cart as the payment flow sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart code, used as the merchant reference.
    pub code: MerchantReference,

    pub total: Amount,

    /// ISO country code of the delivery address, if one is set.
    pub delivery_country: Option<String>,

    /// Payment method brand preselected by the shopper.
    pub brand_code: Option<String>,

    /// Issuer preselected for issuer-based methods (e.g. iDEAL).
    pub issuer_id: Option<String>,

    /// Device fingerprint collected on the checkout page.
    pub device_fingerprint: Option<String>,
}

impl Cart {
    pub fn new(code: MerchantReference, total: Amount) -> Self {
        Self {
            code,
            total,
            delivery_country: None,
            brand_code: None,
            issuer_id: None,
            device_fingerprint: None,
        }
    }

    pub fn with_delivery_country(mut self, country: impl Into<String>) -> Self {
        self.delivery_country = Some(country.into());
        self
    }

    pub fn with_brand_code(mut self, brand_code: impl Into<String>) -> Self {
        self.brand_code = Some(brand_code.into());
        self
    }

    pub fn with_issuer_id(mut self, issuer_id: impl Into<String>) -> Self {
        self.issuer_id = Some(issuer_id.into());
        self
    }

    pub fn with_device_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.device_fingerprint = Some(fingerprint.into());
        self
    }
}

/// An order placed from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub code: String,
    pub merchant_reference: MerchantReference,
    pub total: Amount,
    pub psp_reference: Option<PspReference>,
    pub placed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_minor_units_and_iso_code() {
        let amount = Amount::new(1000, "EUR").unwrap();
        assert_eq!(amount.minor_units(), 1000);
        assert_eq!(amount.currency(), "EUR");
    }

    #[test]
    fn amount_rejects_negative_value() {
        assert!(matches!(
            Amount::new(-1, "EUR"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn amount_rejects_malformed_currency() {
        for bad in ["eur", "EURO", "E1R", ""] {
            assert!(
                matches!(Amount::new(1, bad), Err(ValidationError::InvalidFormat { .. })),
                "currency {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn cart_builder_sets_optional_hints() {
        let cart = Cart::new(
            MerchantReference::new("ORDER123").unwrap(),
            Amount::new(1000, "EUR").unwrap(),
        )
        .with_delivery_country("NL")
        .with_brand_code("ideal")
        .with_issuer_id("1121");

        assert_eq!(cart.delivery_country.as_deref(), Some("NL"));
        assert_eq!(cart.brand_code.as_deref(), Some("ideal"));
        assert_eq!(cart.issuer_id.as_deref(), Some("1121"));
        assert!(cart.device_fingerprint.is_none());
    }
}
