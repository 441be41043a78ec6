//! Processor result codes and the outcomes they drive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PspReference;

/// Result code reported by the processor.
///
/// Decoded once at the boundary. The hosted page sends upper-case values
/// (`AUTHORISED`), the API title-case (`Authorised`); both decode the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultCode {
    Authorised,
    Pending,
    Received,
    RedirectShopper,
    Refused,
    Cancelled,
    Error,
    /// Anything else, kept verbatim for logging.
    Unknown(String),
}

impl ResultCode {
    pub fn parse(raw: &str) -> Self {
        let code = raw.trim();
        let known = [
            ("authorised", ResultCode::Authorised),
            ("pending", ResultCode::Pending),
            ("received", ResultCode::Received),
            ("redirectshopper", ResultCode::RedirectShopper),
            ("refused", ResultCode::Refused),
            ("cancelled", ResultCode::Cancelled),
            ("error", ResultCode::Error),
        ];

        known
            .into_iter()
            .find(|(name, _)| code.eq_ignore_ascii_case(name))
            .map(|(_, result)| result)
            .unwrap_or_else(|| ResultCode::Unknown(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::Authorised => "Authorised",
            ResultCode::Pending => "Pending",
            ResultCode::Received => "Received",
            ResultCode::RedirectShopper => "RedirectShopper",
            ResultCode::Refused => "Refused",
            ResultCode::Cancelled => "Cancelled",
            ResultCode::Error => "Error",
            ResultCode::Unknown(raw) => raw,
        }
    }

    /// Maps the raw code onto the outcome that drives order creation.
    pub fn outcome(&self) -> PaymentOutcome {
        match self {
            ResultCode::Authorised => PaymentOutcome::Authorized,
            ResultCode::Pending | ResultCode::Received => PaymentOutcome::Pending,
            ResultCode::RedirectShopper => PaymentOutcome::RedirectRequired,
            ResultCode::Refused | ResultCode::Cancelled | ResultCode::Unknown(_) => {
                PaymentOutcome::Rejected
            }
            ResultCode::Error => PaymentOutcome::Error("processor reported an error".to_string()),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResultCode {
    fn from(raw: String) -> Self {
        ResultCode::parse(&raw)
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        code.as_str().to_string()
    }
}

/// What a processor answer means for the order pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Authorized,
    /// Received or pending: an order is placed, payment settles later.
    Pending,
    RedirectRequired,
    Rejected,
    Error(String),
}

impl PaymentOutcome {
    /// True when this outcome results in an order being placed.
    pub fn places_order(&self) -> bool {
        matches!(self, PaymentOutcome::Authorized | PaymentOutcome::Pending)
    }
}

/// Issuer redirect details for a 3-D Secure step-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRedirect {
    pub issuer_url: String,
    pub pa_request: String,
    /// Session-binding token echoed back with the challenge reply.
    pub md: String,
}

/// Answer returned by the processor client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorResult {
    pub result_code: ResultCode,
    pub psp_reference: Option<PspReference>,
    pub refusal_reason: Option<String>,
    pub redirect: Option<ChallengeRedirect>,
}

impl ProcessorResult {
    pub fn new(result_code: ResultCode) -> Self {
        Self {
            result_code,
            psp_reference: None,
            refusal_reason: None,
            redirect: None,
        }
    }

    pub fn with_psp_reference(mut self, psp_reference: PspReference) -> Self {
        self.psp_reference = Some(psp_reference);
        self
    }

    pub fn with_refusal_reason(mut self, reason: impl Into<String>) -> Self {
        self.refusal_reason = Some(reason.into());
        self
    }

    pub fn with_redirect(mut self, redirect: ChallengeRedirect) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Outcome of this result; an error carries the refusal reason when given.
    pub fn outcome(&self) -> PaymentOutcome {
        match (&self.result_code, &self.refusal_reason) {
            (ResultCode::Error, Some(reason)) => PaymentOutcome::Error(reason.clone()),
            (code, _) => code.outcome(),
        }
    }
}
