//! Terminal result of a payment session.

use serde::{Deserialize, Serialize};

use super::cart::Order;
use super::outcome::ProcessorResult;
use super::status::ResolutionKind;

/// How a payment attempt ended, with the order or processor answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum PaymentResolution {
    Authorized { order: Order },
    Pending { order: Order },
    /// The order already existed (duplicate or out-of-order callback).
    Recovered { order: Order },
    /// No order. Carries the processor answer for the caller to display.
    Rejected { result: ProcessorResult },
}

impl PaymentResolution {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            PaymentResolution::Authorized { .. } => ResolutionKind::Authorized,
            PaymentResolution::Pending { .. } => ResolutionKind::Pending,
            PaymentResolution::Recovered { .. } => ResolutionKind::Recovered,
            PaymentResolution::Rejected { .. } => ResolutionKind::Rejected,
        }
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            PaymentResolution::Authorized { order }
            | PaymentResolution::Pending { order }
            | PaymentResolution::Recovered { order } => Some(order),
            PaymentResolution::Rejected { .. } => None,
        }
    }
}
