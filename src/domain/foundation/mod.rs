//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types and the state machine
//! trait that the checkout and signing modules build on.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MerchantReference, PaymentSessionId, PspReference};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
