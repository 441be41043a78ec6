//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `signing` - Canonical payload encoding and HMAC signatures
//! - `checkout` - Redirect payment session lifecycle and outcomes

pub mod checkout;
pub mod foundation;
pub mod signing;
