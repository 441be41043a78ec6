//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod checkout;

pub use checkout::{
    AuthorisePaymentCommand, AuthorisePaymentHandler, AuthorisePaymentResult,
    BeginRedirectPaymentCommand, BeginRedirectPaymentHandler, HandleChallengeReplyCommand,
    HandleChallengeReplyHandler, HandleRedirectCallbackCommand, HandleRedirectCallbackHandler,
};
