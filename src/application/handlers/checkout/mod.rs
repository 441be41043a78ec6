//! Checkout handlers - redirect payment commands.
//!
//! Each handler takes the shopper's `PaymentSession` by mutable reference;
//! the host loads it before the call and stores it afterwards.

mod authorise_payment;
mod begin_redirect_payment;
mod handle_challenge_reply;
mod handle_redirect_callback;
mod order_resolution;

pub use authorise_payment::{
    AuthorisePaymentCommand, AuthorisePaymentHandler, AuthorisePaymentResult,
};
pub use begin_redirect_payment::{BeginRedirectPaymentCommand, BeginRedirectPaymentHandler};
pub use handle_challenge_reply::{HandleChallengeReplyCommand, HandleChallengeReplyHandler};
pub use handle_redirect_callback::{HandleRedirectCallbackCommand, HandleRedirectCallbackHandler};
