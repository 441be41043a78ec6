//! Checkout domain module.
//!
//! The redirect payment session: its state machine, the values it carries
//! and the processor outcomes that resolve it.
//!
//! # Module Structure
//!
//! - `session` - `PaymentSession` context owned by one shopper
//! - `status` - `PaymentSessionStatus` state machine
//! - `outcome` - processor `ResultCode` and `PaymentOutcome`
//! - `resolution` - terminal `PaymentResolution`
//! - `hosted_payment` - outbound payment page payload
//! - `fields` - wire field names and allow-lists

mod cart;
mod errors;
pub mod fields;
mod hosted_payment;
mod outcome;
mod resolution;
mod session;
mod settings;
mod status;

pub use cart::{Amount, Cart, Order};
pub use errors::CheckoutError;
pub use hosted_payment::{build_hosted_payment_payload, HostedPaymentForm};
pub use outcome::{ChallengeRedirect, PaymentOutcome, ProcessorResult, ResultCode};
pub use resolution::PaymentResolution;
pub use session::PaymentSession;
pub use settings::MerchantSettings;
pub use status::{PaymentSessionStatus, ResolutionKind};
