//! Signing domain module.
//!
//! Canonical payload representation and HMAC-SHA256 signatures for the
//! hosted payment page redirect protocol.
//!
//! # Module Structure
//!
//! - `payload` - `SignedPayload`, the sorted field map that gets signed
//! - `codec` - `SignatureCodec`, signing string layout, HMAC, verification
//! - `secret` - `HmacSecret` key material
//! - `errors` - key configuration errors

mod codec;
mod errors;
mod payload;
mod secret;

pub use codec::{SignatureCodec, SignatureEncoding};
pub use errors::SigningError;
pub use payload::SignedPayload;
pub use secret::{HmacKeyFormat, HmacSecret};
