//! HMAC key material scoped to one merchant configuration.

use std::fmt;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::errors::SigningError;

/// How the HMAC key is written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmacKeyFormat {
    /// Key bytes are the UTF-8 bytes of the configured string.
    Raw,
    /// Key is a hex string, as issued by the processor's back office.
    #[default]
    Hex,
}

/// Opaque HMAC signing key. `Debug` output never shows the key bytes.
pub struct HmacSecret(Secret<Vec<u8>>);

impl fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacSecret([REDACTED])")
    }
}

impl HmacSecret {
    /// Wraps raw key bytes. Empty keys are a configuration error.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, SigningError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SigningError::MissingSecret);
        }
        Ok(Self(Secret::new(bytes)))
    }

    /// Decodes a hex-encoded key.
    pub fn from_hex(encoded: &str) -> Result<Self, SigningError> {
        let trimmed = encoded.trim();
        if trimmed.is_empty() {
            return Err(SigningError::MissingSecret);
        }
        let bytes = hex::decode(trimmed)
            .map_err(|e| SigningError::InvalidSecret(format!("key is not valid hex: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Builds a key from its configured representation.
    pub fn from_config(value: &str, format: HmacKeyFormat) -> Result<Self, SigningError> {
        match format {
            HmacKeyFormat::Raw => Self::from_bytes(value.as_bytes().to_vec()),
            HmacKeyFormat::Hex => Self::from_hex(value),
        }
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raw_key_is_missing() {
        assert!(matches!(
            HmacSecret::from_bytes(Vec::new()),
            Err(SigningError::MissingSecret)
        ));
    }

    #[test]
    fn blank_hex_key_is_missing() {
        assert!(matches!(
            HmacSecret::from_hex("  "),
            Err(SigningError::MissingSecret)
        ));
    }

    #[test]
    fn invalid_hex_key_is_rejected() {
        assert!(matches!(
            HmacSecret::from_hex("zz11"),
            Err(SigningError::InvalidSecret(_))
        ));
    }

    #[test]
    fn hex_key_is_decoded_to_bytes() {
        let secret = HmacSecret::from_hex("0aff").unwrap();
        assert_eq!(secret.expose(), &[0x0a, 0xff]);
    }

    #[test]
    fn raw_key_uses_utf8_bytes() {
        let secret = HmacSecret::from_config("k1", HmacKeyFormat::Raw).unwrap();
        assert_eq!(secret.expose(), b"k1");
    }

    #[test]
    fn debug_output_does_not_leak_key() {
        let secret = HmacSecret::from_config("supersecret", HmacKeyFormat::Raw).unwrap();
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("supersecret"));
        assert_eq!(rendered, "HmacSecret([REDACTED])");
    }

    #[test]
    fn hex_key_debug_hides_encoded_and_decoded_forms() {
        let secret = HmacSecret::from_hex("deadbeef").unwrap();
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("deadbeef"));
        assert_eq!(rendered, "HmacSecret([REDACTED])");
    }
}
