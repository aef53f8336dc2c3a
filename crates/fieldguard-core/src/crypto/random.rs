//! Secure random bytes and tokens.
//!
//! Everything here draws from the operating system CSPRNG via `getrandom`.
//! There is no seedable generator in this crate.

use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{ProtectionError, Result};

/// Largest token `generate_token` will produce, in bytes.
pub const MAX_TOKEN_BYTES: usize = 1024;

/// Text encoding for generated tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    #[default]
    Hex,
    Base64,
    /// URL-safe alphabet, no padding.
    Base64Url,
}

impl TokenEncoding {
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
            Self::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

impl FromStr for TokenEncoding {
    type Err = ProtectionError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" | "base64_url" => Ok(Self::Base64Url),
            other => Err(ProtectionError::InvalidInput(format!(
                "unknown token encoding: {}",
                other
            ))),
        }
    }
}

/// Fill `buf` from the OS CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf).map_err(|e| ProtectionError::Random(e.to_string()))
}

/// Draw `len` random bytes.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

/// Generate a random token of `byte_length` bytes, text-encoded.
///
/// # Errors
///
/// Returns `ProtectionError::InvalidInput` unless `byte_length` is in
/// `1..=MAX_TOKEN_BYTES`.
///
/// # Examples
///
/// ```
/// use fieldguard_core::crypto::{generate_token, TokenEncoding};
///
/// let token = generate_token(32, TokenEncoding::Hex).unwrap();
/// assert_eq!(token.len(), 64);
/// ```
pub fn generate_token(byte_length: usize, encoding: TokenEncoding) -> Result<String> {
    if byte_length == 0 || byte_length > MAX_TOKEN_BYTES {
        return Err(ProtectionError::InvalidInput(format!(
            "token length must be between 1 and {} bytes (got {})",
            MAX_TOKEN_BYTES, byte_length
        )));
    }
    let bytes = random_bytes(byte_length)?;
    Ok(encoding.encode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_token_length() {
        let token = generate_token(16, TokenEncoding::Hex).unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_base64_token_decodes_to_requested_length() {
        let token = generate_token(24, TokenEncoding::Base64).unwrap();
        assert_eq!(STANDARD.decode(token).unwrap().len(), 24);
    }

    #[test]
    fn test_base64url_token_is_url_safe() {
        let token = generate_token(48, TokenEncoding::Base64Url).unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_tokens_differ() {
        let a = generate_token(32, TokenEncoding::Hex).unwrap();
        let b = generate_token(32, TokenEncoding::Hex).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_lengths_rejected() {
        assert!(matches!(
            generate_token(0, TokenEncoding::Hex),
            Err(ProtectionError::InvalidInput(_))
        ));
        assert!(generate_token(MAX_TOKEN_BYTES + 1, TokenEncoding::Hex).is_err());
        assert!(generate_token(MAX_TOKEN_BYTES, TokenEncoding::Hex).is_ok());
    }

    #[test]
    fn test_random_bytes_not_all_zero() {
        let bytes = random_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|b| *b != 0));
    }

    #[test]
    fn test_encoding_parse() {
        assert_eq!("HEX".parse::<TokenEncoding>().unwrap(), TokenEncoding::Hex);
        assert_eq!(
            "base64url".parse::<TokenEncoding>().unwrap(),
            TokenEncoding::Base64Url
        );
        assert!("base32".parse::<TokenEncoding>().is_err());
    }
}
