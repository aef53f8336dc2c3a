//! HMAC-SHA256 message signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ProtectionError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const SIGNATURE_LENGTH: usize = 32;

/// An HMAC tag bound to a message and a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacSignature([u8; SIGNATURE_LENGTH]);

impl HmacSignature {
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex-encoded signature.
    ///
    /// # Errors
    ///
    /// Returns `ProtectionError::Encoding` for malformed hex or a tag that is
    /// not exactly [`SIGNATURE_LENGTH`] bytes.
    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim())
            .map_err(|e| ProtectionError::Encoding(format!("invalid signature hex: {}", e)))?;
        let array: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            ProtectionError::Encoding(format!(
                "signature must be {} bytes (got {})",
                SIGNATURE_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }
}

fn keyed_mac(secret: &[u8]) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(secret)
        .map_err(|e| ProtectionError::Crypto(format!("Failed to initialize HMAC: {}", e)))
}

/// Sign `message` with `secret`.
///
/// # Examples
///
/// ```
/// use fieldguard_core::crypto::{sign, verify};
///
/// let sig = sign(b"sensor-7:23.5C", b"shared-secret").unwrap();
/// assert!(verify(b"sensor-7:23.5C", sig.as_bytes(), b"shared-secret"));
/// ```
pub fn sign(message: &[u8], secret: &[u8]) -> Result<HmacSignature> {
    let mut mac = keyed_mac(secret)?;
    mac.update(message);
    Ok(HmacSignature(mac.finalize().into_bytes().into()))
}

/// Check `signature` over `message` in constant time.
///
/// Returns false for any mismatch, including a signature of the wrong length.
pub fn verify(message: &[u8], signature: &[u8], secret: &[u8]) -> bool {
    let Ok(mut mac) = keyed_mac(secret) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(signature).is_ok()
}

/// Like [`verify`], for a hex-encoded signature.
pub fn verify_hex(message: &[u8], signature_hex: &str, secret: &[u8]) -> Result<bool> {
    let signature = hex::decode(signature_hex.trim())
        .map_err(|e| ProtectionError::Encoding(format!("invalid signature hex: {}", e)))?;
    Ok(verify(message, &signature, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let sig = sign(b"task:irrigate-block-4", b"secret").unwrap();
        assert!(verify(b"task:irrigate-block-4", sig.as_bytes(), b"secret"));
    }

    #[test]
    fn test_rfc4231_case_2() {
        let sig = sign(b"what do ya want for nothing?", b"Jefe").unwrap();
        assert_eq!(
            sig.to_hex(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_altered_message_fails() {
        let sig = sign(b"qty=10", b"secret").unwrap();
        assert!(!verify(b"qty=11", sig.as_bytes(), b"secret"));
    }

    #[test]
    fn test_altered_signature_fails() {
        let sig = sign(b"qty=10", b"secret").unwrap();
        let mut bytes = *sig.as_bytes();
        bytes[31] ^= 0x01;
        assert!(!verify(b"qty=10", &bytes, b"secret"));
    }

    #[test]
    fn test_altered_secret_fails() {
        let sig = sign(b"qty=10", b"secret").unwrap();
        assert!(!verify(b"qty=10", sig.as_bytes(), b"secreT"));
    }

    #[test]
    fn test_truncated_signature_fails() {
        let sig = sign(b"qty=10", b"secret").unwrap();
        assert!(!verify(b"qty=10", &sig.as_bytes()[..16], b"secret"));
        assert!(!verify(b"qty=10", &[], b"secret"));
    }

    #[test]
    fn test_hex_round_trip_and_verify_hex() {
        let sig = sign(b"payload", b"k").unwrap();
        let parsed = HmacSignature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(parsed, sig);
        assert!(verify_hex(b"payload", &sig.to_hex(), b"k").unwrap());
    }

    #[test]
    fn test_malformed_hex_is_encoding_error() {
        assert!(matches!(
            verify_hex(b"payload", "zz-not-hex", b"k"),
            Err(ProtectionError::Encoding(_))
        ));
        assert!(matches!(
            HmacSignature::from_hex("abcd"),
            Err(ProtectionError::Encoding(_))
        ));
    }
}
