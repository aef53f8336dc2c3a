//! The encryption bundle interchange shape.
//!
//! A bundle is the triple `{ciphertext, nonce, tag}`, each field
//! independently text-encoded. Callers persist it next to an explicit
//! protection-level discriminator; the bundle itself does not carry one.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::BundleEncoding;
use crate::error::{ProtectionError, Result};

/// Output of `encrypt`, input of `decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionBundle {
    pub ciphertext: String,
    pub nonce: String,
    pub tag: String,
}

/// Raw bytes of a bundle after text decoding.
#[derive(Debug)]
pub(crate) struct RawBundle {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub tag: Vec<u8>,
}

impl EncryptionBundle {
    pub(crate) fn encode(
        ciphertext: &[u8],
        nonce: &[u8],
        tag: &[u8],
        encoding: BundleEncoding,
    ) -> Self {
        Self {
            ciphertext: encode_field(ciphertext, encoding),
            nonce: encode_field(nonce, encoding),
            tag: encode_field(tag, encoding),
        }
    }

    pub(crate) fn decode(&self, encoding: BundleEncoding) -> Result<RawBundle> {
        Ok(RawBundle {
            ciphertext: decode_field("ciphertext", &self.ciphertext, encoding)?,
            nonce: decode_field("nonce", &self.nonce, encoding)?,
            tag: decode_field("tag", &self.tag, encoding)?,
        })
    }

    /// Parse a bundle from its JSON form.
    pub fn from_json(value: &str) -> Result<Self> {
        serde_json::from_str(value)
            .map_err(|e| ProtectionError::Encoding(format!("invalid bundle JSON: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ProtectionError::Encoding(format!("bundle serialization failed: {}", e)))
    }
}

fn encode_field(bytes: &[u8], encoding: BundleEncoding) -> String {
    match encoding {
        BundleEncoding::Hex => hex::encode(bytes),
        BundleEncoding::Base64 => STANDARD.encode(bytes),
    }
}

fn decode_field(name: &str, value: &str, encoding: BundleEncoding) -> Result<Vec<u8>> {
    match encoding {
        BundleEncoding::Hex => hex::decode(value)
            .map_err(|e| ProtectionError::Encoding(format!("invalid hex in {}: {}", name, e))),
        BundleEncoding::Base64 => STANDARD
            .decode(value)
            .map_err(|e| ProtectionError::Encoding(format!("invalid base64 in {}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_fields() {
        let bundle = EncryptionBundle::encode(&[0xde, 0xad], &[1, 2], &[0xff], BundleEncoding::Hex);
        assert_eq!(bundle.ciphertext, "dead");
        assert_eq!(bundle.nonce, "0102");
        assert_eq!(bundle.tag, "ff");

        let raw = bundle.decode(BundleEncoding::Hex).unwrap();
        assert_eq!(raw.ciphertext, vec![0xde, 0xad]);
    }

    #[test]
    fn test_base64_fields() {
        let bundle = EncryptionBundle::encode(b"abc", b"n", b"t", BundleEncoding::Base64);
        assert_eq!(bundle.ciphertext, "YWJj");
        let raw = bundle.decode(BundleEncoding::Base64).unwrap();
        assert_eq!(raw.tag, b"t");
    }

    #[test]
    fn test_malformed_field_names_the_field() {
        let bundle = EncryptionBundle {
            ciphertext: "00".to_string(),
            nonce: "xyz".to_string(),
            tag: "00".to_string(),
        };
        let err = bundle.decode(BundleEncoding::Hex).unwrap_err();
        assert!(matches!(err, ProtectionError::Encoding(ref msg) if msg.contains("nonce")));
    }

    #[test]
    fn test_json_shape() {
        let bundle = EncryptionBundle::encode(b"c", b"n", b"t", BundleEncoding::Hex);
        let json = bundle.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ciphertext"], "63");
        assert_eq!(value["nonce"], "6e");
        assert_eq!(value["tag"], "74");
        assert_eq!(EncryptionBundle::from_json(&json).unwrap(), bundle);
    }

    #[test]
    fn test_invalid_json_is_encoding_error() {
        assert!(matches!(
            EncryptionBundle::from_json("{\"ciphertext\":1}"),
            Err(ProtectionError::Encoding(_))
        ));
    }
}
