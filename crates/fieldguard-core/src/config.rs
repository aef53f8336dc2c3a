//! Protection service configuration.
//!
//! Every field has a documented default and an explicit valid range;
//! [`ProtectionConfig::validate`] rejects anything outside it. There is no
//! silent fallback to weaker parameters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{ProtectionError, Result};

/// Symmetric key length in bytes (256-bit keys).
pub const KEY_LENGTH: usize = 32;

/// Authentication tag length in bytes (128-bit tags).
pub const TAG_LENGTH: usize = 16;

/// Default nonce length in bytes.
pub const DEFAULT_IV_LENGTH: usize = 16;

/// Default PBKDF2 iteration count.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Accepted PBKDF2 iteration counts.
pub const KDF_ITERATIONS_RANGE: RangeInclusive<u32> = 1_000..=10_000_000;

/// Default password-hash cost factor.
pub const DEFAULT_HASH_COST: u32 = 12;

/// Accepted password-hash cost factors.
pub const HASH_COST_RANGE: RangeInclusive<u32> = 4..=16;

/// AEAD cipher used by the encryption engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AeadAlgorithm {
    #[default]
    Aes256Gcm,
    #[serde(rename = "chacha20_poly1305")]
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes256_gcm",
            Self::ChaCha20Poly1305 => "chacha20_poly1305",
        }
    }

    /// Nonce lengths this algorithm can run with.
    pub fn supported_iv_lengths(&self) -> &'static [usize] {
        match self {
            Self::Aes256Gcm => &[12, 16],
            Self::ChaCha20Poly1305 => &[12],
        }
    }
}

/// Text encoding of the three bundle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleEncoding {
    #[default]
    Hex,
    Base64,
}

/// Explicit configuration of the protection service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    pub algorithm: AeadAlgorithm,
    pub key_length: usize,
    pub iv_length: usize,
    pub tag_length: usize,
    pub kdf_iterations: u32,
    pub hash_cost: u32,
    pub bundle_encoding: BundleEncoding,
    /// Keep derived keys for the lifetime of the service instance.
    pub cache_derived_keys: bool,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            algorithm: AeadAlgorithm::default(),
            key_length: KEY_LENGTH,
            iv_length: DEFAULT_IV_LENGTH,
            tag_length: TAG_LENGTH,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            hash_cost: DEFAULT_HASH_COST,
            bundle_encoding: BundleEncoding::default(),
            cache_derived_keys: false,
        }
    }
}

impl ProtectionConfig {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.key_length != KEY_LENGTH {
            return Err(ProtectionError::Configuration(format!(
                "key_length must be {} bytes (got {})",
                KEY_LENGTH, self.key_length
            )));
        }

        if self.tag_length != TAG_LENGTH {
            return Err(ProtectionError::Configuration(format!(
                "tag_length must be {} bytes (got {})",
                TAG_LENGTH, self.tag_length
            )));
        }

        let supported = self.algorithm.supported_iv_lengths();
        if !supported.contains(&self.iv_length) {
            return Err(ProtectionError::Configuration(format!(
                "iv_length {} is not supported by {} (expected one of {:?})",
                self.iv_length,
                self.algorithm.as_str(),
                supported
            )));
        }

        if !KDF_ITERATIONS_RANGE.contains(&self.kdf_iterations) {
            return Err(ProtectionError::Configuration(format!(
                "kdf_iterations must be between {} and {} (got {})",
                KDF_ITERATIONS_RANGE.start(),
                KDF_ITERATIONS_RANGE.end(),
                self.kdf_iterations
            )));
        }

        if !HASH_COST_RANGE.contains(&self.hash_cost) {
            return Err(ProtectionError::Configuration(format!(
                "hash_cost must be between {} and {} (got {})",
                HASH_COST_RANGE.start(),
                HASH_COST_RANGE.end(),
                self.hash_cost
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProtectionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.algorithm, AeadAlgorithm::Aes256Gcm);
        assert_eq!(config.iv_length, 16);
        assert_eq!(config.kdf_iterations, 100_000);
        assert_eq!(config.hash_cost, 12);
        assert!(!config.cache_derived_keys);
    }

    #[test]
    fn test_key_length_must_be_32() {
        let config = ProtectionConfig {
            key_length: 16,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("key_length"));
    }

    #[test]
    fn test_tag_length_must_be_16() {
        let config = ProtectionConfig {
            tag_length: 12,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProtectionError::Configuration(_))
        ));
    }

    #[test]
    fn test_chacha_requires_12_byte_nonce() {
        let config = ProtectionConfig {
            algorithm: AeadAlgorithm::ChaCha20Poly1305,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ProtectionConfig {
            algorithm: AeadAlgorithm::ChaCha20Poly1305,
            iv_length: 12,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kdf_iteration_bounds() {
        for (iterations, ok) in [
            (999, false),
            (1_000, true),
            (10_000_000, true),
            (10_000_001, false),
        ] {
            let config = ProtectionConfig {
                kdf_iterations: iterations,
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "iterations = {}", iterations);
        }
    }

    #[test]
    fn test_hash_cost_bounds() {
        for (cost, ok) in [(3, false), (4, true), (16, true), (17, false)] {
            let config = ProtectionConfig {
                hash_cost: cost,
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "cost = {}", cost);
        }
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ProtectionConfig =
            serde_json::from_str(r#"{"algorithm":"chacha20_poly1305","iv_length":12}"#).unwrap();
        assert_eq!(config.algorithm, AeadAlgorithm::ChaCha20Poly1305);
        assert_eq!(config.kdf_iterations, DEFAULT_KDF_ITERATIONS);
        assert_eq!(config.bundle_encoding, BundleEncoding::Hex);
    }
}
