//! Error types for data-protection operations.
//!
//! Errors are descriptive at the core level for operators and logs; anything
//! surfaced to end users should go through [`ProtectionError::public_message`],
//! which collapses every decryption and verification failure into a single
//! indistinguishable string.

use std::fmt;

use thiserror::Error;

/// Result type alias for protection operations.
pub type Result<T> = std::result::Result<T, ProtectionError>;

/// Message shown to end users for any decrypt/verify failure.
pub const PUBLIC_FAILURE_MESSAGE: &str = "unable to decrypt or verify data";

/// Core error type for protection operations.
#[derive(Debug, Error)]
pub enum ProtectionError {
    /// Missing or undersized master secret, or invalid algorithm parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Authentication tag or signature did not verify.
    ///
    /// Carries no detail on purpose: a corrupted ciphertext, a forged tag and
    /// a protection-level mismatch are indistinguishable.
    #[error("Integrity check failed")]
    Integrity,

    /// Malformed hex/base64/PHC input, or a plaintext that is not UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// An unrecognized protection level was requested.
    #[error("Unsupported protection level: {0}")]
    UnsupportedLevel(String),

    /// Invalid caller input (token length, empty password).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The OS random number generator failed.
    #[error("Random number generation failed: {0}")]
    Random(String),

    /// A primitive failed for a reason other than verification.
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

/// Stable, non-sensitive label for an error, safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Integrity,
    Encoding,
    UnsupportedLevel,
    InvalidInput,
    Random,
    Crypto,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Integrity => "integrity",
            Self::Encoding => "encoding",
            Self::UnsupportedLevel => "unsupported_level",
            Self::InvalidInput => "invalid_input",
            Self::Random => "random",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProtectionError {
    /// The error's kind, for structured logging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Integrity => ErrorKind::Integrity,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::UnsupportedLevel(_) => ErrorKind::UnsupportedLevel,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Random(_) => ErrorKind::Random,
            Self::Crypto(_) => ErrorKind::Crypto,
        }
    }

    /// Whether this error came out of a decrypt or verify path.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Integrity | Self::Encoding(_))
    }

    /// Message suitable for user-facing surfaces.
    ///
    /// All decryption and verification failures map to
    /// [`PUBLIC_FAILURE_MESSAGE`] so that callers cannot be used as an oracle
    /// for probing ciphertext structure.
    pub fn public_message(&self) -> String {
        if self.is_verification_failure() {
            PUBLIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_display_has_no_detail() {
        assert_eq!(ProtectionError::Integrity.to_string(), "Integrity check failed");
    }

    #[test]
    fn test_public_message_collapses_verification_failures() {
        let integrity = ProtectionError::Integrity.public_message();
        let encoding = ProtectionError::Encoding("bad hex in nonce".to_string()).public_message();
        assert_eq!(integrity, PUBLIC_FAILURE_MESSAGE);
        assert_eq!(integrity, encoding);
    }

    #[test]
    fn test_public_message_keeps_configuration_detail() {
        let err = ProtectionError::Configuration("kdf_iterations out of range".to_string());
        assert!(err.public_message().contains("kdf_iterations"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ProtectionError::Integrity.kind().as_str(), "integrity");
        assert_eq!(
            ProtectionError::UnsupportedLevel("secret".into()).kind(),
            ErrorKind::UnsupportedLevel
        );
        assert_eq!(ErrorKind::Random.to_string(), "random");
    }
}
