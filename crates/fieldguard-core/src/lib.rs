//! # Fieldguard Core
//!
//! Data-protection service for the farm-operations platform: tiered
//! authenticated encryption, key derivation, HMAC signatures, password
//! hashing and secure token generation.
//!
//! Route handlers and models are callers of this crate. They hand a field and
//! a [`ProtectionLevel`] to [`ProtectionService::encrypt`], persist the
//! returned [`EncryptionBundle`] alongside the level, and later call
//! [`ProtectionService::decrypt`], which fails closed.
//!
//! ## Architecture
//!
//! - **crypto::random**: OS CSPRNG bytes and tokens
//! - **crypto::key**: per-level PBKDF2 key derivation
//! - **crypto::aead**: AES-256-GCM / ChaCha20-Poly1305 with detached tags
//! - **crypto::signature**: HMAC-SHA256 sign/verify
//! - **crypto::password**: Argon2id PHC hashes
//! - **service**: [`ProtectionService`], owning the master secret and config

pub mod bundle;
pub mod config;
pub mod crypto;
pub mod error;
pub mod level;
pub mod secret;
pub mod service;

pub use bundle::EncryptionBundle;
pub use config::{AeadAlgorithm, BundleEncoding, ProtectionConfig};
pub use crypto::{HmacSignature, PasswordHash, TokenEncoding};
pub use error::{ErrorKind, ProtectionError, Result, PUBLIC_FAILURE_MESSAGE};
pub use level::ProtectionLevel;
pub use secret::{MasterSecret, MIN_SECRET_LENGTH};
pub use service::ProtectionService;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
