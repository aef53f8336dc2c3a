//! The master secret.
//!
//! One value per service instance, loaded from trusted configuration and
//! validated on construction. The secret is zeroized on drop and never
//! appears in `Debug` output.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ProtectionError, Result};

/// Minimum master secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Process-wide secret every level key is derived from.
pub struct MasterSecret {
    inner: SecretString,
}

impl MasterSecret {
    /// Validate and wrap a master secret.
    ///
    /// # Errors
    ///
    /// Returns `ProtectionError::Configuration` if the secret is empty,
    /// whitespace only, or shorter than [`MIN_SECRET_LENGTH`] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldguard_core::MasterSecret;
    ///
    /// assert!(MasterSecret::new("0123456789abcdef0123456789abcdef").is_ok());
    /// assert!(MasterSecret::new("too-short").is_err());
    /// ```
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret: String = secret.into();
        let inner = SecretString::from(secret);
        let exposed = inner.expose_secret();

        if exposed.trim().is_empty() {
            return Err(ProtectionError::Configuration(
                "master secret is not set".to_string(),
            ));
        }

        if exposed.len() < MIN_SECRET_LENGTH {
            return Err(ProtectionError::Configuration(format!(
                "master secret must be at least {} bytes (got {})",
                MIN_SECRET_LENGTH,
                exposed.len()
            )));
        }

        Ok(Self { inner })
    }

    /// Raw secret bytes.
    ///
    /// # Security
    ///
    /// Use only as immediate KDF input. Never store or log the result.
    pub(crate) fn expose(&self) -> &[u8] {
        self.inner.expose_secret().as_bytes()
    }

    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Always false; an empty secret cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
