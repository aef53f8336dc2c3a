//! Per-level key derivation using PBKDF2-HMAC-SHA256.
//!
//! Each protection level gets its own key, derived from the master secret
//! with a level-specific salt. The salt is SHA-256 of the level's public
//! context string, so derivation is reproducible across deployments that
//! share a master secret.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::config::{KDF_ITERATIONS_RANGE, KEY_LENGTH};
use crate::error::{ProtectionError, Result};
use crate::level::ProtectionLevel;
use crate::secret::MasterSecret;

/// Context string for the service-scoped HMAC signing key.
pub(crate) const SIGNING_CONTEXT: &str = "protection_signing";

/// A symmetric key derived for one protection level.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// An all-zero key to be filled in place by the KDF.
    fn zeroed() -> Self {
        Self {
            key: [0u8; KEY_LENGTH],
        }
    }

    fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LENGTH] {
        &mut self.key
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Salt for a level: SHA-256 of its context string.
pub fn level_salt(level: ProtectionLevel) -> [u8; 32] {
    context_salt(&level.context())
}

fn context_salt(context: &str) -> [u8; 32] {
    Sha256::digest(context.as_bytes()).into()
}

/// Derive the key for `level` from the master secret.
///
/// This is deliberately slow (PBKDF2 with `iterations` rounds); keep it off
/// latency-sensitive paths or enable the service's key cache.
///
/// # Security
///
/// - Same secret + level + iterations always produces the same key
/// - Different levels produce independent keys
/// - The salt is public; brute-force resistance rests on the iteration
///   count and the entropy of the master secret
///
/// # Examples
///
/// ```
/// use fieldguard_core::crypto::derive_key;
/// use fieldguard_core::{MasterSecret, ProtectionLevel};
///
/// let secret = MasterSecret::new("0123456789abcdef0123456789abcdef").unwrap();
/// let key = derive_key(&secret, ProtectionLevel::Internal, 1_000).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(
    secret: &MasterSecret,
    level: ProtectionLevel,
    iterations: u32,
) -> Result<DerivedKey> {
    derive_with_salt(secret, &level_salt(level), iterations)
}

/// Derive the service-scoped HMAC key.
pub(crate) fn derive_signing_key(secret: &MasterSecret, iterations: u32) -> Result<DerivedKey> {
    derive_with_salt(secret, &context_salt(SIGNING_CONTEXT), iterations)
}

fn derive_with_salt(secret: &MasterSecret, salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    if !KDF_ITERATIONS_RANGE.contains(&iterations) {
        return Err(ProtectionError::Configuration(format!(
            "kdf_iterations must be between {} and {} (got {})",
            KDF_ITERATIONS_RANGE.start(),
            KDF_ITERATIONS_RANGE.end(),
            iterations
        )));
    }

    // Derive straight into the zeroize-on-drop key; no stack copy.
    let mut key = DerivedKey::zeroed();
    pbkdf2_hmac::<Sha256>(secret.expose(), salt, iterations, key.as_mut_bytes());
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 1_000;

    fn secret() -> MasterSecret {
        MasterSecret::new("orchard-block-7-master-secret-xyz").unwrap()
    }

    #[test]
    fn test_derived_key_matches_direct_pbkdf2() {
        let key = derive_key(&secret(), ProtectionLevel::Restricted, ITERATIONS).unwrap();
        let mut expected = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(
            secret().expose(),
            &level_salt(ProtectionLevel::Restricted),
            ITERATIONS,
            &mut expected,
        );
        assert_eq!(key.as_bytes(), &expected);
        assert_ne!(key.as_bytes(), &[0u8; KEY_LENGTH]);
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(&secret(), ProtectionLevel::Confidential, ITERATIONS).unwrap();
        let key2 = derive_key(&secret(), ProtectionLevel::Confidential, ITERATIONS).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_levels_get_distinct_keys() {
        let keys: Vec<_> = ProtectionLevel::ALL
            .iter()
            .map(|level| derive_key(&secret(), *level, ITERATIONS).unwrap())
            .collect();
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a.as_bytes(), b.as_bytes());
            }
        }
    }

    #[test]
    fn test_signing_key_distinct_from_level_keys() {
        let signing = derive_signing_key(&secret(), ITERATIONS).unwrap();
        for level in ProtectionLevel::ALL {
            let key = derive_key(&secret(), level, ITERATIONS).unwrap();
            assert_ne!(signing.as_bytes(), key.as_bytes());
        }
    }

    #[test]
    fn test_different_secret_different_key() {
        let other = MasterSecret::new("orchard-block-8-master-secret-xyz").unwrap();
        let key1 = derive_key(&secret(), ProtectionLevel::Internal, ITERATIONS).unwrap();
        let key2 = derive_key(&other, ProtectionLevel::Internal, ITERATIONS).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_iteration_count_changes_key() {
        let key1 = derive_key(&secret(), ProtectionLevel::Internal, 1_000).unwrap();
        let key2 = derive_key(&secret(), ProtectionLevel::Internal, 1_001).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_iterations_out_of_range_rejected() {
        let result = derive_key(&secret(), ProtectionLevel::Public, 10);
        assert!(matches!(result, Err(ProtectionError::Configuration(_))));
    }

    #[test]
    fn test_level_salt_is_sha256_of_context() {
        let expected: [u8; 32] = Sha256::digest(b"protection_level_restricted").into();
        assert_eq!(level_salt(ProtectionLevel::Restricted), expected);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key(&secret(), ProtectionLevel::Public, ITERATIONS).unwrap();
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
