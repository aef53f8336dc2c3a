//! The protection service.
//!
//! [`ProtectionService`] owns one master secret and one validated
//! configuration, and is the entry point callers use to protect fields.
//! Construct it once at startup and share it (it is `Send + Sync`); to
//! rotate the master secret, construct a new service.

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Instant;

use uuid::Uuid;

use crate::bundle::EncryptionBundle;
use crate::config::ProtectionConfig;
use crate::crypto::aead;
use crate::crypto::key::{derive_key, derive_signing_key, DerivedKey};
use crate::crypto::password::{self, PasswordHash};
use crate::crypto::random::{self, TokenEncoding};
use crate::crypto::signature::{self, HmacSignature};
use crate::error::{ProtectionError, Result};
use crate::level::ProtectionLevel;
use crate::secret::MasterSecret;

/// Lazily populated derived keys, one slot per level plus the signing key.
#[derive(Default)]
struct KeyCache {
    levels: [OnceLock<DerivedKey>; ProtectionLevel::ALL.len()],
    signing: OnceLock<DerivedKey>,
}

/// Tiered encryption, signing, password hashing and token generation.
pub struct ProtectionService {
    secret: MasterSecret,
    config: ProtectionConfig,
    key_cache: KeyCache,
}

impl std::fmt::Debug for ProtectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectionService")
            .field("secret", &self.secret)
            .field("config", &self.config)
            .finish()
    }
}

impl ProtectionService {
    /// Create a service from a validated master secret and a configuration.
    ///
    /// All configuration checks run here, so a misconfigured deployment
    /// fails at startup rather than on its first encrypt call.
    ///
    /// # Errors
    ///
    /// Returns `ProtectionError::Configuration` for any out-of-range setting.
    pub fn new(secret: MasterSecret, config: ProtectionConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            algorithm = config.algorithm.as_str(),
            iv_length = config.iv_length,
            kdf_iterations = config.kdf_iterations,
            hash_cost = config.hash_cost,
            cache_derived_keys = config.cache_derived_keys,
            "protection service configured"
        );
        Ok(Self {
            secret,
            config,
            key_cache: KeyCache::default(),
        })
    }

    /// Shorthand for validating `secret` and building the service in one step.
    pub fn from_secret(secret: impl Into<String>, config: ProtectionConfig) -> Result<Self> {
        Self::new(MasterSecret::new(secret)?, config)
    }

    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    /// Drop every cached derived key.
    ///
    /// Only meaningful with `cache_derived_keys` enabled.
    pub fn clear_key_cache(&mut self) {
        self.key_cache = KeyCache::default();
    }

    /// Derive (or fetch from cache) the key for `level`.
    pub fn derive_key(&self, level: ProtectionLevel) -> Result<DerivedKey> {
        self.level_key(level).map(Cow::into_owned)
    }

    fn level_key(&self, level: ProtectionLevel) -> Result<Cow<'_, DerivedKey>> {
        let slot = &self.key_cache.levels[level.index()];
        self.cached_or_derive(slot, || {
            let started = Instant::now();
            let key = derive_key(&self.secret, level, self.config.kdf_iterations)?;
            tracing::debug!(
                level = %level,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "derived level key"
            );
            Ok(key)
        })
    }

    fn signing_key(&self) -> Result<Cow<'_, DerivedKey>> {
        self.cached_or_derive(&self.key_cache.signing, || {
            derive_signing_key(&self.secret, self.config.kdf_iterations)
        })
    }

    fn cached_or_derive<'a, F>(
        &'a self,
        slot: &'a OnceLock<DerivedKey>,
        derive: F,
    ) -> Result<Cow<'a, DerivedKey>>
    where
        F: FnOnce() -> Result<DerivedKey>,
    {
        if !self.config.cache_derived_keys {
            return derive().map(Cow::Owned);
        }
        if let Some(key) = slot.get() {
            return Ok(Cow::Borrowed(key));
        }
        let key = derive()?;
        Ok(Cow::Borrowed(slot.get_or_init(|| key)))
    }

    /// Encrypt `plaintext` at `level`.
    ///
    /// Derives the level key, draws a fresh nonce, binds the level context as
    /// associated data, and returns the text-encoded bundle.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldguard_core::{ProtectionConfig, ProtectionLevel, ProtectionService};
    ///
    /// let config = ProtectionConfig { kdf_iterations: 1_000, ..Default::default() };
    /// let service =
    ///     ProtectionService::from_secret("0123456789abcdef0123456789abcdef", config).unwrap();
    ///
    /// let bundle = service.encrypt(b"yield: 42t", ProtectionLevel::Internal).unwrap();
    /// let plaintext = service.decrypt(&bundle, ProtectionLevel::Internal).unwrap();
    /// assert_eq!(plaintext, b"yield: 42t");
    /// ```
    pub fn encrypt(&self, plaintext: &[u8], level: ProtectionLevel) -> Result<EncryptionBundle> {
        let result = self.encrypt_inner(plaintext, level);
        report("encrypt", Some(level), result)
    }

    fn encrypt_inner(&self, plaintext: &[u8], level: ProtectionLevel) -> Result<EncryptionBundle> {
        let key = self.level_key(level)?;
        let nonce = random::random_bytes(self.config.iv_length)?;
        let aad = level.context();
        let sealed = aead::seal(
            self.config.algorithm,
            &key,
            &nonce,
            aad.as_bytes(),
            plaintext,
        )?;
        Ok(EncryptionBundle::encode(
            &sealed.ciphertext,
            &nonce,
            &sealed.tag,
            self.config.bundle_encoding,
        ))
    }

    /// Verify and decrypt a bundle produced at `level`.
    ///
    /// # Errors
    ///
    /// - `ProtectionError::Encoding` if a bundle field is not valid text encoding
    /// - `ProtectionError::Integrity` for a wrong level, altered bytes, or a
    ///   nonce or tag of the wrong length; no plaintext is released
    pub fn decrypt(&self, bundle: &EncryptionBundle, level: ProtectionLevel) -> Result<Vec<u8>> {
        let result = self.decrypt_inner(bundle, level);
        report("decrypt", Some(level), result)
    }

    fn decrypt_inner(&self, bundle: &EncryptionBundle, level: ProtectionLevel) -> Result<Vec<u8>> {
        let raw = bundle.decode(self.config.bundle_encoding)?;
        if raw.nonce.len() != self.config.iv_length {
            return Err(ProtectionError::Integrity);
        }
        let key = self.level_key(level)?;
        let aad = level.context();
        aead::open(
            self.config.algorithm,
            &key,
            &raw.nonce,
            aad.as_bytes(),
            &raw.ciphertext,
            &raw.tag,
        )
    }

    /// Encrypt a text field.
    pub fn encrypt_str(&self, plaintext: &str, level: ProtectionLevel) -> Result<EncryptionBundle> {
        self.encrypt(plaintext.as_bytes(), level)
    }

    /// Decrypt a bundle that holds UTF-8 text.
    pub fn decrypt_to_string(
        &self,
        bundle: &EncryptionBundle,
        level: ProtectionLevel,
    ) -> Result<String> {
        let bytes = self.decrypt(bundle, level)?;
        let result = String::from_utf8(bytes).map_err(|_| {
            ProtectionError::Encoding("decrypted payload is not valid UTF-8".to_string())
        });
        report("decrypt", Some(level), result)
    }

    /// Sign `message` with the service signing key.
    pub fn sign(&self, message: &[u8]) -> Result<HmacSignature> {
        let result = self
            .signing_key()
            .and_then(|key| signature::sign(message, key.as_bytes()));
        report("sign", None, result)
    }

    /// Check a signature made with [`ProtectionService::sign`].
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self.signing_key() {
            Ok(key) => signature::verify(message, signature, key.as_bytes()),
            Err(err) => {
                let _ = report::<()>("verify", None, Err(err));
                false
            }
        }
    }

    /// Like [`ProtectionService::verify`], failing with
    /// `ProtectionError::Integrity` on mismatch.
    pub fn ensure_signature(&self, message: &[u8], signature_hex: &str) -> Result<()> {
        let result = HmacSignature::from_hex(signature_hex).and_then(|signature| {
            if self.verify(message, signature.as_bytes()) {
                Ok(())
            } else {
                Err(ProtectionError::Integrity)
            }
        });
        report("verify", None, result)
    }

    /// Sign `message` with a caller-supplied secret.
    pub fn sign_with(&self, message: &[u8], secret: &[u8]) -> Result<HmacSignature> {
        signature::sign(message, secret)
    }

    /// Check a signature made with [`ProtectionService::sign_with`].
    pub fn verify_with(&self, message: &[u8], signature: &[u8], secret: &[u8]) -> bool {
        signature::verify(message, signature, secret)
    }

    /// Hash a password at the configured cost.
    pub fn hash_password(&self, password: &str) -> Result<PasswordHash> {
        let started = Instant::now();
        let result = password::hash_password(password, self.config.hash_cost);
        if result.is_ok() {
            tracing::debug!(
                hash_cost = self.config.hash_cost,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "hashed password"
            );
        }
        report("hash_password", None, result)
    }

    /// Check a password against a stored hash, using the hash's own parameters.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        report("verify_password", None, password::verify_password(password, hash))
    }

    /// Whether a stored hash predates the configured cost.
    pub fn needs_rehash(&self, hash: &str) -> Result<bool> {
        password::needs_rehash(hash, self.config.hash_cost)
    }

    /// Generate a random token for sessions, password resets and the like.
    pub fn generate_token(&self, byte_length: usize, encoding: TokenEncoding) -> Result<String> {
        report(
            "generate_token",
            None,
            random::generate_token(byte_length, encoding),
        )
    }
}

/// Notify the logging collaborator of a failure.
///
/// Only the operation name, level, error kind and a fresh correlation id are
/// logged; never key material, plaintext or password input.
fn report<T>(
    operation: &'static str,
    level: Option<ProtectionLevel>,
    result: Result<T>,
) -> Result<T> {
    if let Err(err) = &result {
        let correlation_id = Uuid::new_v4();
        match level {
            Some(level) => tracing::warn!(
                operation,
                level = %level,
                kind = %err.kind(),
                correlation_id = %correlation_id,
                "protection operation failed"
            ),
            None => tracing::warn!(
                operation,
                kind = %err.kind(),
                correlation_id = %correlation_id,
                "protection operation failed"
            ),
        }
    }
    result
}
