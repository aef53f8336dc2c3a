//! Credential hashing using Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`), so
//! every hash records the parameters it was produced with. Verification
//! always uses the recorded parameters, which lets the cost factor be raised
//! over time without invalidating stored hashes.

use std::fmt;

use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::config::HASH_COST_RANGE;
use crate::crypto::random::fill_random;
use crate::error::{ProtectionError, Result};

/// Argon2 passes per hash.
const PASSES: u32 = 3;

/// Argon2 lanes (single-threaded).
const LANES: u32 = 1;

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// A self-describing password hash in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a stored PHC string. The format is checked on verification.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Memory cost in KiB for a cost factor: `2^(cost + 2)`.
///
/// Cost 12 is 16 MiB; each step doubles the work.
///
/// # Errors
///
/// Returns `ProtectionError::Configuration` if `cost` is outside
/// [`HASH_COST_RANGE`].
pub fn memory_kib_for_cost(cost: u32) -> Result<u32> {
    if !HASH_COST_RANGE.contains(&cost) {
        return Err(ProtectionError::Configuration(format!(
            "hash_cost must be between {} and {} (got {})",
            HASH_COST_RANGE.start(),
            HASH_COST_RANGE.end(),
            cost
        )));
    }
    Ok(1u32 << (cost + 2))
}

fn params_for_cost(cost: u32) -> Result<Params> {
    Params::new(memory_kib_for_cost(cost)?, PASSES, LANES, None)
        .map_err(|e| ProtectionError::Crypto(format!("Failed to create Argon2 params: {}", e)))
}

fn parse(hash: &str) -> Result<PhcString<'_>> {
    PhcString::new(hash)
        .map_err(|e| ProtectionError::Encoding(format!("invalid password hash: {}", e)))
}

/// Hash `password` with a fresh random salt.
///
/// Deliberately slow: at the default cost this takes on the order of
/// hundreds of milliseconds.
///
/// # Errors
///
/// - `ProtectionError::InvalidInput` if the password is empty
/// - `ProtectionError::Configuration` if `cost` is outside the valid range
pub fn hash_password(password: &str, cost: u32) -> Result<PasswordHash> {
    if password.is_empty() {
        return Err(ProtectionError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let params = params_for_cost(cost)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut salt_bytes = [0u8; SALT_LENGTH];
    fill_random(&mut salt_bytes)?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| ProtectionError::Crypto(format!("Failed to encode salt: {}", e)))?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ProtectionError::Crypto(format!("Password hashing failed: {}", e)))?;

    Ok(PasswordHash(hash.to_string()))
}

/// Check `password` against a stored hash using the hash's own parameters.
///
/// Returns `Ok(false)` for a wrong password.
///
/// # Errors
///
/// Returns `ProtectionError::Encoding` if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = parse(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(ProtectionError::Encoding(format!(
            "unusable password hash: {}",
            e
        ))),
    }
}

/// Whether `hash` was produced with weaker settings than `cost` implies.
///
/// Callers typically check this after a successful login and store a fresh
/// hash when it returns true.
pub fn needs_rehash(hash: &str, cost: u32) -> Result<bool> {
    let target = params_for_cost(cost)?;
    let parsed = parse(hash)?;

    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return Ok(true);
    }

    let current = Params::try_from(&parsed)
        .map_err(|e| ProtectionError::Encoding(format!("invalid password hash params: {}", e)))?;

    Ok(current.m_cost() < target.m_cost() || current.t_cost() < target.t_cost())
}
