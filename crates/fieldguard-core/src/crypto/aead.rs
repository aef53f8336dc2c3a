//! Detached-tag AEAD primitives.
//!
//! Supported ciphers:
//! - AES-256-GCM with a 12- or 16-byte nonce
//! - ChaCha20-Poly1305 with a 12-byte nonce
//!
//! Both use 256-bit keys and 128-bit tags. Tag comparison happens inside the
//! cipher crates, in constant time, before any plaintext is produced.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce, Tag};
use aes_gcm::aes::Aes256;
use aes_gcm::{Aes256Gcm, AesGcm};
use chacha20poly1305::ChaCha20Poly1305;
use zeroize::Zeroize;

use crate::config::{AeadAlgorithm, TAG_LENGTH};
use crate::crypto::key::DerivedKey;
use crate::error::{ProtectionError, Result};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Output of [`seal`]: ciphertext plus detached tag.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LENGTH],
}

/// Encrypt `plaintext` under `key` and `nonce`, authenticating `aad`.
///
/// The caller supplies a fresh nonce for every call; reusing a nonce with
/// the same key breaks confidentiality of both messages.
pub fn seal(
    algorithm: AeadAlgorithm,
    key: &DerivedKey,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Sealed> {
    match (algorithm, nonce.len()) {
        (AeadAlgorithm::Aes256Gcm, 12) => seal_with::<Aes256Gcm>(key, nonce, aad, plaintext),
        (AeadAlgorithm::Aes256Gcm, 16) => seal_with::<Aes256Gcm16>(key, nonce, aad, plaintext),
        (AeadAlgorithm::ChaCha20Poly1305, 12) => {
            seal_with::<ChaCha20Poly1305>(key, nonce, aad, plaintext)
        }
        (algorithm, len) => Err(ProtectionError::Configuration(format!(
            "{} cannot run with a {}-byte nonce",
            algorithm.as_str(),
            len
        ))),
    }
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// Any failure (wrong key, wrong AAD, altered nonce/ciphertext/tag, or a
/// nonce or tag of the wrong length) is reported as
/// `ProtectionError::Integrity`, with no further detail.
pub fn open(
    algorithm: AeadAlgorithm,
    key: &DerivedKey,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    match (algorithm, nonce.len()) {
        (AeadAlgorithm::Aes256Gcm, 12) => open_with::<Aes256Gcm>(key, nonce, aad, ciphertext, tag),
        (AeadAlgorithm::Aes256Gcm, 16) => {
            open_with::<Aes256Gcm16>(key, nonce, aad, ciphertext, tag)
        }
        (AeadAlgorithm::ChaCha20Poly1305, 12) => {
            open_with::<ChaCha20Poly1305>(key, nonce, aad, ciphertext, tag)
        }
        _ => Err(ProtectionError::Integrity),
    }
}

fn seal_with<C>(key: &DerivedKey, nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Sealed>
where
    C: AeadInPlace + KeyInit,
{
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|e| ProtectionError::Crypto(format!("Failed to initialize cipher: {}", e)))?;

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<C>::from_slice(nonce), aad, &mut buffer)
        .map_err(|_| {
            buffer.zeroize();
            ProtectionError::Crypto("Encryption failed".to_string())
        })?;

    if tag.len() != TAG_LENGTH {
        return Err(ProtectionError::Crypto(format!(
            "Unexpected tag length {}",
            tag.len()
        )));
    }
    let mut tag_bytes = [0u8; TAG_LENGTH];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

fn open_with<C>(
    key: &DerivedKey,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>>
where
    C: AeadInPlace + KeyInit,
{
    if tag.len() != C::TagSize::USIZE || nonce.len() != C::NonceSize::USIZE {
        return Err(ProtectionError::Integrity);
    }

    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|e| ProtectionError::Crypto(format!("Failed to initialize cipher: {}", e)))?;

    let mut buffer = ciphertext.to_vec();
    match cipher.decrypt_in_place_detached(
        Nonce::<C>::from_slice(nonce),
        aad,
        &mut buffer,
        Tag::<C>::from_slice(tag),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            buffer.zeroize();
            Err(ProtectionError::Integrity)
        }
    }
}
