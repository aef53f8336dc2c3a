//! Cryptographic primitives behind the protection service.
//!
//! Built on well-audited RustCrypto implementations:
//! - **PBKDF2-HMAC-SHA256**: per-level key derivation
//! - **AES-256-GCM / ChaCha20-Poly1305**: authenticated encryption
//! - **HMAC-SHA256**: message signatures
//! - **Argon2id**: password hashing
//! - **getrandom**: OS CSPRNG for nonces, salts and tokens
//!
//! ## Security Model
//!
//! - Key material and the master secret are zeroized from memory on drop
//! - Tags and signatures are compared in constant time
//! - Nonces are never derived from clocks, counters or process ids
//!
//! ## Threat Model
//!
//! We defend against:
//! - Tampering with stored ciphertexts or swapping them between levels
//! - Offline brute-force of stolen password hashes
//! - Timing side channels in tag/signature comparison
//!
//! We do NOT defend against:
//! - Disclosure of the master secret
//! - Compromised host memory

pub mod aead;
pub mod key;
pub mod password;
pub mod random;
pub mod signature;

pub use key::{derive_key, level_salt, DerivedKey};
pub use password::{hash_password, needs_rehash, verify_password, PasswordHash};
pub use random::{fill_random, generate_token, random_bytes, TokenEncoding};
pub use signature::{sign, verify, verify_hex, HmacSignature};
