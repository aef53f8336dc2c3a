//! Master secret storage: environment, secret file, or OS keychain.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use fieldguard_core::crypto::generate_token;
use fieldguard_core::{MasterSecret, TokenEncoding};

use crate::config::SecretSection;
use crate::constants::{APP_NAME, GENERATED_SECRET_BYTES, KEYCHAIN_ACCOUNT, MASTER_SECRET_ENV};
use crate::errors::CliError;

/// Where the loaded master secret came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    Env,
    File(PathBuf),
    Keychain,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Env => write!(f, "env ({})", MASTER_SECRET_ENV),
            SecretSource::File(path) => write!(f, "file ({})", path.display()),
            SecretSource::Keychain => write!(f, "keychain"),
        }
    }
}

/// Load the master secret from the first configured source.
///
/// Order: the environment variable, then `[secret] file`, then the keychain
/// when `[secret] keychain = true`. The raw value is validated by
/// `MasterSecret::new`, so an undersized secret fails here.
pub fn load_master_secret(section: &SecretSection) -> anyhow::Result<(MasterSecret, SecretSource)> {
    if let Ok(value) = std::env::var(MASTER_SECRET_ENV) {
        if !value.is_empty() {
            return Ok((MasterSecret::new(value)?, SecretSource::Env));
        }
    }

    if let Some(path) = section.file.as_deref() {
        let path = PathBuf::from(path);
        let mut contents = read_secret_file(&path)?;
        let trimmed_len = contents.trim_end_matches(['\r', '\n']).len();
        contents.truncate(trimmed_len);
        let secret = MasterSecret::new(std::mem::take(&mut *contents))?;
        return Ok((secret, SecretSource::File(path)));
    }

    if section.keychain {
        return match keychain_get(KEYCHAIN_ACCOUNT)? {
            Some(value) => Ok((MasterSecret::new(value)?, SecretSource::Keychain)),
            None => Err(CliError::not_found(
                "No master secret found in the OS keychain",
                "Run `fieldguard init --generate-secret --keychain --force`",
            )
            .into()),
        };
    }

    Err(CliError::not_found(
        "No master secret configured",
        format!(
            "Set {} or run `fieldguard init --generate-secret`",
            MASTER_SECRET_ENV
        ),
    )
    .into())
}

/// Generate a fresh master secret, base64url encoded.
pub fn generate_secret() -> anyhow::Result<Zeroizing<String>> {
    let token = generate_token(GENERATED_SECRET_BYTES, TokenEncoding::Base64Url)?;
    Ok(Zeroizing::new(token))
}

pub fn write_secret_file(path: &Path, secret: &str) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    if path.exists() {
        return Err(anyhow::anyhow!(
            "Secret file already exists: {}",
            path.display()
        ));
    }
    std::fs::write(path, secret)
        .map_err(|e| anyhow::anyhow!("Failed to write secret file {}: {}", path.display(), e))?;
    set_file_permissions(path)?;
    Ok(())
}

pub fn read_secret_file(path: &Path) -> anyhow::Result<Zeroizing<String>> {
    if !path.exists() {
        return Err(CliError::not_found(
            format!("Secret file not found: {}", path.display()),
            "Run `fieldguard init --generate-secret` or fix `[secret] file` in the config",
        )
        .into());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read secret file {}: {}", path.display(), e))?;
    Ok(Zeroizing::new(contents))
}

pub fn keychain_get(account: &str) -> anyhow::Result<Option<String>> {
    let entry = keychain_entry(account)?;
    match entry.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(anyhow::anyhow!("Keychain read failed: {}", err)),
    }
}

pub fn keychain_set(account: &str, secret: &str) -> anyhow::Result<()> {
    let entry = keychain_entry(account)?;
    entry
        .set_password(secret)
        .map_err(|e| anyhow::anyhow!("Keychain write failed: {}", e))
}

fn keychain_entry(account: &str) -> anyhow::Result<keyring::Entry> {
    keyring::Entry::new(APP_NAME, account)
        .map_err(|e| anyhow::anyhow!("Keychain entry failed: {}", e))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create secret directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

fn set_file_permissions(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    Ok(())
}
