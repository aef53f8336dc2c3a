use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fieldguard_core::ProtectionConfig;

use crate::constants::{APP_NAME, DEFAULT_LOG_LEVEL};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FieldguardConfig {
    #[serde(default)]
    pub protection: ProtectionConfig,
    #[serde(default)]
    pub secret: SecretSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Where the master secret comes from when the env var is unset.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SecretSection {
    pub file: Option<String>,
    #[serde(default)]
    pub keychain: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default tracing filter, overridden by `RUST_LOG` and `-v`.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<FieldguardConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &FieldguardConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_NAME));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_NAME))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguard_core::AeadAlgorithm;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = FieldguardConfig::default();
        config.secret.file = Some("/tmp/master.secret".to_string());
        config.protection.kdf_iterations = 200_000;
        write_config(&path, &config).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.secret.file.as_deref(), Some("/tmp/master.secret"));
        assert_eq!(loaded.protection.kdf_iterations, 200_000);
        assert_eq!(loaded.logging.level, "error");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: FieldguardConfig = toml::from_str(
            r#"
            [protection]
            algorithm = "chacha20_poly1305"
            iv_length = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.protection.algorithm, AeadAlgorithm::ChaCha20Poly1305);
        assert_eq!(config.protection.iv_length, 12);
        assert_eq!(
            config.protection.kdf_iterations,
            ProtectionConfig::default().kdf_iterations
        );
        assert!(config.secret.file.is_none());
        assert!(!config.secret.keychain);
    }

    #[test]
    fn test_unparseable_config_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[protection\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
