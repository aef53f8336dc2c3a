//! Path resolution for the config file.

use std::path::{Path, PathBuf};

use crate::config::default_config_path;

/// A resolved config path and whether the user named it explicitly.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub explicit: bool,
}

/// Resolve the config file path from `--config` / `FIELDGUARD_CONFIG`, or the
/// XDG default.
pub fn resolve_config_path(cli_path: Option<&Path>) -> anyhow::Result<ConfigLocation> {
    if let Some(path) = cli_path {
        if !path.as_os_str().is_empty() {
            return Ok(ConfigLocation {
                path: path.to_path_buf(),
                explicit: true,
            });
        }
    }
    Ok(ConfigLocation {
        path: default_config_path()?,
        explicit: false,
    })
}

/// Error message when an explicitly named config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config found at {}", config_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let location = resolve_config_path(Some(Path::new("/etc/fieldguard.toml"))).unwrap();
        assert!(location.explicit);
        assert_eq!(location.path, PathBuf::from("/etc/fieldguard.toml"));
    }
}
