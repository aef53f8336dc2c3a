//! Application context for the Fieldguard CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and the
//! protection service built from it.

use once_cell::unsync::OnceCell;

use fieldguard_core::ProtectionService;

use crate::cli::Cli;
use crate::config::{read_config, FieldguardConfig};
use crate::errors::CliError;
use crate::security::{load_master_secret, SecretSource};
use crate::ui::UiContext;

use super::resolver::{missing_config_message, resolve_config_path, ConfigLocation};

/// Application context shared by every command handler.
pub struct AppContext<'a> {
    cli: &'a Cli,
    ui: UiContext,
    location: OnceCell<ConfigLocation>,
    config: OnceCell<FieldguardConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            ui: UiContext::from_env(cli.json, cli.no_color),
            location: OnceCell::new(),
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn location(&self) -> anyhow::Result<&ConfigLocation> {
        self.location
            .get_or_try_init(|| resolve_config_path(self.cli.config.as_deref()))
    }

    /// Get the config file, loading it lazily.
    ///
    /// A missing default config yields built-in defaults; a missing config
    /// that was named explicitly is an error.
    pub fn config(&self) -> anyhow::Result<&FieldguardConfig> {
        self.config.get_or_try_init(|| {
            let location = self.location()?;
            if location.path.exists() {
                return read_config(&location.path);
            }
            if location.explicit {
                return Err(CliError::not_found(
                    missing_config_message(&location.path),
                    "Run `fieldguard init` or check --config / FIELDGUARD_CONFIG",
                )
                .into());
            }
            tracing::debug!(path = %location.path.display(), "no config file; using defaults");
            Ok(FieldguardConfig::default())
        })
    }

    /// Load the master secret and build a validated protection service.
    pub fn service(&self) -> anyhow::Result<(ProtectionService, SecretSource)> {
        let config = self.config()?;
        let (secret, source) = load_master_secret(&config.secret)?;
        let service = ProtectionService::new(secret, config.protection.clone())?;
        tracing::debug!(source = %source, "protection service ready");
        Ok((service, source))
    }
}
