//! `fieldguard init`: write a config file and optionally a master secret.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{read_config, write_config, FieldguardConfig};
use crate::constants::KEYCHAIN_ACCOUNT;
use crate::errors::CliError;
use crate::security::{generate_secret, keychain_set, write_secret_file};
use crate::ui::{hint, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let location = ctx.location()?;
    let config_path = &location.path;

    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ))
        .into());
    }

    let mut config = FieldguardConfig::default();
    if config_path.exists() {
        // Overwriting the config must not orphan an existing master secret.
        match read_config(config_path) {
            Ok(existing) => config.secret = existing.secret,
            Err(err) => {
                tracing::warn!(error = %err, "existing config unreadable; secret settings reset")
            }
        }
    }
    let mut secret_location = config
        .secret
        .file
        .clone()
        .or_else(|| config.secret.keychain.then(|| "keychain".to_string()));

    if args.generate_secret {
        let secret = generate_secret()?;
        if args.keychain {
            keychain_set(KEYCHAIN_ACCOUNT, &secret)?;
            config.secret.file = None;
            config.secret.keychain = true;
            secret_location = Some("keychain".to_string());
        } else {
            let secret_path: PathBuf = config_path.with_file_name("master.secret");
            write_secret_file(&secret_path, &secret)?;
            let display = secret_path.to_string_lossy().to_string();
            config.secret.file = Some(display.clone());
            secret_location = Some(display);
        }
    }

    write_config(config_path, &config)?;
    tracing::info!(path = %config_path.display(), "config written");

    if ctx.ui().mode.is_json() {
        let value = serde_json::json!({
            "config_path": config_path.to_string_lossy(),
            "secret": secret_location,
        });
        println!("{}", value);
        return Ok(());
    }

    if ctx.quiet() {
        return Ok(());
    }

    let mut rows = vec![("Config", config_path.to_string_lossy().to_string())];
    if let Some(location) = &secret_location {
        rows.push(("Secret", location.clone()));
    }
    println!("{}", receipt(ctx.ui(), "Initialized fieldguard", &rows));
    if secret_location.is_none() {
        println!(
            "{}",
            hint(
                ctx.ui(),
                "Set FIELDGUARD_MASTER_SECRET or rerun with --generate-secret"
            )
        );
    }
    Ok(())
}
