//! Fieldguard CLI - tiered field encryption, signing and credential hashing
//!
//! This is the command-line interface for Fieldguard. It loads the master
//! secret and service parameters, then hands each subcommand to the core
//! library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod security;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::errors::Report;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    init_tracing(&ctx);

    if let Err(err) = commands::dispatch(&ctx) {
        let report = Report::from_error(&err);
        tracing::debug!(error = %format!("{:#}", err), "command failed");
        print_error(ctx.ui(), &report.message, report.hint.as_deref());
        std::process::exit(report.exit_code);
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins, then `-v` flags, then `[logging] level` from the config.
fn init_tracing(ctx: &AppContext) {
    let cli = ctx.cli();
    let level = match cli.verbose {
        0 => default_level(ctx),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(ctx: &AppContext) -> String {
    // Init rewrites the config and completions never read it.
    if matches!(
        ctx.cli().command,
        Commands::Init(_) | Commands::Completions { .. }
    ) {
        return DEFAULT_LOG_LEVEL.to_string();
    }
    ctx.config()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}
