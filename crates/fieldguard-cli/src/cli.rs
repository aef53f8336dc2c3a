use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use fieldguard_core::{ProtectionLevel, TokenEncoding, VERSION};

/// Fieldguard - tiered field encryption, signing and credential hashing
#[derive(Parser)]
#[command(name = "fieldguard")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "FIELDGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file and optionally a master secret
    Init(InitArgs),

    /// Validate config and master secret, then show effective parameters
    Check,

    /// Encrypt text at a protection level and print the bundle as JSON
    Encrypt(EncryptArgs),

    /// Decrypt a bundle produced by `encrypt`
    Decrypt(DecryptArgs),

    /// Sign a message with the service signing key
    Sign(SignArgs),

    /// Verify a hex signature produced by `sign`
    Verify(VerifyArgs),

    /// Hash a password
    HashPassword(HashPasswordArgs),

    /// Check a password against a stored hash
    VerifyPassword(VerifyPasswordArgs),

    /// Generate a random token
    Token(TokenArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Generate a random master secret file next to the config
    #[arg(long)]
    pub generate_secret: bool,

    /// Store the generated secret in the OS keychain instead of a file
    #[arg(long, requires = "generate_secret")]
    pub keychain: bool,
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// Protection level (public, internal, confidential, restricted)
    #[arg(short, long)]
    pub level: ProtectionLevel,

    /// Text to encrypt (read from stdin when absent)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Protection level the bundle was encrypted at
    #[arg(short, long)]
    pub level: ProtectionLevel,

    /// Bundle JSON (read from stdin when absent)
    #[arg(value_name = "BUNDLE_JSON")]
    pub bundle: Option<String>,
}

/// Arguments for the `sign` command
#[derive(Args)]
pub struct SignArgs {
    /// Message to sign (read from stdin when absent)
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,
}

/// Arguments for the `verify` command
#[derive(Args)]
pub struct VerifyArgs {
    /// Hex-encoded signature
    #[arg(short, long)]
    pub signature: String,

    /// Signed message (read from stdin when absent)
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,
}

/// Arguments for the `hash-password` command
#[derive(Args)]
pub struct HashPasswordArgs {
    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the `verify-password` command
#[derive(Args)]
pub struct VerifyPasswordArgs {
    /// Stored PHC hash string
    #[arg(long)]
    pub hash: String,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the `token` command
#[derive(Args)]
pub struct TokenArgs {
    /// Number of random bytes
    #[arg(short, long, default_value_t = 32)]
    pub bytes: usize,

    /// Output encoding (hex, base64, base64url)
    #[arg(short, long, default_value = "hex")]
    pub encoding: TokenEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt_level() {
        let cli = Cli::try_parse_from(["fieldguard", "encrypt", "--level", "Confidential", "x"])
            .unwrap();
        match cli.command {
            Commands::Encrypt(args) => {
                assert_eq!(args.level, ProtectionLevel::Confidential);
                assert_eq!(args.text.as_deref(), Some("x"));
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(Cli::try_parse_from(["fieldguard", "encrypt", "--level", "secret"]).is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["fieldguard", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
