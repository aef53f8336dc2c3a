//! Constants used throughout the CLI.

/// Application name used for config directories and the keychain service.
pub const APP_NAME: &str = "fieldguard";

/// Environment variable holding the master secret.
pub const MASTER_SECRET_ENV: &str = "FIELDGUARD_MASTER_SECRET";

/// Keychain account the master secret is stored under.
pub const KEYCHAIN_ACCOUNT: &str = "master-secret";

/// Default log filter for the terminal.
///
/// Failure events from the protection service carry the error kind, which
/// would distinguish a forged tag from malformed input next to the collapsed
/// error message. They are shown only when the operator raises the level.
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Random bytes in a generated master secret (base64url encoded on disk).
pub const GENERATED_SECRET_BYTES: usize = 48;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure, including invalid configuration.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config file, master secret).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Decryption or signature verification failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}
