//! Input handling helpers for message text and passwords.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::errors::CliError;
use crate::ui::UiContext;

/// Use the positional argument when given, otherwise read all of stdin.
///
/// A single trailing line ending is dropped from stdin input, so
/// `echo text | fieldguard encrypt` protects `text`.
pub fn read_text(arg: Option<String>, what: &str) -> anyhow::Result<String> {
    if let Some(value) = arg {
        return Ok(value);
    }

    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "No {} provided; pass it as an argument or pipe it on stdin",
            what
        ))
        .into());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(strip_line_ending(&buffer).to_string())
}

/// Read a password from stdin (`--stdin`) or an interactive prompt.
pub fn read_password(
    ui: &UiContext,
    from_stdin: bool,
    confirm: bool,
) -> anyhow::Result<Zeroizing<String>> {
    if from_stdin {
        let mut buffer = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let len = strip_line_ending(&buffer).len();
        buffer.truncate(len);
        return Ok(buffer);
    }

    if !ui.is_interactive() {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Use --stdin.",
        )
        .into());
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    let password = prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    Ok(Zeroizing::new(password))
}

fn strip_line_ending(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(value)
}
