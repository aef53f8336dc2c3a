//! Progress indicators for slow operations using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::context::UiContext;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];

/// A spinner for indeterminate progress, drawn on stderr.
///
/// Stdout is left untouched so command output stays pipeable.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        let bar = if ctx.allows_animation() {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}...")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(SPINNER_FRAMES);
            pb.set_style(style);
            pb.set_message(message.to_string());
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    /// Begin animating.
    pub fn start(&self) {
        if let Some(bar) = &self.bar {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    /// Remove the spinner without printing anything.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_spinner_without_tty_has_no_bar() {
        let ctx = plain_ctx();
        let spinner = Spinner::new(&ctx, "Hashing");
        assert!(spinner.bar.is_none());
        spinner.start();
        spinner.clear();
    }
}
