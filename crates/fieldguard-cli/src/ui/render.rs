//! Rendering primitives for CLI output.

use super::context::UiContext;
use super::theme::{dim, styled, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.text(), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key/value line, aligned for receipts.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    let label = format!("{:<12}", format!("{}:", key));
    format!("  {} {}", styled(&label, dim(), ctx.color), value)
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, message: &str) -> String {
    let text = format!("hint: {}", message);
    if ctx.mode.is_pretty() {
        styled(&text, dim(), ctx.color)
    } else {
        text
    }
}

/// Render a receipt: a badge line followed by key/value details.
pub fn receipt(ctx: &UiContext, title: &str, rows: &[(&str, String)]) -> String {
    let mut out = badge(ctx, Badge::Ok, title);
    for (key, value) in rows {
        out.push('\n');
        out.push_str(&kv(ctx, key, value));
    }
    out
}

/// Render an error message with optional hint.
pub fn error_message(ctx: &UiContext, message: &str, hint_text: Option<&str>) -> String {
    let mut out = badge(ctx, Badge::Err, message);
    if let Some(h) = hint_text {
        out.push('\n');
        out.push_str(&hint(ctx, h));
    }
    out
}

/// Print an error to stderr.
pub fn print_error(ctx: &UiContext, message: &str, hint_text: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, hint_text));
}
