//! Output formatting helpers for the CLI.

mod json;
mod text;

pub use json::{bundle_json, check_json};
pub use text::check_rows;
