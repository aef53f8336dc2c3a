//! Input helper functions for the CLI.

mod input;

pub use input::{read_password, read_text};
