//! Application-level utilities for the Fieldguard CLI.
//!
//! This module provides:
//! - Config path resolution
//! - The shared command context (config, secret, service)

mod context;
mod resolver;

pub use context::AppContext;
