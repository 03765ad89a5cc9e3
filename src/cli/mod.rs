//! CLI command handlers

pub mod commands;

pub use commands::{init_config, parse, resolve_config, solve};
