//! CLI command implementations
//!
//! Each subcommand parses its own arguments and runs against the
//! [`Session`](crate::cli::Session). `execute` returns the process exit code.

pub mod export;
pub mod parameters;
pub mod shell;
pub mod status;
