//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for CncFab using clap.

pub mod commands;
pub mod session;

pub use session::{load_config_or_default, Session};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CncFab - Export wall parts to CNC fabrication formats
#[derive(Parser, Debug)]
#[command(name = "cncfab")]
#[command(version, about, long_about = None)]
#[command(author = "CncFab Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cncfab.toml", env = "CNCFAB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CNCFAB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Building model (JSON) to open
    #[arg(short, long, env = "CNCFAB_MODEL")]
    pub model: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export selected wall parts to DXF
    Dxf(commands::export::ExportArgs),

    /// Export selected wall parts to SAT
    Sat(commands::export::ExportArgs),

    /// Create and bind the export history shared parameters
    CreateParameters(commands::parameters::ParametersArgs),

    /// List parts with their export history
    Status(commands::status::StatusArgs),

    /// Run several commands in one session
    Shell(commands::shell::ShellArgs),
}
