// CncFab - Export wall parts to CNC fabrication formats
// Copyright (c) 2025 CncFab Contributors
// Licensed under the MIT License

use clap::Parser;
use cncfab::adapters::backend::ExportFormat;
use cncfab::cli::{load_config_or_default, Cli, Commands, Session};
use cncfab::config::CncFabConfig;
use cncfab::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration validation failed: {e}");
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());
    let guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "CncFab - Export wall parts to CNC fabrication formats"
    );

    let exit_code = match execute_command(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &CncFabConfig) -> anyhow::Result<i32> {
    let mut session = Session::new(config, cli.model.as_deref())?;

    match &cli.command {
        Commands::Dxf(args) => args.execute(ExportFormat::Dxf, &mut session),
        Commands::Sat(args) => args.execute(ExportFormat::Sat, &mut session),
        Commands::CreateParameters(args) => args.execute(&mut session),
        Commands::Status(args) => args.execute(&session),
        Commands::Shell(args) => args.execute(&mut session),
    }
}
