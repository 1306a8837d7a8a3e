//! `shell` command implementation
//!
//! Reads commands from stdin and runs them in the same session, so the
//! output directory chosen by one export is offered by the next.

use crate::adapters::backend::ExportFormat;
use crate::cli::commands::export::ExportArgs;
use crate::cli::commands::parameters::ParametersArgs;
use crate::cli::commands::status::StatusArgs;
use crate::cli::session::Session;
use crate::host::console::ConsoleUi;
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};

/// Arguments for the shell command
#[derive(Args, Debug, Clone, Default)]
pub struct ShellArgs {}

/// One line of shell input
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    /// Command to run
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell
#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Export selected wall parts to DXF
    Dxf(ExportArgs),
    /// Export selected wall parts to SAT
    Sat(ExportArgs),
    /// Create and bind the export history shared parameters
    CreateParameters(ParametersArgs),
    /// List parts with their export history
    Status(StatusArgs),
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

impl ShellArgs {
    /// Execute the shell on stdin/stdout
    pub fn execute(&self, session: &mut Session) -> anyhow::Result<i32> {
        let mut last = 0;
        loop {
            print!("cncfab> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                break;
            }

            match run_line(&line, session)? {
                Some(code) => last = code,
                None => break,
            }
        }
        tracing::info!(exit_code = last, "Shell closed");
        Ok(last)
    }
}

/// Run one shell line; `None` ends the shell
fn run_line(line: &str, session: &mut Session) -> anyhow::Result<Option<i32>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Some(0));
    }

    let parsed = match ShellLine::try_parse_from(tokens) {
        Ok(parsed) => parsed,
        Err(e) => {
            e.print()?;
            return Ok(Some(2));
        }
    };

    let code = match parsed.command {
        ShellCommand::Dxf(args) => args.run(ExportFormat::Dxf, session, &mut ConsoleUi::stdio()),
        ShellCommand::Sat(args) => args.run(ExportFormat::Sat, session, &mut ConsoleUi::stdio()),
        ShellCommand::CreateParameters(args) => args.run(session, &mut ConsoleUi::stdio()),
        ShellCommand::Status(args) => args.execute(session)?,
        ShellCommand::Exit => return Ok(None),
    };
    Ok(Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_lines() {
        let line = ShellLine::try_parse_from(["dxf", "--select", "205,77"]).unwrap();
        match line.command {
            ShellCommand::Dxf(args) => assert_eq!(args.select, vec![205, 77]),
            other => panic!("unexpected {other:?}"),
        }

        let line = ShellLine::try_parse_from(["quit"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Exit));

        assert!(ShellLine::try_parse_from(["init"]).is_err());
    }
}
