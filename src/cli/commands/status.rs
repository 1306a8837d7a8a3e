//! `status` command implementation

use crate::cli::session::Session;
use crate::commands::PartStatus;
use crate::domain::errors::ValidationError;
use clap::Args;
use std::io::Write;

/// Arguments for the status command
#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Only list parts that were never exported
    #[arg(long)]
    pub pending: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub fn execute(&self, session: &Session) -> anyhow::Result<i32> {
        let mut out = std::io::stdout().lock();
        self.write(session, &mut out)
    }

    /// Write the status report to `out`
    pub fn write<W: Write>(&self, session: &Session, out: &mut W) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        let Some(parts) = session.status() else {
            writeln!(out, "{}", ValidationError::NoActiveDocument)?;
            return Ok(3);
        };

        let parts: Vec<PartStatus> = parts
            .into_iter()
            .filter(|p| !self.pending || p.is_exported != Some(true))
            .collect();

        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&parts)?)?;
            return Ok(0);
        }

        writeln!(out, "{:<10} {:<10} {:<9} {:<24} {:<24}", "PART", "HOST", "EXPORTED", "FIRST", "LAST")?;
        for part in &parts {
            writeln!(
                out,
                "{:<10} {:<10} {:<9} {:<24} {:<24}",
                part.part_id,
                part.host_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                match part.is_exported {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "unbound",
                },
                part.exported_first.as_deref().unwrap_or("-"),
                part.exported_last.as_deref().unwrap_or("-"),
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{} part(s)", parts.len())?;
        Ok(0)
    }
}
