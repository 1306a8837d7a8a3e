//! Command entry points
//!
//! Each command takes the running [`Application`](crate::host::Application),
//! the active document (if any) and a [`UserInterface`](crate::host::UserInterface)
//! and returns a [`CommandResult`]. User-correctable problems are shown as a
//! message and reported as [`CommandResult::Failed`]; only unexpected errors
//! are returned as `Err`.
//!
//! - [`export`] - Export selected wall parts to DXF or SAT
//! - [`parameters`] - Create and bind the export history parameters
//! - [`status`] - List every part with its export history

pub mod export;
pub mod parameters;
pub mod status;

pub use export::{export_parts, LEDGER_UNAVAILABLE_MESSAGE};
pub use parameters::create_shared_parameters;
pub use status::{export_status, PartStatus};

use serde::Serialize;

/// Outcome of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    /// The command ran to completion
    Succeeded,
    /// The user backed out of a prompt; nothing changed
    Cancelled,
    /// A precondition failed; the user has been told which
    Failed,
}

impl CommandResult {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Cancelled => 1,
            Self::Failed => 3,
        }
    }
}
