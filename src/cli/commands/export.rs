//! `dxf` and `sat` command implementation

use crate::adapters::backend::ExportFormat;
use crate::cli::session::{error_exit_code, Session};
use crate::commands::CommandResult;
use crate::domain::errors::CncFabError;
use crate::domain::ids::ElementId;
use crate::host::application::CAPTION;
use crate::host::console::ConsoleUi;
use crate::host::traits::UserInterface;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the export commands
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Element ids to pre-select (comma-separated); pick interactively when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub select: Vec<i64>,
}

impl ExportArgs {
    /// Execute the export command on the console
    pub fn execute(&self, format: ExportFormat, session: &mut Session) -> anyhow::Result<i32> {
        let mut ui = ConsoleUi::stdio();
        Ok(self.run(format, session, &mut ui))
    }

    /// Execute the export command against any user interface
    pub fn run<U: UserInterface + ?Sized>(&self, format: ExportFormat, session: &mut Session, ui: &mut U) -> i32 {
        let select: Vec<ElementId> = self.select.iter().copied().map(ElementId::new).collect();

        match session.export(format, &select, ui) {
            Ok(result) => {
                if result == CommandResult::Succeeded {
                    ui.show_info(CAPTION, &format!("{format} export complete."));
                }
                result.exit_code()
            }
            Err(e) => {
                log_error_with_context!(&e, "Export command failed");
                // Internal failures are logged only, never shown to the user
                if !matches!(e, CncFabError::Invariant(_)) {
                    ui.show_error(CAPTION, &e.to_string());
                }
                error_exit_code(&e)
            }
        }
    }
}
