//! `create-parameters` command implementation

use crate::cli::session::{error_exit_code, Session};
use crate::host::application::CAPTION;
use crate::host::console::ConsoleUi;
use crate::host::traits::UserInterface;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the create-parameters command
#[derive(Args, Debug, Clone, Default)]
pub struct ParametersArgs {
    /// Shared parameter file to use instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub shared_parameters: Option<PathBuf>,
}

impl ParametersArgs {
    /// Execute the command on the console
    pub fn execute(&self, session: &mut Session) -> anyhow::Result<i32> {
        let mut ui = ConsoleUi::stdio();
        Ok(self.run(session, &mut ui))
    }

    /// Execute the command against any user interface
    pub fn run<U: UserInterface + ?Sized>(&self, session: &mut Session, ui: &mut U) -> i32 {
        if let Some(path) = &self.shared_parameters {
            tracing::info!(path = %path.display(), "Overriding shared parameter file from CLI");
            session.app.set_shared_parameters_filename(path.clone());
        }

        match session.create_parameters(ui) {
            Ok(result) => result.exit_code(),
            Err(e) => {
                log_error_with_context!(&e, "Binding creation failed");
                ui.show_error(CAPTION, &e.to_string());
                error_exit_code(&e)
            }
        }
    }
}
