//! Per-process CLI session
//!
//! Holds the application state and the loaded model for as long as the
//! process runs, so the remembered output directory survives between the
//! commands of a `shell` session.

use crate::adapters::backend::ExportFormat;
use crate::commands::{self, CommandResult, PartStatus};
use crate::config::{load_config, CncFabConfig};
use crate::domain::errors::CncFabError;
use crate::domain::ids::ElementId;
use crate::domain::result::Result;
use crate::host::application::Application;
use crate::host::traits::UserInterface;
use crate::model::document::Document;
use std::path::Path;

/// Load the configuration file, falling back to defaults if it is missing
///
/// # Errors
///
/// Returns a configuration error if the file exists but is invalid.
pub fn load_config_or_default(path: &str) -> Result<CncFabConfig> {
    if !Path::new(path).exists() {
        tracing::warn!(path = %path, "Configuration file not found, using defaults");
        return Ok(CncFabConfig::default());
    }
    load_config(path)
}

/// Application state and active document of one CLI process
#[derive(Debug)]
pub struct Session {
    /// The running application
    pub app: Application,
    document: Option<Document>,
}

impl Session {
    /// Create a session, loading the model file if one is given
    ///
    /// # Errors
    ///
    /// Returns an error if the model file cannot be loaded.
    pub fn new(config: &CncFabConfig, model: Option<&Path>) -> Result<Self> {
        let document = model.map(Document::load).transpose()?;
        if let Some(document) = &document {
            tracing::info!(title = %document.title(), "Model opened");
        }
        Ok(Self {
            app: Application::from_config(config),
            document,
        })
    }

    /// Create a session around an already opened document
    pub fn with_document(app: Application, document: Option<Document>) -> Self {
        Self { app, document }
    }

    /// Active document
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Close the session and hand back the document
    pub fn into_document(self) -> Option<Document> {
        self.document
    }

    /// Run an export command
    ///
    /// A non-empty `select` replaces the document selection for the
    /// duration of the command. The model file is saved afterwards if the
    /// export history may have changed.
    ///
    /// # Errors
    ///
    /// Returns the export error, or a save error.
    pub fn export<U: UserInterface + ?Sized>(
        &mut self,
        format: ExportFormat,
        select: &[ElementId],
        ui: &mut U,
    ) -> Result<CommandResult> {
        let previous = match self.document.as_mut() {
            Some(document) if !select.is_empty() => {
                let previous = document.selection().to_vec();
                document.set_selection(select.to_vec());
                Some(previous)
            }
            _ => None,
        };

        let outcome = commands::export_parts(&mut self.app, self.document.as_mut(), ui, format);

        if let (Some(document), Some(previous)) = (self.document.as_mut(), previous) {
            document.set_selection(previous);
        }
        self.finish(outcome)
    }

    /// Run the binding creation command
    ///
    /// # Errors
    ///
    /// Returns the binding error, or a save error.
    pub fn create_parameters<U: UserInterface + ?Sized>(&mut self, ui: &mut U) -> Result<CommandResult> {
        let outcome = commands::create_shared_parameters(&mut self.app, self.document.as_mut(), ui);
        self.finish(outcome)
    }

    /// Export history of every part; `None` without a document
    pub fn status(&self) -> Option<Vec<PartStatus>> {
        self.document.as_ref().map(commands::export_status)
    }

    fn finish(&self, outcome: Result<CommandResult>) -> Result<CommandResult> {
        let changed = matches!(outcome, Ok(CommandResult::Succeeded) | Err(_));
        let saved = if changed { self.save() } else { Ok(()) };
        let result = outcome?;
        saved?;
        Ok(result)
    }

    fn save(&self) -> Result<()> {
        match &self.document {
            Some(document) if document.path().is_some() => document.save().map_err(|e| {
                tracing::error!(error = %e, "Failed to save model");
                e
            }),
            Some(_) => {
                tracing::debug!("Model has no backing file, changes kept in memory");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Exit code for a command error
pub fn error_exit_code(error: &CncFabError) -> i32 {
    match error {
        CncFabError::Configuration(_) => 2,
        CncFabError::Validation(_)
        | CncFabError::LedgerUnavailable
        | CncFabError::Backend(_)
        | CncFabError::Invariant(_)
        | CncFabError::SharedParameters(_) => 3,
        _ => 5,
    }
}
