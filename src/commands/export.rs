//! Export selected wall parts

use crate::adapters::backend::{create_backend, ExportFormat};
use crate::commands::CommandResult;
use crate::core::eligibility::{EligibilityResolver, Resolution};
use crate::core::export::ExportOrchestrator;
use crate::core::ledger::ParameterLedger;
use crate::domain::errors::{CncFabError, ValidationError};
use crate::domain::result::Result;
use crate::host::application::{Application, CAPTION};
use crate::host::traits::UserInterface;
use crate::log_error_with_context;
use crate::model::document::Document;

/// Shown when the export history parameters are not bound
pub const LEDGER_UNAVAILABLE_MESSAGE: &str =
    "Please initialise the CNC fabrication export history shared parameters before launching this command.";

/// Export the selected (or picked) wall parts, one file per part
///
/// Validation happens before anything is written. The user then chooses
/// the output directory, which is remembered on the application. Parts are
/// exported in selection order and the export history of every written
/// part is recorded afterwards, even if a later part failed.
///
/// # Arguments
///
/// * `app` - The running application
/// * `document` - Active document
/// * `ui` - Prompts and messages
/// * `format` - Backend to export with
///
/// # Errors
///
/// Returns backend, naming or transaction errors. The export history of
/// parts written before the error has already been recorded.
pub fn export_parts<U: UserInterface + ?Sized>(
    app: &mut Application,
    document: Option<&mut Document>,
    ui: &mut U,
    format: ExportFormat,
) -> Result<CommandResult> {
    tracing::info!(format = %format, "Export command started");

    let Some(document) = document else {
        return Ok(reject(ui, ValidationError::NoActiveDocument));
    };

    let (view_id, targets) = {
        let resolver = match EligibilityResolver::new(Some(&*document)) {
            Ok(resolver) => resolver,
            Err(CncFabError::Validation(e)) => return Ok(reject(ui, e)),
            Err(e) => return Err(e),
        };
        match resolver.resolve(ui) {
            Ok(Resolution::Targets(targets)) => (resolver.view_id(), targets),
            Ok(Resolution::Cancelled) => return Ok(CommandResult::Cancelled),
            Err(CncFabError::Validation(e)) => return Ok(reject(ui, e)),
            Err(e) => return Err(e),
        }
    };

    let mut ledger = ParameterLedger::bind(document, targets[0].part_id());
    if !ledger.is_valid() {
        tracing::warn!(error = %CncFabError::LedgerUnavailable, "Export aborted");
        ui.show_error(CAPTION, LEDGER_UNAVAILABLE_MESSAGE);
        return Ok(CommandResult::Failed);
    }

    let Some(folder) = ui.browse_directory(app.output_directory.path(), true) else {
        tracing::info!("Output directory selection cancelled");
        return Ok(CommandResult::Cancelled);
    };
    app.output_directory.set(folder.clone());

    let backend = create_backend(format);
    let orchestrator = ExportOrchestrator::new(backend.as_ref(), folder);
    let outcome = orchestrator.export_targets(
        document,
        view_id,
        &targets,
        &mut ledger,
        &mut app.dialogs,
        ui,
    );

    let recorded = match ledger.flush(document) {
        Ok(recorded) => recorded,
        Err(flush_error) => {
            if let Err(export_error) = &outcome {
                log_error_with_context!(export_error, "Export failed before the history flush");
            }
            return Err(flush_error);
        }
    };
    tracing::info!(recorded, "Export history recorded");

    outcome.map(|_| CommandResult::Succeeded)
}

fn reject<U: UserInterface + ?Sized>(ui: &mut U, error: ValidationError) -> CommandResult {
    tracing::warn!(reason = %error, element = ?error.element_id(), "Export rejected");
    ui.show_error(CAPTION, &error.to_string());
    CommandResult::Failed
}
