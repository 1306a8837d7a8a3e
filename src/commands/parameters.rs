//! Create and bind the export history parameters

use crate::commands::CommandResult;
use crate::core::ledger::create_export_parameters;
use crate::domain::errors::ValidationError;
use crate::domain::result::Result;
use crate::host::application::{Application, CAPTION};
use crate::host::traits::UserInterface;
use crate::model::document::Document;

/// Ensure the export history parameters exist and are bound to parts
///
/// Safe to run repeatedly.
///
/// # Errors
///
/// Returns shared parameter file or transaction errors.
pub fn create_shared_parameters<U: UserInterface + ?Sized>(
    app: &mut Application,
    document: Option<&mut Document>,
    ui: &mut U,
) -> Result<CommandResult> {
    let Some(document) = document else {
        let error = ValidationError::NoActiveDocument;
        ui.show_error(CAPTION, &error.to_string());
        return Ok(CommandResult::Failed);
    };

    let report = create_export_parameters(app, document)?;
    ui.show_info(
        CAPTION,
        &format!(
            "Export history shared parameters are bound to parts ({}).",
            report.shared_parameters_file.display()
        ),
    );
    Ok(CommandResult::Succeeded)
}
