//! Creating and binding the export history shared parameters

use crate::adapters::shared_params::SharedParameterFile;
use crate::core::ledger::history::{EXPORTED_FIRST, EXPORTED_LAST, IS_EXPORTED};
use crate::domain::ids::BuiltInCategory;
use crate::domain::result::Result;
use crate::host::application::Application;
use crate::model::document::Document;
use crate::model::element::ParameterType;
use crate::model::parameters::{BindingKind, ParameterBinding};
use crate::model::transaction::Transaction;
use std::path::{Path, PathBuf};

/// File created in the temp directory when no shared parameter file is configured
pub const DEFAULT_SHARED_PARAMETERS_FILENAME: &str = "export_cnc_fab_shared_parameters.txt";

/// Name of the transaction that inserts the bindings
pub const BINDING_TRANSACTION: &str = "Create CNC Export Tracking Shared Parameters";

/// Outcome of [`create_export_parameters`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingReport {
    /// Shared parameter file holding the definitions
    pub shared_parameters_file: PathBuf,
    /// Number of bindings inserted or extended
    pub bindings_changed: usize,
}

/// Ensure the history parameters exist and are bound to parts
///
/// Uses the application's shared parameter file, creating an empty one in
/// the temp directory if none is configured. A definition the document
/// already binds to parts under the same name is reused and written to the
/// file if missing there; otherwise it is looked up in or added to the file.
/// Each definition is bound to the parts category as an instance binding.
/// Running it again changes nothing, even from a new process or against a
/// different shared parameter file.
///
/// # Errors
///
/// Returns an error if the shared parameter file cannot be created, read or
/// written, or the binding transaction fails.
pub fn create_export_parameters(app: &mut Application, document: &mut Document) -> Result<BindingReport> {
    let path = match app.shared_parameters_filename().map(Path::to_path_buf) {
        Some(path) => {
            if !path.exists() {
                SharedParameterFile::create_empty(&path)?;
            }
            path
        }
        None => {
            let path = std::env::temp_dir().join(DEFAULT_SHARED_PARAMETERS_FILENAME);
            if !path.exists() {
                SharedParameterFile::create_empty(&path)?;
            }
            app.set_shared_parameters_filename(path.clone());
            path
        }
    };

    let mut file = SharedParameterFile::open(&path)?;
    let group = file.get_or_create_group(app.definition_group_name());
    let definitions = [
        (IS_EXPORTED, ParameterType::YesNo),
        (EXPORTED_FIRST, ParameterType::Text),
        (EXPORTED_LAST, ParameterType::Text),
    ]
    .map(|(name, parameter_type)| {
        match document.parameters_for_category(BuiltInCategory::Parts, name).first() {
            Some(&bound) => {
                file.adopt_definition(&group, bound);
                bound.clone()
            }
            None => file.get_or_create_definition(&group, name, parameter_type),
        }
    });

    if file.is_modified() {
        file.save()?;
    }

    let mut tx = Transaction::start(document, BINDING_TRANSACTION)?;
    let mut bindings_changed = 0;
    for definition in definitions {
        let name = definition.name.clone();
        let changed = tx.insert_binding(ParameterBinding {
            definition,
            kind: BindingKind::Instance,
            categories: [BuiltInCategory::Parts].into_iter().collect(),
        })?;
        if changed {
            bindings_changed += 1;
            tracing::info!(parameter = %name, "Bound shared parameter to parts");
        }
    }
    tx.commit();

    tracing::info!(
        path = %path.display(),
        group = %group.name,
        bindings_changed,
        "Export history shared parameters ready"
    );

    Ok(BindingReport {
        shared_parameters_file: path,
        bindings_changed,
    })
}
