//! Per-target export loop
//!
//! Every isolate change happens inside one [`TransactionGroup`] that is
//! always discarded, so the document leaves the loop exactly as it entered
//! it. Files on disk and the ids collected by the ledger are the only
//! lasting effects. The temporary view modes prompt is auto-answered for
//! the duration of the loop.

use crate::adapters::backend::ExportBackend;
use crate::core::eligibility::ExportTarget;
use crate::core::export::naming::{export_filename, level_name_for};
use crate::core::export::summary::ExportSummary;
use crate::core::ledger::ParameterLedger;
use crate::domain::errors::CncFabError;
use crate::domain::ids::ElementId;
use crate::domain::result::Result;
use crate::host::dialogs::{DialogContext, DialogRegistry, DialogResult, TEMP_VIEW_MODES_DIALOG};
use crate::host::traits::DialogResponder;
use crate::model::document::Document;
use crate::model::transaction::{Transaction, TransactionGroup};
use crate::{log_error_with_context, log_export_complete, log_export_start, log_part_exported};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Name of the discarded transaction group around the loop
pub const GROUP_NAME: &str = "Export Wall Parts";

/// Answer given to the temporary view modes prompt during the loop
pub const TEMP_VIEW_MODES_ANSWER: DialogResult = DialogResult::CommandLink2;

/// Drives the export of an ordered list of targets through one backend
pub struct ExportOrchestrator<'b> {
    backend: &'b dyn ExportBackend,
    folder: PathBuf,
}

impl<'b> ExportOrchestrator<'b> {
    /// Create an orchestrator writing into `folder`
    pub fn new(backend: &'b dyn ExportBackend, folder: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            folder: folder.into(),
        }
    }

    /// Output directory
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Export every target in order
    ///
    /// Each successfully written part is added to `ledger`. The first
    /// failure stops the loop; ids added before it stay in the ledger so
    /// the caller can still flush them.
    ///
    /// # Arguments
    ///
    /// * `document` - Document to export from; unchanged on return
    /// * `view_id` - 3D view the parts are isolated in
    /// * `targets` - Validated targets, in export order
    /// * `ledger` - Collects the exported part ids
    /// * `dialogs` - Host dialog overrides
    /// * `responder` - Answers prompts no override handles
    ///
    /// # Errors
    ///
    /// Returns the first naming, transaction or backend error.
    pub fn export_targets<R: DialogResponder + ?Sized>(
        &self,
        document: &mut Document,
        view_id: ElementId,
        targets: &[ExportTarget],
        ledger: &mut ParameterLedger,
        dialogs: &mut DialogRegistry,
        responder: &mut R,
    ) -> Result<ExportSummary> {
        let format = self.backend.format();
        log_export_start!(format, self.folder.display(), targets.len());

        let start = Instant::now();
        let mut summary = ExportSummary::new(format, &self.folder, targets.len());

        let guard = dialogs.suppress(TEMP_VIEW_MODES_DIALOG, TEMP_VIEW_MODES_ANSWER);
        let mut prompts = DialogContext::new(&guard, responder);

        let outcome = match TransactionGroup::start(document, GROUP_NAME) {
            Ok(mut group) => {
                let outcome = self.run(&mut group, view_id, targets, ledger, &mut prompts, &mut summary);
                group.rollback();
                outcome
            }
            Err(e) => Err(e),
        };
        drop(prompts);
        drop(guard);

        summary = summary.with_duration(start.elapsed());
        match outcome {
            Ok(()) => {
                log_export_complete!(summary.exported_count(), summary.duration);
                summary.log_summary();
                Ok(summary)
            }
            Err(e) => {
                log_error_with_context!(&e, "Export loop aborted");
                summary.log_summary();
                Err(e)
            }
        }
    }

    fn run<R: DialogResponder + ?Sized>(
        &self,
        document: &mut Document,
        view_id: ElementId,
        targets: &[ExportTarget],
        ledger: &mut ParameterLedger,
        prompts: &mut DialogContext<'_, R>,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        for target in targets {
            let part_id = target.part_id();
            let host_id = target.host_id();

            let sort_mark = ledger.sort_mark_for(document, part_id);
            let level_name = level_name_for(document, host_id).inspect_err(|e| {
                tracing::error!(part_id = %part_id, host_id = %host_id, error = %e, "Level lookup failed");
            })?;
            let filename = export_filename(&level_name, sort_mark.as_deref(), host_id, part_id);

            isolate(document, view_id, part_id)?;

            let path = document.export(&self.folder, &filename, view_id, self.backend, prompts)?;

            ledger.add(part_id);
            summary.add_exported(part_id, host_id, path);
            log_part_exported!(part_id, host_id, filename);
        }
        Ok(())
    }
}

/// Show only `part_id` in the view, clearing any stale isolate first
fn isolate(document: &mut Document, view_id: ElementId, part_id: ElementId) -> Result<()> {
    let active = document
        .view(view_id)
        .ok_or_else(|| CncFabError::Invariant(format!("View {view_id} does not exist")))?
        .is_temporary_hide_isolate_active();

    if active {
        let mut tx = Transaction::start(&mut *document, "Disable Temporary Isolate")?;
        tx.disable_temporary_hide_isolate(view_id)?;
        tx.commit();
    }

    let mut tx = Transaction::start(&mut *document, format!("Export Wall Part {part_id}"))?;
    tx.isolate_element_temporary(view_id, part_id)?;
    tx.commit();
    Ok(())
}
