//! Export summary and reporting

use crate::adapters::backend::ExportFormat;
use crate::domain::ids::ElementId;
use std::path::PathBuf;
use std::time::Duration;

/// A part written by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPart {
    /// Exported part
    pub part_id: ElementId,

    /// Element the part was derived from
    pub host_id: ElementId,

    /// File written by the backend
    pub path: PathBuf,
}

/// Summary of one export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Backend format
    pub format: ExportFormat,

    /// Output directory
    pub folder: PathBuf,

    /// Number of targets handed to the orchestrator
    pub total_targets: usize,

    /// Parts written, in export order
    pub exported: Vec<ExportedPart>,

    /// Duration of the export loop
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(format: ExportFormat, folder: impl Into<PathBuf>, total_targets: usize) -> Self {
        Self {
            format,
            folder: folder.into(),
            total_targets,
            exported: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written part
    pub fn add_exported(&mut self, part_id: ElementId, host_id: ElementId, path: PathBuf) {
        self.exported.push(ExportedPart {
            part_id,
            host_id,
            path,
        });
    }

    /// Number of parts written
    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }

    /// Whether every target was written
    pub fn is_complete(&self) -> bool {
        self.exported.len() == self.total_targets
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            format = %self.format,
            folder = %self.folder.display(),
            total_targets = self.total_targets,
            exported = self.exported.len(),
            duration_ms = self.duration.as_millis(),
            "Export summary"
        );

        if !self.is_complete() {
            tracing::warn!(
                skipped = self.total_targets - self.exported.len(),
                "Export stopped before all targets were written"
            );
        }
    }
}
