//! Export orchestration
//!
//! - [`naming`] - Deterministic file names for exported parts
//! - [`orchestrator`] - The per-target export loop
//! - [`summary`] - Summary and reporting

pub mod naming;
pub mod orchestrator;
pub mod summary;

pub use naming::{export_filename, level_name_for};
pub use orchestrator::{ExportOrchestrator, GROUP_NAME};
pub use summary::{ExportSummary, ExportedPart};
