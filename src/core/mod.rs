//! Core business logic for CncFab.
//!
//! # Modules
//!
//! - [`eligibility`] - Context checks and selection resolution
//! - [`export`] - The per-target export loop, file naming and summary
//! - [`ledger`] - Export history parameters and their binding
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Check the active view and turn the selection into export targets
//! 2. **Bind**: Locate the export history parameters on the first target
//! 3. **Export**: Isolate and write each target inside a discarded transaction group
//! 4. **Flush**: Record the export history of every written part in one transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use cncfab::adapters::backend::{create_backend, ExportFormat};
//! use cncfab::core::eligibility::{EligibilityResolver, Resolution};
//! use cncfab::core::export::ExportOrchestrator;
//! use cncfab::core::ledger::ParameterLedger;
//! use cncfab::host::{Application, ConsoleUi};
//! use cncfab::model::Document;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = Application::new();
//! let mut ui = ConsoleUi::stdio();
//! let mut document = Document::load(Path::new("model.json"))?;
//!
//! let resolver = EligibilityResolver::new(Some(&document))?;
//! let view_id = resolver.view_id();
//! let Resolution::Targets(targets) = resolver.resolve(&mut ui)? else {
//!     return Ok(());
//! };
//!
//! let mut ledger = ParameterLedger::bind(&document, targets[0].part_id());
//! let backend = create_backend(ExportFormat::Dxf);
//! let orchestrator = ExportOrchestrator::new(backend.as_ref(), "/out");
//! let outcome = orchestrator.export_targets(
//!     &mut document,
//!     view_id,
//!     &targets,
//!     &mut ledger,
//!     &mut app.dialogs,
//!     &mut ui,
//! );
//! ledger.flush(&mut document)?;
//! outcome?;
//! # Ok(())
//! # }
//! ```

pub mod eligibility;
pub mod export;
pub mod ledger;
