// CncFab - Export wall parts to CNC fabrication formats
// Copyright (c) 2025 CncFab Contributors
// Licensed under the MIT License

//! # CncFab - Wall part export for CNC fabrication
//!
//! CncFab exports the wall parts of a building model as flat DXF or SAT
//! files, one file per part, for CNC cutting. Every exported part carries an
//! export history (exported at least once, first and latest export time)
//! stored as shared parameters on the part itself.
//!
//! ## Overview
//!
//! This library provides:
//! - **Validating** the viewing context and the selected parts before anything changes
//! - **Exporting** each part in isolation through a DXF or SAT backend
//! - **Discarding** every temporary view change made while exporting
//! - **Recording** the export history of written parts in one transaction
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`commands`] - Command entry points (export, binding creation, status)
//! - [`core`] - Business logic (eligibility, export loop, export history)
//! - [`adapters`] - Export backends and the shared parameter file
//! - [`host`] - Application state, dialogs and interactive collaborators
//! - [`model`] - The building model, its views and mutation scopes
//! - [`domain`] - Identifiers and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cncfab::adapters::backend::ExportFormat;
//! use cncfab::commands::{export_parts, CommandResult};
//! use cncfab::host::{Application, ConsoleUi};
//! use cncfab::model::Document;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = Application::new();
//!     let mut ui = ConsoleUi::stdio();
//!     let mut document = Document::load(Path::new("model.json"))?;
//!
//!     let result = export_parts(&mut app, Some(&mut document), &mut ui, ExportFormat::Dxf)?;
//!     if result == CommandResult::Succeeded {
//!         document.save()?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! CncFab uses the [`domain::CncFabError`] type for all errors. Validation
//! failures are shown to the user and reported as
//! [`commands::CommandResult::Failed`]; cancelling a prompt is
//! [`commands::CommandResult::Cancelled`], not an error.
//!
//! ## Logging
//!
//! CncFab uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(part_id = 205, filename = "Level_1_100_205", "Part exported");
//! warn!("Export stopped before all targets were written");
//! ```

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod host;
pub mod logging;
pub mod model;
