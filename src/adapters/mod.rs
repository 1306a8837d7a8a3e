//! External system integrations for CncFab.
//!
//! This module provides adapters for the collaborators outside the core
//! pipeline:
//!
//! - [`backend`] - Export backends (DXF, SAT) behind the [`backend::ExportBackend`] trait
//! - [`shared_params`] - The shared parameter file store
//!
//! # Design Pattern
//!
//! Adapters isolate file formats and external crates from the core. The
//! backend layer uses a trait plus a factory so the pipeline picks a format
//! once per command and tests can substitute their own backend:
//!
//! ```rust,no_run
//! use cncfab::adapters::backend::{create_backend, ExportFormat};
//!
//! let backend = create_backend(ExportFormat::Dxf);
//! assert_eq!(backend.format().extension(), "dxf");
//! ```

pub mod backend;
pub mod shared_params;
