//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human readable console output
//! - Configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cncfab::logging::init_logging;
//! use cncfab::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard, LOG_FILE_NAME};

/// Log the start of an export batch
///
/// # Example
///
/// ```no_run
/// use cncfab::log_export_start;
/// use cncfab::adapters::backend::ExportFormat;
/// use std::path::Path;
///
/// log_export_start!(ExportFormat::Dxf, Path::new("/out").display(), 3);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($format:expr, $folder:expr, $count:expr) => {
        tracing::info!(
            format = %$format,
            folder = %$folder,
            targets = $count,
            "Starting export"
        );
    };
}

/// Log one exported part
///
/// # Example
///
/// ```no_run
/// use cncfab::log_part_exported;
/// use cncfab::domain::ElementId;
///
/// log_part_exported!(ElementId::new(205), ElementId::new(100), "Level_1_100_205");
/// ```
#[macro_export]
macro_rules! log_part_exported {
    ($part_id:expr, $host_id:expr, $filename:expr) => {
        tracing::info!(
            part_id = %$part_id,
            host_id = %$host_id,
            filename = %$filename,
            "Part exported"
        );
    };
}

/// Log the completion of an export batch
///
/// # Example
///
/// ```no_run
/// use cncfab::log_export_complete;
/// use std::time::Duration;
///
/// let count = 2;
/// let duration = Duration::from_millis(250);
/// log_export_complete!(count, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cncfab::log_error_with_context;
/// use cncfab::domain::CncFabError;
///
/// let error = CncFabError::Backend("disk full".to_string());
/// log_error_with_context!(&error, "Export aborted");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
