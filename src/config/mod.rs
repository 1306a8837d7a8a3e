//! Configuration management for CncFab.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! CncFab uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `CNCFAB_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cncfab::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cncfab.toml")?;
//!
//! println!("Output folder: {}", config.export.default_folder);
//! println!("Definition group: {}", config.shared_parameters.group_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Initial output directory
//! - [`SharedParametersConfig`] - Shared parameter file and definition group
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! default_folder = "/tmp/cncfab"
//!
//! [shared_parameters]
//! filename = "${CNCFAB_SHARED_PARAMETERS}"
//! group_name = "CncFab"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, CncFabConfig, ExportConfig, LoggingConfig, SharedParametersConfig};
