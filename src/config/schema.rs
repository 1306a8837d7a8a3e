//! Configuration schema types
//!
//! This module defines the configuration structure for CncFab.

use serde::{Deserialize, Serialize};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Main CncFab configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CncFabConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Shared parameter file settings
    #[serde(default)]
    pub shared_parameters: SharedParametersConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CncFabConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.shared_parameters.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory first offered by the output directory prompt
    #[serde(default = "default_folder")]
    pub default_folder: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_folder.trim().is_empty() {
            return Err("export.default_folder cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_folder: default_folder(),
        }
    }
}

/// Shared parameter file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedParametersConfig {
    /// Shared parameter file; a file in the temp directory is created when unset
    #[serde(default)]
    pub filename: Option<String>,

    /// Definition group holding the export history parameters
    #[serde(default = "default_group_name")]
    pub group_name: String,
}

impl SharedParametersConfig {
    fn validate(&self) -> Result<(), String> {
        if self.group_name.trim().is_empty() {
            return Err("shared_parameters.group_name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SharedParametersConfig {
    fn default() -> Self {
        Self {
            filename: None,
            group_name: default_group_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                VALID_ROTATIONS.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_folder() -> String {
    std::env::temp_dir().join("cncfab").display().to_string()
}

fn default_group_name() -> String {
    crate::host::application::DEFAULT_DEFINITION_GROUP.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
