//! Application-wide state shared by every command in one process

use crate::config::CncFabConfig;
use crate::host::dialogs::DialogRegistry;
use std::path::{Path, PathBuf};

/// Caption of every message box the commands show
pub const CAPTION: &str = "Export to CNC Fabrication";

/// Default shared parameter definition group
pub const DEFAULT_DEFINITION_GROUP: &str = "CncFab";

/// Remembered output directory
///
/// Seeded once per process and overwritten by every directory the user
/// picks. It is never persisted, so a restart starts over at the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory(PathBuf);

impl OutputDirectory {
    /// Seed the remembered directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Current directory
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Remember a newly chosen directory
    pub fn set(&mut self, path: PathBuf) {
        tracing::debug!(folder = %path.display(), "Output directory remembered");
        self.0 = path;
    }
}

impl Default for OutputDirectory {
    fn default() -> Self {
        Self(std::env::temp_dir().join("cncfab"))
    }
}

/// The running application
#[derive(Debug, Default)]
pub struct Application {
    shared_parameters_filename: Option<PathBuf>,
    definition_group_name: String,
    /// Dialog overrides
    pub dialogs: DialogRegistry,
    /// Remembered output directory
    pub output_directory: OutputDirectory,
}

impl Application {
    /// Create an application with no shared parameter file configured
    pub fn new() -> Self {
        Self {
            definition_group_name: DEFAULT_DEFINITION_GROUP.to_string(),
            ..Default::default()
        }
    }

    /// Create an application seeded from configuration
    pub fn from_config(config: &CncFabConfig) -> Self {
        let shared = &config.shared_parameters;
        Self {
            shared_parameters_filename: shared
                .filename
                .as_deref()
                .filter(|f| !f.trim().is_empty())
                .map(PathBuf::from),
            definition_group_name: shared.group_name.clone(),
            dialogs: DialogRegistry::new(),
            output_directory: OutputDirectory::new(&config.export.default_folder),
        }
    }

    /// Configured shared parameter file
    pub fn shared_parameters_filename(&self) -> Option<&Path> {
        self.shared_parameters_filename.as_deref()
    }

    /// Configure the shared parameter file
    pub fn set_shared_parameters_filename(&mut self, path: PathBuf) {
        self.shared_parameters_filename = Some(path);
    }

    /// Shared parameter definition group name
    pub fn definition_group_name(&self) -> &str {
        &self.definition_group_name
    }
}
