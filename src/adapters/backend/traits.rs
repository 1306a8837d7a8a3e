//! Export backend abstraction traits

use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::view::View;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// AutoCAD drawing exchange format
    Dxf,
    /// ACIS solid model text format
    Sat,
}

impl ExportFormat {
    /// File extension the backend appends, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dxf => "dxf",
            Self::Sat => "sat",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dxf => write!(f, "DXF"),
            Self::Sat => write!(f, "SAT"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dxf" => Ok(Self::Dxf),
            "sat" => Ok(Self::Sat),
            _ => Err(format!("Invalid export format '{s}'. Must be 'dxf' or 'sat'")),
        }
    }
}

/// A writer for one export format
///
/// Implementations receive the file name without extension and append their
/// own. They overwrite an existing file of the same name.
pub trait ExportBackend {
    /// Format this backend writes
    fn format(&self) -> ExportFormat;

    /// Write the elements visible in `view` to `{folder}/{filename}.{ext}`
    ///
    /// # Arguments
    ///
    /// * `folder` - Existing output directory
    /// * `filename` - File name without extension
    /// * `document` - Document the view belongs to
    /// * `view` - View whose visible elements are written
    ///
    /// # Returns
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`CncFabError::Backend`] if the folder does not exist or the
    /// file cannot be written.
    fn export(&self, folder: &Path, filename: &str, document: &Document, view: &View) -> Result<PathBuf>;
}

/// Resolve the output path, checking the folder exists
pub(crate) fn output_path(folder: &Path, filename: &str, format: ExportFormat) -> Result<PathBuf> {
    if !folder.is_dir() {
        return Err(CncFabError::Backend(format!(
            "Output folder {} does not exist",
            folder.display()
        )));
    }
    if filename.is_empty() {
        return Err(CncFabError::Backend("Empty export file name".to_string()));
    }
    Ok(folder.join(format!("{filename}.{}", format.extension())))
}
