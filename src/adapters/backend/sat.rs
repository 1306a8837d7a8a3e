//! SAT export backend
//!
//! Writes a plain-text ACIS-style file: a fixed header, one planar face
//! record per visible part outline, and the end-of-data marker.

use crate::adapters::backend::traits::{output_path, ExportBackend, ExportFormat};
use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::view::View;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

const ACIS_VERSION: u32 = 700;
const END_MARKER: &str = "End-of-ACIS-data";

/// Writes visible part outlines as ACIS text faces
#[derive(Debug, Default, Clone, Copy)]
pub struct SatBackend;

impl SatBackend {
    /// Create a SAT backend
    pub fn new() -> Self {
        Self
    }

    fn render(document: &Document, view: &View) -> std::result::Result<String, fmt::Error> {
        let faces: Vec<_> = document
            .visible_elements(view)
            .into_iter()
            .filter(|e| e.is_part() && !e.outline.is_empty())
            .collect();

        let mut out = String::new();
        let product = concat!("cncfab ", env!("CARGO_PKG_VERSION"));
        writeln!(out, "{ACIS_VERSION} 0 {} 0", faces.len())?;
        writeln!(
            out,
            "@{} {} @{} {}",
            product.len(),
            product,
            document.title().len(),
            document.title()
        )?;
        writeln!(out, "1 9.9999999999999995e-07 1e-10")?;

        for (index, part) in faces.iter().enumerate() {
            write!(out, "-{index} face $part_{} {}", part.id, part.outline.len())?;
            for [x, y] in &part.outline {
                write!(out, " {x} {y} 0")?;
            }
            writeln!(out, " #")?;
        }
        writeln!(out, "{END_MARKER}")?;
        Ok(out)
    }
}

impl ExportBackend for SatBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Sat
    }

    fn export(&self, folder: &Path, filename: &str, document: &Document, view: &View) -> Result<PathBuf> {
        let path = output_path(folder, filename, self.format())?;
        let text = Self::render(document, view)
            .map_err(|e| CncFabError::Backend(format!("Failed to render {}: {}", path.display(), e)))?;
        fs::write(&path, text)
            .map_err(|e| CncFabError::Backend(format!("Failed to write {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "SAT written");
        Ok(path)
    }
}
