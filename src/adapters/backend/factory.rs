//! Export backend factory

use crate::adapters::backend::dxf::DxfBackend;
use crate::adapters::backend::sat::SatBackend;
use crate::adapters::backend::traits::{ExportBackend, ExportFormat};

/// Create the backend for a format
///
/// The format is fixed per command, so the backend is created once and
/// reused for every target of the batch.
pub fn create_backend(format: ExportFormat) -> Box<dyn ExportBackend> {
    tracing::debug!(format = %format, "Creating export backend");
    match format {
        ExportFormat::Dxf => Box::new(DxfBackend::new()),
        ExportFormat::Sat => Box::new(SatBackend::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_matches_format() {
        assert_eq!(create_backend(ExportFormat::Dxf).format(), ExportFormat::Dxf);
        assert_eq!(create_backend(ExportFormat::Sat).format(), ExportFormat::Sat);
    }
}
