//! DXF export backend

use crate::adapters::backend::traits::{output_path, ExportBackend, ExportFormat};
use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::view::View;
use std::path::{Path, PathBuf};

/// Writes visible parts as closed polylines, one layer per part
#[derive(Debug, Default, Clone, Copy)]
pub struct DxfBackend;

impl DxfBackend {
    /// Create a DXF backend
    pub fn new() -> Self {
        Self
    }

    fn layer_name(element: &Element) -> String {
        format!("PART_{}", element.id)
    }

    fn polyline(element: &Element) -> dxf::entities::Entity {
        let mut lwpoly = dxf::entities::LwPolyline::default();
        lwpoly.set_is_closed(true);
        lwpoly.vertices = element
            .outline
            .iter()
            .map(|[x, y]| {
                let mut vertex = dxf::LwPolylineVertex::default();
                vertex.x = *x;
                vertex.y = *y;
                vertex
            })
            .collect();

        let mut entity = dxf::entities::Entity::new(dxf::entities::EntityType::LwPolyline(lwpoly));
        entity.common.layer = Self::layer_name(element);
        entity
    }
}

impl ExportBackend for DxfBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Dxf
    }

    fn export(&self, folder: &Path, filename: &str, document: &Document, view: &View) -> Result<PathBuf> {
        let path = output_path(folder, filename, self.format())?;
        let mut drawing = dxf::Drawing::new();

        let parts: Vec<&Element> = document
            .visible_elements(view)
            .into_iter()
            .filter(|e| e.is_part() && !e.outline.is_empty())
            .collect();

        for part in &parts {
            let mut layer = dxf::tables::Layer::default();
            layer.name = Self::layer_name(part);
            drawing.add_layer(layer);
            drawing.add_entity(Self::polyline(part));
        }

        drawing
            .save_file(&path)
            .map_err(|e| CncFabError::Backend(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            entities = parts.len(),
            "DXF written"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{BuiltInCategory, ElementId};
    use crate::model::document::ModelState;
    use crate::model::view::{PartsVisibility, ViewKind};

    fn doc() -> Document {
        let square = vec![[0.0, 0.0], [1200.0, 0.0], [1200.0, 2400.0], [0.0, 2400.0]];
        Document::new(
            ModelState::new("Dxf")
                .with_element(
                    Element::part(ElementId::new(205), vec![ElementId::new(100)], vec![BuiltInCategory::Walls])
                        .with_outline(square.clone()),
                )
                .with_element(
                    Element::part(ElementId::new(77), vec![ElementId::new(50)], vec![BuiltInCategory::Walls])
                        .with_outline(square),
                )
                .with_view(
                    View::new(ElementId::new(10), "{3D}", ViewKind::ThreeD)
                        .with_parts_visibility(PartsVisibility::ShowPartsOnly),
                ),
        )
    }

    #[test]
    fn test_writes_isolated_part_only() {
        let dir = tempfile::tempdir().unwrap();
        let doc = doc();
        let mut view = doc.view(ElementId::new(10)).unwrap().clone();
        view.temporary_isolate = Some(vec![ElementId::new(205)]);

        let path = DxfBackend::new()
            .export(dir.path(), "Level_1_100_205", &doc, &view)
            .unwrap();
        assert_eq!(path, dir.path().join("Level_1_100_205.dxf"));

        let drawing = dxf::Drawing::load_file(&path).unwrap();
        let entities: Vec<_> = drawing.entities().collect();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].common.layer, "PART_205");
        match &entities[0].specific {
            dxf::entities::EntityType::LwPolyline(p) => {
                assert!(p.is_closed());
                assert_eq!(p.vertices.len(), 4);
            }
            other => panic!("unexpected entity {other:?}"),
        }
    }

    #[test]
    fn test_missing_folder_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let doc = doc();
        let view = doc.view(ElementId::new(10)).unwrap();
        let err = DxfBackend::new()
            .export(&dir.path().join("nope"), "x", &doc, view)
            .unwrap_err();
        assert!(matches!(err, CncFabError::Backend(_)));
    }
}
