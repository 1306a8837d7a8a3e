//! Views of the building model
//!
//! Only the display state the export pipeline touches is modelled: the view
//! kind, the parts visibility mode and the temporary hide/isolate override.

use crate::domain::ids::ElementId;
use serde::{Deserialize, Serialize};

/// Kind of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// 3D view
    ThreeD,
    /// Floor plan
    Plan,
    /// Section
    Section,
    /// Sheet
    Sheet,
}

/// How a view displays parts relative to their source elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartsVisibility {
    /// Only parts are shown; their source elements are hidden
    ShowPartsOnly,
    /// Only original elements are shown
    #[default]
    ShowOriginalOnly,
    /// Parts and originals are shown together
    ShowPartsAndOriginal,
}

/// A view of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Stable identity
    pub id: ElementId,

    /// View name
    #[serde(default)]
    pub name: String,

    /// View kind
    pub kind: ViewKind,

    /// Parts visibility mode
    #[serde(default)]
    pub parts_visibility: PartsVisibility,

    /// Elements isolated by a temporary hide/isolate override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_isolate: Option<Vec<ElementId>>,
}

impl View {
    /// Create a view
    pub fn new(id: ElementId, name: impl Into<String>, kind: ViewKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parts_visibility: PartsVisibility::default(),
            temporary_isolate: None,
        }
    }

    /// Set the parts visibility mode
    pub fn with_parts_visibility(mut self, parts_visibility: PartsVisibility) -> Self {
        self.parts_visibility = parts_visibility;
        self
    }

    /// Whether this is a 3D view
    pub fn is_3d(&self) -> bool {
        self.kind == ViewKind::ThreeD
    }

    /// Whether a temporary hide/isolate override is active
    pub fn is_temporary_hide_isolate_active(&self) -> bool {
        self.temporary_isolate.is_some()
    }
}
