//! Elements of the building model
//!
//! An element is an opaque handle with a stable identity, a category and a
//! set of stored parameter values. Parts additionally reference the
//! element(s) they were derived from.

use crate::domain::ids::{BuiltInCategory, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value type of a parameter definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Boolean yes/no value
    YesNo,
    /// Free text
    Text,
}

impl ParameterType {
    /// Data type token used in shared parameter files
    pub fn as_file_token(&self) -> &'static str {
        match self {
            Self::YesNo => "YESNO",
            Self::Text => "TEXT",
        }
    }

    /// Parse a shared parameter file data type token
    pub fn from_file_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "YESNO" => Some(Self::YesNo),
            "TEXT" => Some(Self::Text),
            _ => None,
        }
    }
}

/// A stored parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// Boolean yes/no value
    YesNo(bool),
    /// Free text
    Text(String),
}

impl ParameterValue {
    /// Type of this value
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::YesNo(_) => ParameterType::YesNo,
            Self::Text(_) => ParameterType::Text,
        }
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::YesNo(_) => None,
        }
    }

    /// Boolean content, if this is a yes/no value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::YesNo(b) => Some(*b),
            Self::Text(_) => None,
        }
    }
}

/// What kind of element this is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A wall
    Wall,
    /// A level (story); its name is used when naming exported files
    Level,
    /// A part derived from one or more source elements
    Part {
        /// Elements this part was derived from
        source_element_ids: Vec<ElementId>,
        /// Categories of the original source elements
        original_category_ids: Vec<BuiltInCategory>,
    },
    /// Any other element
    Other,
}

/// An element of the host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Stable identity
    pub id: ElementId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Category
    pub category: BuiltInCategory,

    /// Level the element is associated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<ElementId>,

    /// Element kind
    pub kind: ElementKind,

    /// Closed 2D outline in model units, used by the export backends
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outline: Vec<[f64; 2]>,

    /// Stored parameter values keyed by parameter name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, ParameterValue>,
}

impl Element {
    /// Create a level element
    pub fn level(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: BuiltInCategory::Levels,
            level_id: None,
            kind: ElementKind::Level,
            outline: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Create a wall element hosted on a level
    pub fn wall(id: ElementId, level_id: Option<ElementId>) -> Self {
        Self {
            id,
            name: format!("Wall {id}"),
            category: BuiltInCategory::Walls,
            level_id,
            kind: ElementKind::Wall,
            outline: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Create a part derived from the given source elements
    pub fn part(
        id: ElementId,
        source_element_ids: Vec<ElementId>,
        original_category_ids: Vec<BuiltInCategory>,
    ) -> Self {
        Self {
            id,
            name: format!("Part {id}"),
            category: BuiltInCategory::Parts,
            level_id: None,
            kind: ElementKind::Part {
                source_element_ids,
                original_category_ids,
            },
            outline: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Create a generic element of the given category
    pub fn other(id: ElementId, category: BuiltInCategory, level_id: Option<ElementId>) -> Self {
        Self {
            id,
            name: format!("{category} {id}"),
            category,
            level_id,
            kind: ElementKind::Other,
            outline: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Set the outline
    pub fn with_outline(mut self, outline: Vec<[f64; 2]>) -> Self {
        self.outline = outline;
        self
    }

    /// Whether this element is a part
    pub fn is_part(&self) -> bool {
        matches!(self.kind, ElementKind::Part { .. })
    }

    /// Source element ids of a part; empty for anything else
    pub fn source_element_ids(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Part {
                source_element_ids, ..
            } => source_element_ids,
            _ => &[],
        }
    }

    /// Original source categories of a part; empty for anything else
    pub fn original_category_ids(&self) -> &[BuiltInCategory] {
        match &self.kind {
            ElementKind::Part {
                original_category_ids,
                ..
            } => original_category_ids,
            _ => &[],
        }
    }

    /// Stored value of the named parameter
    pub fn value(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }
}
