//! Parameter definitions and their category bindings

use crate::domain::ids::BuiltInCategory;
use crate::model::element::ParameterType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A named, typed parameter definition originating from a shared parameter file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
    /// Identity of the shared definition
    pub guid: Uuid,
    /// User visible name
    pub name: String,
    /// Value type
    pub parameter_type: ParameterType,
}

impl Definition {
    /// Create a definition
    pub fn new(guid: Uuid, name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            guid,
            name: name.into(),
            parameter_type,
        }
    }
}

/// Whether a binding attaches to element instances or element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Every element instance carries its own value
    #[default]
    Instance,
    /// Values live on the element type
    Type,
}

/// A definition bound to a set of categories in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    /// Bound definition
    pub definition: Definition,
    /// Instance or type binding
    #[serde(default)]
    pub kind: BindingKind,
    /// Categories whose elements expose the parameter
    pub categories: BTreeSet<BuiltInCategory>,
}

impl ParameterBinding {
    /// Whether elements of the category expose this parameter
    pub fn applies_to(&self, category: BuiltInCategory) -> bool {
        self.categories.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_applies_to_category() {
        let binding = ParameterBinding {
            definition: Definition::new(Uuid::new_v4(), "CncFabIsExported", ParameterType::YesNo),
            kind: BindingKind::Instance,
            categories: [BuiltInCategory::Parts].into_iter().collect(),
        };
        assert!(binding.applies_to(BuiltInCategory::Parts));
        assert!(!binding.applies_to(BuiltInCategory::Walls));
    }
}
