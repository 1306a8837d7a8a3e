//! Domain identifier types
//!
//! This module provides the newtype wrapper for host element identities and
//! the closed set of built-in categories the export pipeline reasons about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element identifier newtype wrapper
///
/// Represents the stable identity of an element in the host document.
/// Identities are plain integers in the host, so `Display` renders the bare
/// number; exported file names depend on that.
///
/// # Examples
///
/// ```
/// use cncfab::domain::ids::ElementId;
/// use std::str::FromStr;
///
/// let id = ElementId::from_str("205").unwrap();
/// assert_eq!(id.value(), 205);
/// assert_eq!(id.to_string(), "205");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(i64);

impl ElementId {
    /// Creates a new ElementId from its integer value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the integer value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid element id '{s}': {e}"))
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Built-in element categories
///
/// Only the categories the export pipeline distinguishes are named; anything
/// else in a model is `GenericModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInCategory {
    /// Walls, the only category whose parts are export-eligible
    Walls,
    /// Parts derived from other elements
    Parts,
    /// Floors
    Floors,
    /// Roofs
    Roofs,
    /// Ceilings
    Ceilings,
    /// Levels
    Levels,
    /// Views
    Views,
    /// Anything else
    GenericModel,
}

impl BuiltInCategory {
    /// Human readable category name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Walls => "Walls",
            Self::Parts => "Parts",
            Self::Floors => "Floors",
            Self::Roofs => "Roofs",
            Self::Ceilings => "Ceilings",
            Self::Levels => "Levels",
            Self::Views => "Views",
            Self::GenericModel => "Generic Models",
        }
    }
}

impl fmt::Display for BuiltInCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId::new(100).to_string(), "100");
        assert_eq!(ElementId::new(-1).to_string(), "-1");
    }

    #[test]
    fn test_element_id_from_str() {
        assert_eq!(ElementId::from_str(" 42 ").unwrap(), ElementId::new(42));
        assert!(ElementId::from_str("forty-two").is_err());
        assert!(ElementId::from_str("").is_err());
    }

    #[test]
    fn test_element_id_serializes_as_number() {
        let json = serde_json::to_string(&ElementId::new(77)).unwrap();
        assert_eq!(json, "77");
        let id: ElementId = serde_json::from_str("50").unwrap();
        assert_eq!(id, ElementId::new(50));
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&BuiltInCategory::Walls).unwrap();
        assert_eq!(json, "\"walls\"");
        let cat: BuiltInCategory = serde_json::from_str("\"generic_model\"").unwrap();
        assert_eq!(cat, BuiltInCategory::GenericModel);
    }
}
