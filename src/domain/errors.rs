//! Domain error types
//!
//! This module defines the error hierarchy for CncFab. All errors are
//! domain-specific and don't expose third-party types.

use crate::domain::ids::ElementId;
use thiserror::Error;

/// Main CncFab error type
///
/// This is the primary error type used throughout the application.
/// User-interactive cancellation is deliberately not represented here:
/// backing out of a prompt is an outcome, not a failure.
#[derive(Debug, Error)]
pub enum CncFabError {
    /// A precondition about document, view or selection state is violated
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The export history shared parameters are not bound to parts
    #[error("Export history shared parameters are not available")]
    LedgerUnavailable,

    /// The export backend failed to write a file
    #[error("Export backend error: {0}")]
    Backend(String),

    /// An internal invariant of the host model does not hold
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    /// Mutation scope (transaction) errors
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Shared parameter file errors
    #[error("Shared parameter error: {0}")]
    SharedParameters(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Ledger state machine errors
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Violated eligibility preconditions
///
/// The display text of each variant is the message shown to the user, so it
/// names the specific rule that failed and never carries internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No active document
    #[error("Please run this command with a project document open.")]
    NoActiveDocument,

    /// The active view is missing or not a 3D view
    #[error("Please run this command in a valid 3D view.")]
    NotA3dView,

    /// The active view shows source elements as well as (or instead of) parts
    #[error("Please run this command in a view displaying parts and not source elements.")]
    PartsNotShownOnly,

    /// A pre-selected element is not a part
    #[error("Please pre-select only gyp wallboard parts before running this command.")]
    NotAPart(ElementId),

    /// A pre-selected part has more than one source element
    #[error("Gyp wallboard part has multiple source elements.")]
    MultipleSources(ElementId),

    /// A pre-selected part has more than one original source category
    #[error("Gyp wallboard part has multiple source element categories.")]
    MultipleCategories(ElementId),

    /// A pre-selected part was not derived from a wall
    #[error("Please pre-select only gyp wallboard parts.")]
    WrongCategory(ElementId),

    /// Nothing export-eligible remained after selection
    #[error("No valid parts selected.")]
    NoValidParts,
}

impl ValidationError {
    /// Element that triggered the violation, if the rule is per element
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::NotAPart(id)
            | Self::MultipleSources(id)
            | Self::MultipleCategories(id)
            | Self::WrongCategory(id) => Some(*id),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CncFabError {
    fn from(err: std::io::Error) -> Self {
        CncFabError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CncFabError {
    fn from(err: serde_json::Error) -> Self {
        CncFabError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CncFabError {
    fn from(err: toml::de::Error) -> Self {
        CncFabError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors (shared parameter file)
impl From<csv::Error> for CncFabError {
    fn from(err: csv::Error) -> Self {
        CncFabError::SharedParameters(err.to_string())
    }
}
