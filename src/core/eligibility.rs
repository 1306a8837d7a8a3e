//! Export eligibility and selection resolution
//!
//! Turns the current document state into an ordered list of validated
//! [`ExportTarget`]s. The viewing context is checked first, then either the
//! pre-selection is validated as a whole or the user is asked to pick
//! wall parts interactively.

use crate::domain::errors::{CncFabError, ValidationError};
use crate::domain::ids::{BuiltInCategory, ElementId};
use crate::domain::result::Result;
use crate::host::traits::ElementPicker;
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::view::PartsVisibility;
use std::collections::HashSet;

/// Prompt shown by the interactive element picker
pub const PICK_PROMPT: &str = "Please select wall parts.";

/// A validated part to export
///
/// Only [`EligibilityResolver`] creates targets: the part has exactly one
/// source element and exactly one original category, which is walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportTarget {
    part_id: ElementId,
    host_id: ElementId,
    parent_category: BuiltInCategory,
}

impl ExportTarget {
    pub(crate) fn new(part_id: ElementId, host_id: ElementId, parent_category: BuiltInCategory) -> Self {
        Self {
            part_id,
            host_id,
            parent_category,
        }
    }

    /// The part to export
    pub fn part_id(&self) -> ElementId {
        self.part_id
    }

    /// The element the part was derived from
    pub fn host_id(&self) -> ElementId {
        self.host_id
    }

    /// Category of the element the part was derived from
    pub fn parent_category(&self) -> BuiltInCategory {
        self.parent_category
    }
}

/// Outcome of selection resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Validated targets in selection or pick order
    Targets(Vec<ExportTarget>),
    /// The user cancelled the interactive pick
    Cancelled,
}

/// Whether an element may be picked interactively: a part derived from a
/// single wall category
pub fn is_wall_part(element: &Element) -> bool {
    element.is_part() && element.original_category_ids() == [BuiltInCategory::Walls]
}

/// Validate a single element as an export target
///
/// # Errors
///
/// Returns the first rule the element violates, checked in the order
/// not-a-part, multiple sources, multiple categories, wrong category.
pub fn classify_part(element: &Element) -> std::result::Result<ExportTarget, ValidationError> {
    if !element.is_part() {
        return Err(ValidationError::NotAPart(element.id));
    }

    let sources = element.source_element_ids();
    if sources.len() != 1 {
        return Err(ValidationError::MultipleSources(element.id));
    }

    let categories = element.original_category_ids();
    if categories.len() != 1 {
        return Err(ValidationError::MultipleCategories(element.id));
    }

    if categories[0] != BuiltInCategory::Walls {
        return Err(ValidationError::WrongCategory(element.id));
    }

    Ok(ExportTarget::new(element.id, sources[0], categories[0]))
}

/// Resolves the export targets of one command invocation
#[derive(Debug)]
pub struct EligibilityResolver<'d> {
    document: &'d Document,
    view_id: ElementId,
}

impl<'d> EligibilityResolver<'d> {
    /// Check the viewing context
    ///
    /// # Errors
    ///
    /// Returns a validation error if there is no document, the active view
    /// is missing or not 3D, or the view does not show parts only.
    pub fn new(document: Option<&'d Document>) -> Result<Self> {
        let document = document.ok_or(ValidationError::NoActiveDocument)?;

        let view = document
            .active_view()
            .filter(|v| v.is_3d())
            .ok_or(ValidationError::NotA3dView)?;

        if view.parts_visibility != PartsVisibility::ShowPartsOnly {
            return Err(ValidationError::PartsNotShownOnly.into());
        }

        Ok(Self {
            document,
            view_id: view.id,
        })
    }

    /// The validated active view
    pub fn view_id(&self) -> ElementId {
        self.view_id
    }

    /// Resolve the targets from the pre-selection or an interactive pick
    ///
    /// A non-empty pre-selection is accepted only if every element is a valid
    /// wall part; the first violation rejects the whole selection. With no
    /// pre-selection the user picks wall parts; cancelling that pick is
    /// [`Resolution::Cancelled`], not an error.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the violated rule, or
    /// [`ValidationError::NoValidParts`] if nothing remains.
    pub fn resolve<P: ElementPicker + ?Sized>(&self, picker: &mut P) -> Result<Resolution> {
        let selection = self.document.selection();

        let candidates = if selection.is_empty() {
            match picker.pick_elements(self.document, &is_wall_part, PICK_PROMPT) {
                Some(ids) => ids,
                None => {
                    tracing::info!("Element pick cancelled");
                    return Ok(Resolution::Cancelled);
                }
            }
        } else {
            tracing::debug!(count = selection.len(), "Using pre-selection");
            selection.to_vec()
        };

        let targets = self.validate(&candidates)?;
        tracing::info!(count = targets.len(), "Resolved export targets");
        Ok(Resolution::Targets(targets))
    }

    fn validate(&self, ids: &[ElementId]) -> Result<Vec<ExportTarget>> {
        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(ids.len());

        for &id in ids {
            let element = self
                .document
                .element(id)
                .ok_or(ValidationError::NotAPart(id))?;
            let target = classify_part(element).map_err(|e| {
                tracing::warn!(part_id = %id, reason = %e, "Selection rejected");
                CncFabError::from(e)
            })?;
            if seen.insert(target.part_id()) {
                targets.push(target);
            }
        }

        if targets.is_empty() {
            return Err(ValidationError::NoValidParts.into());
        }
        Ok(targets)
    }
}
