//! Export file naming
//!
//! Files are named `{level}_{sort mark}_{host id}_{part id}`, the sort mark
//! segment being left out when the part has none. The level name has its
//! spaces replaced by underscores. The backend adds the extension.

use crate::domain::errors::CncFabError;
use crate::domain::ids::ElementId;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::element::ElementKind;

/// Build the file name of an exported part, without extension
///
/// # Examples
///
/// ```
/// use cncfab::core::export::export_filename;
/// use cncfab::domain::ElementId;
///
/// let name = export_filename("Level 1", None, ElementId::new(100), ElementId::new(205));
/// assert_eq!(name, "Level_1_100_205");
///
/// let name = export_filename("L2", Some("A1"), ElementId::new(50), ElementId::new(77));
/// assert_eq!(name, "L2_A1_50_77");
/// ```
pub fn export_filename(
    level_name: &str,
    sort_mark: Option<&str>,
    host_id: ElementId,
    part_id: ElementId,
) -> String {
    let level = level_name.replace(' ', "_");
    match sort_mark.filter(|mark| !mark.is_empty()) {
        Some(mark) => format!("{level}_{mark}_{host_id}_{part_id}"),
        None => format!("{level}_{host_id}_{part_id}"),
    }
}

/// Name of the level owning a host element
///
/// # Errors
///
/// Returns [`CncFabError::Invariant`] if the host element does not exist,
/// has no level, or its level is not a level element.
pub fn level_name_for(document: &Document, host_id: ElementId) -> Result<String> {
    let host = document
        .element(host_id)
        .ok_or_else(|| CncFabError::Invariant(format!("Host element {host_id} does not exist")))?;

    let level_id = host
        .level_id
        .ok_or_else(|| CncFabError::Invariant(format!("Host element {host_id} has no level")))?;

    match document.element(level_id) {
        Some(level) if matches!(level.kind, ElementKind::Level) => Ok(level.name.clone()),
        _ => Err(CncFabError::Invariant(format!(
            "Level {level_id} of host element {host_id} does not exist"
        ))),
    }
}
