//! Export history listing

use crate::core::ledger::{AuditRecord, ParameterLedger};
use crate::domain::ids::ElementId;
use crate::model::document::Document;
use serde::Serialize;

/// Export history of one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartStatus {
    /// The part
    pub part_id: ElementId,
    /// Its single source element, if it has exactly one
    pub host_id: Option<ElementId>,
    /// Recorded export history; `None` if the parameters are not bound
    pub is_exported: Option<bool>,
    /// First export timestamp
    pub exported_first: Option<String>,
    /// Latest export timestamp
    pub exported_last: Option<String>,
}

/// List every part in the document with its export history
pub fn export_status(document: &Document) -> Vec<PartStatus> {
    document
        .elements()
        .iter()
        .filter(|e| e.is_part())
        .map(|part| {
            let host_id = match part.source_element_ids() {
                [single] => Some(*single),
                _ => None,
            };
            let ledger = ParameterLedger::bind(document, part.id);
            let record = ledger
                .fields()
                .map(|fields| AuditRecord::read(document, part.id, fields));

            PartStatus {
                part_id: part.id,
                host_id,
                is_exported: record.as_ref().map(|r| r.is_exported),
                exported_first: record.as_ref().and_then(|r| r.exported_first.clone()),
                exported_last: record.and_then(|r| r.exported_last),
            }
        })
        .collect()
}
