//! Export history records
//!
//! The update rule is applied per element: "is exported" becomes true,
//! "exported last" is overwritten with the new timestamp, and "exported
//! first" is written only while it is still empty.

use crate::domain::ids::ElementId;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::element::ParameterValue;
use crate::model::parameters::Definition;
use chrono::{Local, NaiveDateTime};

/// Yes/no parameter: the part has been exported at least once
pub const IS_EXPORTED: &str = "CncFabIsExported";

/// Text parameter: timestamp of the first export
pub const EXPORTED_FIRST: &str = "CncFabExportedFirst";

/// Text parameter: timestamp of the latest export
pub const EXPORTED_LAST: &str = "CncFabExportedLast";

/// Optional text parameter: short label prefixed to exported file names
pub const SORT_MARK: &str = "CncFabSortMark";

/// Local time, millisecond precision, fixed width
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Format a timestamp for the history parameters
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cncfab::core::ledger::format_timestamp;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 5)
///     .unwrap()
///     .and_hms_milli_opt(7, 8, 9, 42)
///     .unwrap();
/// assert_eq!(format_timestamp(at), "2024-03-05T07:08:09.042");
/// ```
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The bound history parameter definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFields {
    /// [`IS_EXPORTED`]
    pub is_exported: Definition,
    /// [`EXPORTED_FIRST`]
    pub exported_first: Definition,
    /// [`EXPORTED_LAST`]
    pub exported_last: Definition,
}

/// Export history of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditRecord {
    /// Exported at least once
    pub is_exported: bool,
    /// First export timestamp
    pub exported_first: Option<String>,
    /// Latest export timestamp
    pub exported_last: Option<String>,
}

impl AuditRecord {
    /// Read the record stored on an element
    pub fn read(document: &Document, element_id: ElementId, fields: &LedgerFields) -> Self {
        let text = |definition: &Definition| {
            document
                .parameter_value(element_id, definition)
                .and_then(|v| v.as_text())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            is_exported: document
                .parameter_value(element_id, &fields.is_exported)
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            exported_first: text(&fields.exported_first),
            exported_last: text(&fields.exported_last),
        }
    }

    /// Apply one export at `stamp`
    ///
    /// Returns `true` if this was the first export.
    pub fn record_export(&mut self, stamp: &str) -> bool {
        self.is_exported = true;
        self.exported_last = Some(stamp.to_string());
        if self.exported_first.is_none() {
            self.exported_first = Some(stamp.to_string());
            return true;
        }
        false
    }

    fn write(&self, document: &mut Document, element_id: ElementId, fields: &LedgerFields) -> Result<()> {
        document.set_parameter(element_id, &fields.is_exported, ParameterValue::YesNo(self.is_exported))?;
        if let Some(first) = &self.exported_first {
            document.set_parameter(element_id, &fields.exported_first, ParameterValue::Text(first.clone()))?;
        }
        if let Some(last) = &self.exported_last {
            document.set_parameter(element_id, &fields.exported_last, ParameterValue::Text(last.clone()))?;
        }
        Ok(())
    }
}

/// Element ids exported during one command, in export order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBatch {
    ids: Vec<ElementId>,
}

impl PendingBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exported id
    pub fn push(&mut self, id: ElementId) {
        self.ids.push(id);
    }

    /// Ids in append order
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Take the ids, leaving the batch empty
    pub fn take(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.ids)
    }
}

/// Apply the export history update to every id, in order
///
/// Must run inside an open transaction. Returns the number of elements
/// exported for the first time.
pub fn apply_export_history(
    document: &mut Document,
    fields: &LedgerFields,
    ids: &[ElementId],
    stamp: &str,
) -> Result<usize> {
    let mut first_exports = 0;
    for &id in ids {
        let mut record = AuditRecord::read(document, id, fields);
        if record.record_export(stamp) {
            first_exports += 1;
        }
        record.write(document, id, fields)?;
        tracing::debug!(part_id = %id, timestamp = %stamp, "Export history updated");
    }
    Ok(first_exports)
}
