//! Per-command export history ledger
//!
//! A [`ParameterLedger`] lives for one export command:
//!
//! - **Unbound**: the history parameters were not found on the sample
//!   element. Nothing can be recorded; callers abort with
//!   [`CncFabError::LedgerUnavailable`].
//! - **Bound**: exported ids are collected in memory.
//! - **Flushed**: the history was written in one committed transaction.
//!   Later additions are ignored.

use crate::core::ledger::history::{
    apply_export_history, format_timestamp, now_local, LedgerFields, PendingBatch, EXPORTED_FIRST,
    EXPORTED_LAST, IS_EXPORTED, SORT_MARK,
};
use crate::domain::errors::CncFabError;
use crate::domain::ids::ElementId;
use crate::domain::result::Result;
use crate::model::document::Document;
use crate::model::parameters::Definition;
use crate::model::transaction::Transaction;
use chrono::NaiveDateTime;

/// Name of the transaction that writes the export history
pub const FLUSH_TRANSACTION: &str = "Update CNC Fabrication Export History Shared Parameters";

/// Ledger lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    /// History parameters not bound
    Unbound,
    /// Collecting exported ids
    Bound,
    /// History written
    Flushed,
}

/// Export history ledger for one command invocation
#[derive(Debug)]
pub struct ParameterLedger {
    fields: Option<LedgerFields>,
    pending: PendingBatch,
    state: LedgerState,
}

impl ParameterLedger {
    /// Bind to the history parameters exposed by a sample element
    ///
    /// All three parameters must be found for the ledger to be bound.
    pub fn bind(document: &Document, sample: ElementId) -> Self {
        let lookup = |name: &str| -> Option<Definition> {
            let found = document.get_parameters(sample, name);
            if found.len() > 1 {
                tracing::warn!(
                    parameter = name,
                    count = found.len(),
                    "Expected at most one shared parameter with this name"
                );
            }
            found.first().map(|d| (*d).clone())
        };

        let fields = match (lookup(IS_EXPORTED), lookup(EXPORTED_FIRST), lookup(EXPORTED_LAST)) {
            (Some(is_exported), Some(exported_first), Some(exported_last)) => Some(LedgerFields {
                is_exported,
                exported_first,
                exported_last,
            }),
            _ => None,
        };

        let state = if fields.is_some() {
            LedgerState::Bound
        } else {
            LedgerState::Unbound
        };
        tracing::debug!(sample = %sample, ?state, "Export history ledger created");

        Self {
            fields,
            pending: PendingBatch::new(),
            state,
        }
    }

    /// Whether the history parameters are bound
    pub fn is_valid(&self) -> bool {
        self.fields.is_some()
    }

    /// Current lifecycle state
    pub fn state(&self) -> LedgerState {
        self.state
    }

    /// Bound history parameter definitions
    pub fn fields(&self) -> Option<&LedgerFields> {
        self.fields.as_ref()
    }

    /// Optional sort mark of an element; empty marks count as absent
    pub fn sort_mark_for(&self, document: &Document, element_id: ElementId) -> Option<String> {
        document
            .element(element_id)?
            .value(SORT_MARK)
            .and_then(|v| v.as_text())
            .filter(|mark| !mark.is_empty())
            .map(str::to_string)
    }

    /// Record a successfully exported element
    pub fn add(&mut self, id: ElementId) {
        match self.state {
            LedgerState::Bound => self.pending.push(id),
            state => {
                tracing::warn!(part_id = %id, ?state, "Ignoring export record");
            }
        }
    }

    /// Ids recorded so far, in export order
    pub fn pending(&self) -> &[ElementId] {
        self.pending.ids()
    }

    /// Write the export history stamped with the current local time
    ///
    /// # Errors
    ///
    /// See [`ParameterLedger::flush_at`].
    pub fn flush(&mut self, document: &mut Document) -> Result<usize> {
        self.flush_at(document, now_local())
    }

    /// Write the export history for every recorded id, stamped `at`
    ///
    /// All updates happen in one committed transaction. Returns the number
    /// of elements updated.
    ///
    /// # Errors
    ///
    /// Returns [`CncFabError::LedgerUnavailable`] if unbound,
    /// [`CncFabError::State`] if already flushed, or the transaction error.
    pub fn flush_at(&mut self, document: &mut Document, at: NaiveDateTime) -> Result<usize> {
        let fields = match (self.state, &self.fields) {
            (LedgerState::Bound, Some(fields)) => fields,
            (LedgerState::Flushed, _) => {
                return Err(CncFabError::State("Export history already flushed".to_string()));
            }
            _ => return Err(CncFabError::LedgerUnavailable),
        };

        let ids = self.pending.ids();
        if ids.is_empty() {
            self.state = LedgerState::Flushed;
            tracing::debug!("No exported parts to record");
            return Ok(0);
        }

        let stamp = format_timestamp(at);
        let mut tx = Transaction::start(document, FLUSH_TRANSACTION)?;
        let first_exports = apply_export_history(&mut tx, fields, ids, &stamp)?;
        tx.commit();

        let updated = ids.len();
        tracing::info!(
            pending = updated,
            first_exports,
            timestamp = %stamp,
            "Export history committed"
        );

        self.pending.take();
        self.state = LedgerState::Flushed;
        Ok(updated)
    }
}
