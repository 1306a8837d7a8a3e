//! Export history ledger
//!
//! Three shared parameters on every part record its export history:
//! whether it was ever exported, when first and when last. The ledger binds
//! to those parameters, collects the ids exported during one command and
//! applies the history for all of them in a single committed transaction
//! once the export loop is over.
//!
//! - [`history`] - Field names, timestamp format and the update rule
//! - [`manager`] - The per-command [`ParameterLedger`] state machine
//! - [`bindings`] - Creating and binding the shared parameters

pub mod bindings;
pub mod history;
pub mod manager;

pub use bindings::{create_export_parameters, BindingReport};
pub use history::{
    format_timestamp, AuditRecord, PendingBatch, EXPORTED_FIRST, EXPORTED_LAST, IS_EXPORTED, SORT_MARK,
    TIMESTAMP_FORMAT,
};
pub use manager::{LedgerState, ParameterLedger};
