//! Mutation scopes
//!
//! The host requires every model change to happen inside a named
//! [`Transaction`]. Transactions may be wrapped in a [`TransactionGroup`],
//! which commits or discards all of them as one unit.
//!
//! Both scopes snapshot the model state when they start. Dropping a scope
//! without committing restores the snapshot, so an early return or `?`
//! inside a scope leaves the document exactly as it was.

use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use crate::model::document::{Document, ModelState};
use std::ops::{Deref, DerefMut};

/// A named unit of model mutation
#[derive(Debug)]
pub struct Transaction<'a> {
    document: &'a mut Document,
    name: String,
    snapshot: Option<ModelState>,
}

impl<'a> Transaction<'a> {
    /// Open a transaction on the document
    ///
    /// # Errors
    ///
    /// Returns an error if another transaction is already open.
    pub fn start(document: &'a mut Document, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if let Some(open) = &document.open_transaction {
            return Err(CncFabError::Transaction(format!(
                "Cannot start '{name}' while '{open}' is open"
            )));
        }

        tracing::trace!(transaction = %name, "Transaction started");
        document.open_transaction = Some(name.clone());
        let snapshot = Some(document.state.clone());
        Ok(Self {
            document,
            name,
            snapshot,
        })
    }

    /// Transaction name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keep the changes made in this transaction
    pub fn commit(mut self) {
        self.snapshot = None;
        self.document.open_transaction = None;
        tracing::trace!(transaction = %self.name, "Transaction committed");
    }

    /// Discard the changes made in this transaction
    pub fn rollback(self) {
        // Drop restores the snapshot
    }
}

impl Deref for Transaction<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.document.state = snapshot;
            self.document.open_transaction = None;
            tracing::trace!(transaction = %self.name, "Transaction rolled back");
        }
    }
}

/// A named group of transactions committed or discarded together
#[derive(Debug)]
pub struct TransactionGroup<'a> {
    document: &'a mut Document,
    name: String,
    snapshot: Option<ModelState>,
}

impl<'a> TransactionGroup<'a> {
    /// Open a transaction group on the document
    ///
    /// # Errors
    ///
    /// Returns an error if a group or a transaction is already open.
    pub fn start(document: &'a mut Document, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if let Some(open) = document.open_group.as_ref().or(document.open_transaction.as_ref()) {
            return Err(CncFabError::Transaction(format!(
                "Cannot start group '{name}' while '{open}' is open"
            )));
        }

        tracing::debug!(group = %name, "Transaction group started");
        document.open_group = Some(name.clone());
        let snapshot = Some(document.state.clone());
        Ok(Self {
            document,
            name,
            snapshot,
        })
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keep every transaction committed inside the group
    pub fn assimilate(mut self) {
        self.snapshot = None;
        self.document.open_group = None;
        tracing::debug!(group = %self.name, "Transaction group committed");
    }

    /// Discard every transaction committed inside the group
    pub fn rollback(self) {
        // Drop restores the snapshot
    }
}

impl Deref for TransactionGroup<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.document
    }
}

impl DerefMut for TransactionGroup<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl Drop for TransactionGroup<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.document.state = snapshot;
            self.document.open_transaction = None;
            self.document.open_group = None;
            tracing::debug!(group = %self.name, "Transaction group rolled back");
        }
    }
}
