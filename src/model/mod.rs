//! In-process building model
//!
//! The export pipeline runs against a [`Document`]: elements, views and
//! parameter bindings loaded from a JSON model file. Mutations happen inside
//! [`Transaction`] and [`TransactionGroup`] scopes.

pub mod document;
pub mod element;
pub mod parameters;
pub mod transaction;
pub mod view;

pub use document::{Document, ModelState};
pub use element::{Element, ElementKind, ParameterType, ParameterValue};
pub use parameters::{BindingKind, Definition, ParameterBinding};
pub use transaction::{Transaction, TransactionGroup};
pub use view::{PartsVisibility, View, ViewKind};
