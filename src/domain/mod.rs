//! Domain types for CncFab.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`ElementId`]) and the [`BuiltInCategory`] set
//! - **Error types** ([`CncFabError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CncFabError>`]. Eligibility
//! failures carry the message shown to the user:
//!
//! ```rust
//! use cncfab::domain::{CncFabError, ValidationError};
//!
//! let err: CncFabError = ValidationError::NotA3dView.into();
//! assert!(err.to_string().contains("3D view"));
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{CncFabError, ValidationError};
pub use ids::{BuiltInCategory, ElementId};
pub use result::Result;
