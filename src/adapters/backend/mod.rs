//! Export backends
//!
//! A backend writes one file for a view of a document. The pipeline picks
//! one backend per command through [`create_backend`] and treats its result
//! as authoritative; any error it returns aborts the remaining batch.

pub mod dxf;
pub mod factory;
pub mod sat;
pub mod traits;

pub use self::dxf::DxfBackend;
pub use factory::create_backend;
pub use sat::SatBackend;
pub use traits::{ExportBackend, ExportFormat};
