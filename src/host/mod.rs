//! Host application surface
//!
//! The pieces of the host environment the commands interact with: the
//! application-wide state, dialog overrides and the interactive
//! collaborators (element picker, directory picker, message boxes).

pub mod application;
pub mod console;
pub mod dialogs;
pub mod traits;

pub use application::{Application, OutputDirectory, CAPTION};
pub use console::ConsoleUi;
pub use dialogs::{DialogContext, DialogOverrideGuard, DialogRegistry, DialogResult, TEMP_VIEW_MODES_DIALOG};
pub use traits::{DialogResponder, DirectoryPicker, ElementPicker, MessageSink, UserInterface};
