//! Interactive collaborators of the export commands
//!
//! Commands never talk to a terminal or a window directly. They prompt
//! through these traits so the same pipeline runs against the console UI,
//! a host UI or a scripted fake in tests.

use crate::domain::ids::ElementId;
use crate::host::dialogs::DialogResult;
use crate::model::document::Document;
use crate::model::element::Element;
use std::path::{Path, PathBuf};

/// Interactive element picking
pub trait ElementPicker {
    /// Let the user pick one or more elements one by one
    ///
    /// Only elements accepted by `filter` may be picked. Returns the picked
    /// ids in pick order, or `None` if the user cancelled.
    fn pick_elements(
        &mut self,
        document: &Document,
        filter: &dyn Fn(&Element) -> bool,
        prompt: &str,
    ) -> Option<Vec<ElementId>>;
}

/// Interactive folder choice
pub trait DirectoryPicker {
    /// Let the user choose a directory, starting at `initial`
    ///
    /// Returns `None` if the user cancelled.
    fn browse_directory(&mut self, initial: &Path, allow_create: bool) -> Option<PathBuf>;
}

/// Blocking message boxes
pub trait MessageSink {
    /// Show an informational message
    fn show_info(&mut self, caption: &str, message: &str);

    /// Show a warning/error message
    fn show_error(&mut self, caption: &str, message: &str);
}

/// Answers host dialogs that no override handles
pub trait DialogResponder {
    /// Answer the dialog with the given id
    fn respond(&mut self, dialog_id: &str, message: &str) -> DialogResult;
}

/// Everything a command needs from the user
pub trait UserInterface: ElementPicker + DirectoryPicker + MessageSink + DialogResponder {}

impl<T> UserInterface for T where T: ElementPicker + DirectoryPicker + MessageSink + DialogResponder + ?Sized {}
