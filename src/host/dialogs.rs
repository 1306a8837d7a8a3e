//! Host dialog overrides
//!
//! While an override is installed for a dialog id, the host answers that
//! dialog automatically instead of blocking on the user. Overrides are
//! installed through [`DialogRegistry::suppress`], which returns a guard
//! that removes the override again when dropped, on every exit path.

use crate::host::traits::DialogResponder;
use std::collections::BTreeMap;
use std::ops::Deref;

/// Dialog raised when exporting a view that has temporary view modes applied
pub const TEMP_VIEW_MODES_DIALOG: &str = "TaskDialog_Really_Print_Or_Export_Temp_View_Modes";

/// Answer to a host dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// First command link
    CommandLink1,
    /// Second command link; for the temporary view modes dialog this means
    /// "export with the temporary modes applied"
    CommandLink2,
    /// Third command link
    CommandLink3,
    /// OK button
    Ok,
    /// Cancel button or dialog closed
    Cancel,
}

/// Installed dialog overrides, keyed by dialog id
#[derive(Debug, Default)]
pub struct DialogRegistry {
    overrides: BTreeMap<String, DialogResult>,
}

impl DialogRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an override; returns the one it replaced
    pub fn install(&mut self, dialog_id: impl Into<String>, result: DialogResult) -> Option<DialogResult> {
        self.overrides.insert(dialog_id.into(), result)
    }

    /// Remove an override
    pub fn remove(&mut self, dialog_id: &str) -> Option<DialogResult> {
        self.overrides.remove(dialog_id)
    }

    /// Override installed for a dialog
    pub fn override_for(&self, dialog_id: &str) -> Option<DialogResult> {
        self.overrides.get(dialog_id).copied()
    }

    /// Number of installed overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no override is installed
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Auto-answer a dialog until the returned guard is dropped
    pub fn suppress(&mut self, dialog_id: &str, result: DialogResult) -> DialogOverrideGuard<'_> {
        let previous = self.install(dialog_id, result);
        tracing::debug!(dialog_id, ?result, "Dialog override installed");
        DialogOverrideGuard {
            registry: self,
            dialog_id: dialog_id.to_string(),
            previous,
        }
    }
}

/// Scoped dialog override; restores the previous state on drop
#[derive(Debug)]
pub struct DialogOverrideGuard<'a> {
    registry: &'a mut DialogRegistry,
    dialog_id: String,
    previous: Option<DialogResult>,
}

impl Deref for DialogOverrideGuard<'_> {
    type Target = DialogRegistry;

    fn deref(&self) -> &DialogRegistry {
        self.registry
    }
}

impl Drop for DialogOverrideGuard<'_> {
    fn drop(&mut self) {
        match self.previous {
            Some(result) => {
                self.registry.install(self.dialog_id.clone(), result);
            }
            None => {
                self.registry.remove(&self.dialog_id);
            }
        }
        tracing::debug!(dialog_id = %self.dialog_id, "Dialog override removed");
    }
}

/// Route for host dialogs: installed overrides first, then the user
pub struct DialogContext<'a, R: DialogResponder + ?Sized> {
    registry: &'a DialogRegistry,
    responder: &'a mut R,
}

impl<'a, R: DialogResponder + ?Sized> DialogContext<'a, R> {
    /// Create a dialog route
    pub fn new(registry: &'a DialogRegistry, responder: &'a mut R) -> Self {
        Self { registry, responder }
    }

    /// Raise a dialog and return its answer
    pub fn show(&mut self, dialog_id: &str, message: &str) -> DialogResult {
        if let Some(result) = self.registry.override_for(dialog_id) {
            tracing::debug!(dialog_id, ?result, "Dialog auto-answered");
            return result;
        }
        self.responder.respond(dialog_id, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(DialogResult, usize);

    impl DialogResponder for Always {
        fn respond(&mut self, _dialog_id: &str, _message: &str) -> DialogResult {
            self.1 += 1;
            self.0
        }
    }

    #[test]
    fn test_guard_removes_override_on_drop() {
        let mut registry = DialogRegistry::new();
        {
            let guard = registry.suppress(TEMP_VIEW_MODES_DIALOG, DialogResult::CommandLink2);
            assert_eq!(
                guard.override_for(TEMP_VIEW_MODES_DIALOG),
                Some(DialogResult::CommandLink2)
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_guard_restores_previous_override() {
        let mut registry = DialogRegistry::new();
        registry.install("Other", DialogResult::Ok);
        registry.install(TEMP_VIEW_MODES_DIALOG, DialogResult::Cancel);
        drop(registry.suppress(TEMP_VIEW_MODES_DIALOG, DialogResult::CommandLink2));
        assert_eq!(
            registry.override_for(TEMP_VIEW_MODES_DIALOG),
            Some(DialogResult::Cancel)
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_guard_released_on_early_return() {
        fn fails(registry: &mut DialogRegistry) -> Result<(), String> {
            let _guard = registry.suppress(TEMP_VIEW_MODES_DIALOG, DialogResult::CommandLink2);
            Err("backend failed".to_string())
        }

        let mut registry = DialogRegistry::new();
        assert!(fails(&mut registry).is_err());
        assert!(registry.override_for(TEMP_VIEW_MODES_DIALOG).is_none());
    }

    #[test]
    fn test_context_prefers_override() {
        let mut registry = DialogRegistry::new();
        let mut user = Always(DialogResult::Cancel, 0);

        let guard = registry.suppress(TEMP_VIEW_MODES_DIALOG, DialogResult::CommandLink2);
        let mut ctx = DialogContext::new(&guard, &mut user);
        assert_eq!(ctx.show(TEMP_VIEW_MODES_DIALOG, "?"), DialogResult::CommandLink2);
        assert_eq!(ctx.show("Unrelated", "?"), DialogResult::Cancel);
        drop(ctx);
        drop(guard);
        assert_eq!(user.1, 1);
    }
}
