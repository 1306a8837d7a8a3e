//! The host document
//!
//! A [`Document`] owns the serialisable [`ModelState`] plus the bookkeeping
//! for open mutation scopes. Every model mutation goes through a method that
//! checks an open [`Transaction`](crate::model::transaction::Transaction);
//! selection changes are UI state and are exempt.

use crate::adapters::backend::ExportBackend;
use crate::domain::errors::CncFabError;
use crate::domain::ids::{BuiltInCategory, ElementId};
use crate::domain::result::Result;
use crate::host::dialogs::{DialogContext, DialogResult, TEMP_VIEW_MODES_DIALOG};
use crate::host::traits::DialogResponder;
use crate::model::element::{Element, ParameterValue};
use crate::model::parameters::{Definition, ParameterBinding};
use crate::model::view::View;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialisable contents of a building model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelState {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// All elements
    #[serde(default)]
    pub elements: Vec<Element>,

    /// All views
    #[serde(default)]
    pub views: Vec<View>,

    /// Active view
    #[serde(default)]
    pub active_view_id: Option<ElementId>,

    /// Current selection, in selection order
    #[serde(default)]
    pub selection: Vec<ElementId>,

    /// Parameter bindings
    #[serde(default)]
    pub parameter_bindings: Vec<ParameterBinding>,
}

impl ModelState {
    /// Create an empty model with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add an element
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Add a view
    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    /// Set the active view
    pub fn with_active_view(mut self, view_id: ElementId) -> Self {
        self.active_view_id = Some(view_id);
        self
    }
}

/// An open building model
#[derive(Debug)]
pub struct Document {
    path: Option<PathBuf>,
    pub(crate) state: ModelState,
    pub(crate) open_transaction: Option<String>,
    pub(crate) open_group: Option<String>,
}

impl Document {
    /// Wrap a model state in a document with no backing file
    pub fn new(state: ModelState) -> Self {
        Self {
            path: None,
            state,
            open_transaction: None,
            open_group: None,
        }
    }

    /// Load a document from a JSON model file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid model.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CncFabError::Io(format!("Failed to read model file {}: {}", path.display(), e))
        })?;
        let state: ModelState = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            elements = state.elements.len(),
            views = state.views.len(),
            "Loaded model"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            state,
            open_transaction: None,
            open_group: None,
        })
    }

    /// Save the document back to the file it was loaded from
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no backing file, a mutation scope
    /// is still open, or the write fails.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or_else(|| {
            CncFabError::Io(format!("Document '{}' has no backing file", self.state.title))
        })?;
        self.write_to(path)
    }

    /// Save the document to a new file and make it the backing file
    ///
    /// # Errors
    ///
    /// Returns an error if a mutation scope is still open or the write fails.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        if self.open_transaction.is_some() || self.open_group.is_some() {
            return Err(CncFabError::Transaction(
                "Cannot save while a transaction is open".to_string(),
            ));
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(path, json).map_err(|e| {
            CncFabError::Io(format!("Failed to write model file {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Saved model");
        Ok(())
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Document title
    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Snapshot of the model contents
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Whether a transaction is currently open
    pub fn is_modifiable(&self) -> bool {
        self.open_transaction.is_some()
    }

    /// All elements
    pub fn elements(&self) -> &[Element] {
        &self.state.elements
    }

    /// Look up an element
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.state.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.state
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CncFabError::Invariant(format!("Element {id} does not exist")))
    }

    /// Look up a view
    pub fn view(&self, id: ElementId) -> Option<&View> {
        self.state.views.iter().find(|v| v.id == id)
    }

    fn view_mut(&mut self, id: ElementId) -> Result<&mut View> {
        self.state
            .views
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CncFabError::Invariant(format!("View {id} does not exist")))
    }

    /// The active view, if one is set and exists
    pub fn active_view(&self) -> Option<&View> {
        self.state.active_view_id.and_then(|id| self.view(id))
    }

    /// Current selection, in selection order
    pub fn selection(&self) -> &[ElementId] {
        &self.state.selection
    }

    /// Replace the current selection
    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.state.selection = ids;
    }

    /// All parameter bindings
    pub fn parameter_bindings(&self) -> &[ParameterBinding] {
        &self.state.parameter_bindings
    }

    /// Definitions named `name` exposed by the element's category
    pub fn get_parameters(&self, element_id: ElementId, name: &str) -> Vec<&Definition> {
        let Some(element) = self.element(element_id) else {
            return Vec::new();
        };
        self.parameters_for_category(element.category, name)
    }

    /// Definitions named `name` bound to `category`, in binding order
    pub fn parameters_for_category(&self, category: BuiltInCategory, name: &str) -> Vec<&Definition> {
        self.state
            .parameter_bindings
            .iter()
            .filter(|b| b.definition.name == name && b.applies_to(category))
            .map(|b| &b.definition)
            .collect()
    }

    /// Value of a bound parameter on an element
    ///
    /// Returns `None` if the parameter is not bound to the element's category
    /// or the element holds no value for it.
    pub fn parameter_value(&self, element_id: ElementId, definition: &Definition) -> Option<&ParameterValue> {
        let element = self.element(element_id)?;
        if !self.is_bound(element.category, definition) {
            return None;
        }
        element.value(&definition.name)
    }

    fn is_bound(&self, category: BuiltInCategory, definition: &Definition) -> bool {
        self.state
            .parameter_bindings
            .iter()
            .any(|b| b.definition.guid == definition.guid && b.applies_to(category))
    }

    fn require_transaction(&self, operation: &str) -> Result<()> {
        if self.open_transaction.is_none() {
            return Err(CncFabError::Transaction(format!(
                "NoOpenTransaction: {operation} requires an open transaction"
            )));
        }
        Ok(())
    }

    /// Set a bound parameter on an element
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open, the parameter is not bound
    /// to the element's category, or the value type does not match.
    pub fn set_parameter(
        &mut self,
        element_id: ElementId,
        definition: &Definition,
        value: ParameterValue,
    ) -> Result<()> {
        self.require_transaction("Setting a parameter")?;

        if value.parameter_type() != definition.parameter_type {
            return Err(CncFabError::Invariant(format!(
                "Parameter '{}' expects {:?}, got {:?}",
                definition.name,
                definition.parameter_type,
                value.parameter_type()
            )));
        }

        let category = self
            .element(element_id)
            .map(|e| e.category)
            .ok_or_else(|| CncFabError::Invariant(format!("Element {element_id} does not exist")))?;
        if !self.is_bound(category, definition) {
            return Err(CncFabError::Invariant(format!(
                "Parameter '{}' is not bound to {}",
                definition.name, category
            )));
        }

        let element = self.element_mut(element_id)?;
        element.values.insert(definition.name.clone(), value);
        Ok(())
    }

    /// Clear the temporary hide/isolate override of a view
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open or the view does not exist.
    pub fn disable_temporary_hide_isolate(&mut self, view_id: ElementId) -> Result<()> {
        self.require_transaction("Disabling temporary hide/isolate")?;
        self.view_mut(view_id)?.temporary_isolate = None;
        Ok(())
    }

    /// Temporarily isolate a single element in a view
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open or the view does not exist.
    pub fn isolate_element_temporary(&mut self, view_id: ElementId, element_id: ElementId) -> Result<()> {
        self.require_transaction("Temporary isolate")?;
        self.view_mut(view_id)?.temporary_isolate = Some(vec![element_id]);
        Ok(())
    }

    /// Bind a definition to a set of categories
    ///
    /// Re-binding a definition that is already bound merges the categories.
    /// Returns `true` if anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open.
    pub fn insert_binding(&mut self, binding: ParameterBinding) -> Result<bool> {
        self.require_transaction("Inserting a parameter binding")?;

        if let Some(existing) = self
            .state
            .parameter_bindings
            .iter_mut()
            .find(|b| b.definition.guid == binding.definition.guid)
        {
            let before = existing.categories.len();
            existing.categories.extend(binding.categories);
            return Ok(existing.categories.len() != before);
        }

        self.state.parameter_bindings.push(binding);
        Ok(true)
    }

    /// Elements displayed by a view
    ///
    /// Honors the temporary isolate override and the parts visibility mode.
    pub fn visible_elements(&self, view: &View) -> Vec<&Element> {
        use crate::model::view::PartsVisibility;

        self.state
            .elements
            .iter()
            .filter(|e| match &view.temporary_isolate {
                Some(ids) => ids.contains(&e.id),
                None => true,
            })
            .filter(|e| match view.parts_visibility {
                PartsVisibility::ShowPartsOnly => e.is_part(),
                PartsVisibility::ShowOriginalOnly => !e.is_part(),
                PartsVisibility::ShowPartsAndOriginal => true,
            })
            .collect()
    }

    /// Export a view to a file through a backend
    ///
    /// When the view has a temporary hide/isolate override the host asks
    /// whether to export with it applied. The prompt goes through `prompts`;
    /// any answer other than [`DialogResult::CommandLink2`] aborts.
    ///
    /// # Arguments
    ///
    /// * `folder` - Output directory
    /// * `filename` - File name without extension
    /// * `view_id` - View to export
    /// * `backend` - Format writer
    /// * `prompts` - Dialog overrides and the fallback responder
    ///
    /// # Errors
    ///
    /// Returns [`CncFabError::Backend`] if the view is missing, the prompt is
    /// declined or the backend fails.
    pub fn export<R: DialogResponder + ?Sized>(
        &self,
        folder: &Path,
        filename: &str,
        view_id: ElementId,
        backend: &dyn ExportBackend,
        prompts: &mut DialogContext<'_, R>,
    ) -> Result<PathBuf> {
        let view = self
            .view(view_id)
            .ok_or_else(|| CncFabError::Backend(format!("View {view_id} does not exist")))?;

        if view.is_temporary_hide_isolate_active() {
            let answer = prompts.show(
                TEMP_VIEW_MODES_DIALOG,
                "The view has temporary view modes applied. Export with the temporary modes?",
            );
            if answer != DialogResult::CommandLink2 {
                return Err(CncFabError::Backend(format!(
                    "Export of '{filename}' declined at the temporary view modes prompt ({answer:?})"
                )));
            }
        }

        backend.export(folder, filename, self, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ParameterType;
    use crate::model::parameters::BindingKind;
    use crate::model::transaction::Transaction;
    use crate::model::view::{PartsVisibility, ViewKind};
    use uuid::Uuid;

    fn sample() -> Document {
        let state = ModelState::new("Sample")
            .with_element(Element::level(ElementId::new(1), "Level 1"))
            .with_element(Element::wall(ElementId::new(100), Some(ElementId::new(1))))
            .with_element(Element::part(
                ElementId::new(205),
                vec![ElementId::new(100)],
                vec![BuiltInCategory::Walls],
            ))
            .with_view(
                View::new(ElementId::new(10), "{3D}", ViewKind::ThreeD)
                    .with_parts_visibility(PartsVisibility::ShowPartsOnly),
            )
            .with_active_view(ElementId::new(10));
        Document::new(state)
    }

    fn text_binding(name: &str) -> ParameterBinding {
        ParameterBinding {
            definition: Definition::new(Uuid::new_v4(), name, ParameterType::Text),
            kind: BindingKind::Instance,
            categories: [BuiltInCategory::Parts].into_iter().collect(),
        }
    }

    #[test]
    fn test_mutation_requires_transaction() {
        let mut doc = sample();
        let err = doc
            .isolate_element_temporary(ElementId::new(10), ElementId::new(205))
            .unwrap_err();
        assert!(err.to_string().contains("NoOpenTransaction"));
    }

    #[test]
    fn test_get_parameters_by_category() {
        let mut doc = sample();
        {
            let mut tx = Transaction::start(&mut doc, "Bind").unwrap();
            tx.insert_binding(text_binding("CncFabExportedLast")).unwrap();
            tx.commit();
        }
        assert_eq!(doc.get_parameters(ElementId::new(205), "CncFabExportedLast").len(), 1);
        assert!(doc.get_parameters(ElementId::new(100), "CncFabExportedLast").is_empty());
        assert!(doc.get_parameters(ElementId::new(999), "CncFabExportedLast").is_empty());
    }

    #[test]
    fn test_insert_binding_is_idempotent() {
        let mut doc = sample();
        let binding = text_binding("CncFabExportedFirst");
        let mut tx = Transaction::start(&mut doc, "Bind").unwrap();
        assert!(tx.insert_binding(binding.clone()).unwrap());
        assert!(!tx.insert_binding(binding).unwrap());
        tx.commit();
        assert_eq!(doc.parameter_bindings().len(), 1);
    }

    #[test]
    fn test_set_parameter_checks_type() {
        let mut doc = sample();
        let binding = text_binding("CncFabExportedLast");
        let mut tx = Transaction::start(&mut doc, "Set").unwrap();
        tx.insert_binding(binding.clone()).unwrap();
        let err = tx
            .set_parameter(ElementId::new(205), &binding.definition, ParameterValue::YesNo(true))
            .unwrap_err();
        assert!(matches!(err, CncFabError::Invariant(_)));
        tx.set_parameter(
            ElementId::new(205),
            &binding.definition,
            ParameterValue::Text("x".to_string()),
        )
        .unwrap();
        tx.commit();
        assert_eq!(
            doc.parameter_value(ElementId::new(205), &binding.definition),
            Some(&ParameterValue::Text("x".to_string()))
        );
    }

    #[test]
    fn test_visible_elements_respects_isolate() {
        let mut doc = sample();
        let view_id = ElementId::new(10);
        let visible: Vec<_> = doc
            .visible_elements(doc.view(view_id).unwrap())
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(visible, vec![ElementId::new(205)]);

        let mut tx = Transaction::start(&mut doc, "Isolate").unwrap();
        tx.isolate_element_temporary(view_id, ElementId::new(100)).unwrap();
        let view = tx.view(view_id).unwrap().clone();
        assert!(tx.visible_elements(&view).is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut doc = sample();
        doc.save_as(&path).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.state(), doc.state());
        assert_eq!(loaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_without_path_fails() {
        let doc = sample();
        assert!(matches!(doc.save(), Err(CncFabError::Io(_))));
    }
}
