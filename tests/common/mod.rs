//! Shared fixtures for integration tests
#![allow(dead_code)]

use cncfab::core::ledger::SORT_MARK;
use cncfab::domain::{BuiltInCategory, ElementId};
use cncfab::host::{
    Application, DialogResponder, DialogResult, DirectoryPicker, ElementPicker, MessageSink,
};
use cncfab::model::{
    Document, Element, ModelState, ParameterValue, PartsVisibility, View, ViewKind,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

pub const LEVEL_1: ElementId = ElementId::new(1);
pub const LEVEL_2: ElementId = ElementId::new(2);
pub const WALL_100: ElementId = ElementId::new(100);
pub const WALL_50: ElementId = ElementId::new(50);
pub const WALL_NO_LEVEL: ElementId = ElementId::new(60);
pub const FLOOR_300: ElementId = ElementId::new(300);
pub const PART_205: ElementId = ElementId::new(205);
pub const PART_77: ElementId = ElementId::new(77);
pub const PART_ORPHAN: ElementId = ElementId::new(88);
pub const PART_FLOOR: ElementId = ElementId::new(310);
pub const PART_MULTI: ElementId = ElementId::new(400);
pub const VIEW_3D: ElementId = ElementId::new(10);
pub const VIEW_PLAN: ElementId = ElementId::new(11);
pub const VIEW_3D_ORIGINAL: ElementId = ElementId::new(12);

fn square(x: f64, size: f64) -> Vec<[f64; 2]> {
    vec![[x, 0.0], [x + size, 0.0], [x + size, size], [x, size]]
}

/// Building model with valid and invalid parts and a parts-only 3D view
pub fn sample_model() -> ModelState {
    let mut marked = Element::part(PART_77, vec![WALL_50], vec![BuiltInCategory::Walls])
        .with_outline(square(10.0, 2.0));
    marked
        .values
        .insert(SORT_MARK.to_string(), ParameterValue::Text("A1".to_string()));

    ModelState::new("Sample")
        .with_element(Element::level(LEVEL_1, "Level 1"))
        .with_element(Element::level(LEVEL_2, "L2"))
        .with_element(Element::wall(WALL_100, Some(LEVEL_1)))
        .with_element(Element::wall(WALL_50, Some(LEVEL_2)))
        .with_element(Element::wall(WALL_NO_LEVEL, None))
        .with_element(Element::other(FLOOR_300, BuiltInCategory::Floors, Some(LEVEL_1)))
        .with_element(
            Element::part(PART_205, vec![WALL_100], vec![BuiltInCategory::Walls])
                .with_outline(square(0.0, 4.0)),
        )
        .with_element(marked)
        .with_element(
            Element::part(PART_ORPHAN, vec![WALL_NO_LEVEL], vec![BuiltInCategory::Walls])
                .with_outline(square(20.0, 1.0)),
        )
        .with_element(Element::part(PART_FLOOR, vec![FLOOR_300], vec![BuiltInCategory::Floors]))
        .with_element(Element::part(
            PART_MULTI,
            vec![WALL_100, WALL_50],
            vec![BuiltInCategory::Walls],
        ))
        .with_view(
            View::new(VIEW_3D, "{3D}", ViewKind::ThreeD)
                .with_parts_visibility(PartsVisibility::ShowPartsOnly),
        )
        .with_view(View::new(VIEW_PLAN, "Level 1", ViewKind::Plan))
        .with_view(View::new(VIEW_3D_ORIGINAL, "{3D} originals", ViewKind::ThreeD))
        .with_active_view(VIEW_3D)
}

/// Document over [`sample_model`] with a pre-selection
pub fn sample_document(selection: &[ElementId]) -> Document {
    let mut document = Document::new(sample_model());
    document.set_selection(selection.to_vec());
    document
}

/// Application using a shared parameter file inside `dir`
pub fn application_in(dir: &Path) -> Application {
    let mut app = Application::new();
    app.set_shared_parameters_filename(dir.join("shared_parameters.txt"));
    app
}

/// Sample document with the export history parameters bound
pub fn bound_document(dir: &Path, selection: &[ElementId]) -> (Application, Document) {
    let mut app = application_in(dir);
    let mut document = sample_document(selection);
    cncfab::core::ledger::create_export_parameters(&mut app, &mut document)
        .expect("binding creation");
    (app, document)
}

/// User interface answering from scripts and recording what it was asked
#[derive(Debug, Default)]
pub struct ScriptedUi {
    pub picks: VecDeque<Option<Vec<ElementId>>>,
    pub directories: VecDeque<Option<PathBuf>>,
    pub dialog_answers: VecDeque<DialogResult>,
    pub pick_prompts: Vec<String>,
    pub browse_initials: Vec<PathBuf>,
    pub dialogs_seen: Vec<String>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(mut self, ids: Option<Vec<ElementId>>) -> Self {
        self.picks.push_back(ids);
        self
    }

    pub fn directory(mut self, dir: Option<&Path>) -> Self {
        self.directories.push_back(dir.map(Path::to_path_buf));
        self
    }

    pub fn answer(mut self, result: DialogResult) -> Self {
        self.dialog_answers.push_back(result);
        self
    }
}

impl ElementPicker for ScriptedUi {
    fn pick_elements(
        &mut self,
        document: &Document,
        filter: &dyn Fn(&Element) -> bool,
        prompt: &str,
    ) -> Option<Vec<ElementId>> {
        self.pick_prompts.push(prompt.to_string());
        let ids = self.picks.pop_front().flatten()?;
        Some(
            ids.into_iter()
                .filter(|id| document.element(*id).is_some_and(|e| filter(e)))
                .collect(),
        )
    }
}

impl DirectoryPicker for ScriptedUi {
    fn browse_directory(&mut self, initial: &Path, _allow_create: bool) -> Option<PathBuf> {
        self.browse_initials.push(initial.to_path_buf());
        self.directories.pop_front().flatten()
    }
}

impl MessageSink for ScriptedUi {
    fn show_info(&mut self, _caption: &str, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_error(&mut self, _caption: &str, message: &str) {
        self.errors.push(message.to_string());
    }
}

impl DialogResponder for ScriptedUi {
    fn respond(&mut self, dialog_id: &str, _message: &str) -> DialogResult {
        self.dialogs_seen.push(dialog_id.to_string());
        self.dialog_answers.pop_front().unwrap_or(DialogResult::Cancel)
    }
}
