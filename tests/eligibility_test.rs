//! Integration tests for viewing context checks and selection resolution

mod common;

use cncfab::core::eligibility::{EligibilityResolver, Resolution, PICK_PROMPT};
use cncfab::domain::{CncFabError, ElementId, ValidationError};
use cncfab::model::Document;
use common::*;
use test_case::test_case;

fn resolve(document: &Document, ui: &mut ScriptedUi) -> Result<Resolution, CncFabError> {
    EligibilityResolver::new(Some(document))?.resolve(ui)
}

fn validation(err: CncFabError) -> ValidationError {
    match err {
        CncFabError::Validation(e) => e,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test_case(VIEW_PLAN, ValidationError::NotA3dView ; "plan view")]
#[test_case(VIEW_3D_ORIGINAL, ValidationError::PartsNotShownOnly ; "3d view showing originals")]
#[test_case(ElementId::new(999), ValidationError::NotA3dView ; "missing view")]
fn test_view_context_rejected(view: ElementId, expected: ValidationError) {
    let document = Document::new(sample_model().with_active_view(view));
    let err = EligibilityResolver::new(Some(&document)).unwrap_err();
    assert_eq!(validation(err), expected);
}

#[test]
fn test_no_active_view() {
    let mut model = sample_model();
    model.active_view_id = None;
    let document = Document::new(model);
    let err = EligibilityResolver::new(Some(&document)).unwrap_err();
    assert_eq!(validation(err), ValidationError::NotA3dView);
}

#[test_case(&[WALL_100], ValidationError::NotAPart(WALL_100) ; "wall is not a part")]
#[test_case(&[PART_MULTI], ValidationError::MultipleSources(PART_MULTI) ; "part with two sources")]
#[test_case(&[PART_FLOOR], ValidationError::WrongCategory(PART_FLOOR) ; "floor part")]
#[test_case(&[PART_205, WALL_100], ValidationError::NotAPart(WALL_100) ; "one bad element rejects all")]
#[test_case(&[ElementId::new(999)], ValidationError::NotAPart(ElementId::new(999)) ; "missing element")]
fn test_preselection_rejected(selection: &[ElementId], expected: ValidationError) {
    let document = sample_document(selection);
    let mut ui = ScriptedUi::new();
    let err = resolve(&document, &mut ui).unwrap_err();
    assert_eq!(validation(err), expected);
    assert!(ui.pick_prompts.is_empty());
}

#[test]
fn test_preselection_keeps_order_and_drops_duplicates() {
    let document = sample_document(&[PART_77, PART_205, PART_77]);
    let mut ui = ScriptedUi::new();

    let Resolution::Targets(targets) = resolve(&document, &mut ui).unwrap() else {
        panic!("expected targets");
    };
    let ids: Vec<_> = targets.iter().map(|t| t.part_id()).collect();
    assert_eq!(ids, vec![PART_77, PART_205]);
    assert_eq!(targets[0].host_id(), WALL_50);
    assert_eq!(targets[1].host_id(), WALL_100);
}

#[test]
fn test_interactive_pick() {
    let document = sample_document(&[]);
    let mut ui = ScriptedUi::new().pick(Some(vec![PART_205, PART_FLOOR, PART_77]));

    let Resolution::Targets(targets) = resolve(&document, &mut ui).unwrap() else {
        panic!("expected targets");
    };
    let ids: Vec<_> = targets.iter().map(|t| t.part_id()).collect();
    assert_eq!(ids, vec![PART_205, PART_77]);
    assert_eq!(ui.pick_prompts, vec![PICK_PROMPT.to_string()]);
}

#[test]
fn test_interactive_pick_cancelled() {
    let document = sample_document(&[]);
    let mut ui = ScriptedUi::new().pick(None);
    assert_eq!(resolve(&document, &mut ui).unwrap(), Resolution::Cancelled);
}

#[test]
fn test_empty_pick_is_validation_failure() {
    let document = sample_document(&[]);
    let mut ui = ScriptedUi::new().pick(Some(vec![PART_FLOOR, WALL_100]));
    let err = resolve(&document, &mut ui).unwrap_err();
    assert_eq!(validation(err), ValidationError::NoValidParts);
}

#[test]
fn test_validation_messages() {
    assert_eq!(
        ValidationError::NotA3dView.to_string(),
        "Please run this command in a valid 3D view."
    );
    assert_eq!(ValidationError::NoValidParts.to_string(), "No valid parts selected.");
    assert_eq!(
        ValidationError::MultipleSources(PART_MULTI).to_string(),
        "Gyp wallboard part has multiple source elements."
    );
}
