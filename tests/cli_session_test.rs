//! Integration tests for the CLI session and its commands

mod common;

use clap::Parser;
use cncfab::adapters::backend::ExportFormat;
use cncfab::cli::commands::export::ExportArgs;
use cncfab::cli::commands::parameters::ParametersArgs;
use cncfab::cli::commands::status::StatusArgs;
use cncfab::cli::{Cli, Commands, Session};
use cncfab::config::CncFabConfig;
use cncfab::model::Document;
use common::*;
use std::path::{Path, PathBuf};

fn write_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.json");
    let mut document = Document::new(sample_model());
    document.save_as(&path).unwrap();
    path
}

fn config_in(dir: &Path) -> CncFabConfig {
    let mut config = CncFabConfig::default();
    config.export.default_folder = dir.display().to_string();
    config.shared_parameters.filename = Some(dir.join("shared.txt").display().to_string());
    config
}

#[test]
fn test_cli_parses_global_options() {
    let cli = Cli::parse_from(["cncfab", "-m", "model.json", "-l", "debug", "dxf", "-s", "77"]);
    assert_eq!(cli.model, Some(PathBuf::from("model.json")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    match cli.command {
        Commands::Dxf(args) => assert_eq!(args.select, vec![77]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_session_workflow_persists_model() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let config = config_in(dir.path());
    let mut session = Session::new(&config, Some(&model)).unwrap();

    let mut ui = ScriptedUi::new();
    assert_eq!(ParametersArgs::default().run(&mut session, &mut ui), 0);
    assert_eq!(ui.infos.len(), 1);
    assert!(!Document::load(&model).unwrap().parameter_bindings().is_empty());

    let mut ui = ScriptedUi::new().directory(Some(dir.path()));
    let args = ExportArgs { select: vec![77] };
    assert_eq!(args.run(ExportFormat::Dxf, &mut session, &mut ui), 0);
    assert!(dir.path().join("L2_A1_50_77.dxf").is_file());
    assert_eq!(ui.browse_initials, vec![dir.path().to_path_buf()]);

    let reloaded = Document::load(&model).unwrap();
    assert!(reloaded.selection().is_empty());
    let status = cncfab::commands::export_status(&reloaded);
    let exported: Vec<_> = status.iter().filter(|s| s.is_exported == Some(true)).collect();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].part_id, PART_77);

    let mut out = Vec::new();
    let code = StatusArgs { json: true, pending: false }.write(&session, &mut out).unwrap();
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let parts = json.as_array().unwrap();
    assert_eq!(parts.len(), 5);
    assert!(parts
        .iter()
        .any(|p| p["part_id"] == 77 && p["is_exported"] == true));

    let mut out = Vec::new();
    StatusArgs { json: false, pending: true }.write(&session, &mut out).unwrap();
    let table = String::from_utf8(out).unwrap();
    assert!(table.contains("4 part(s)"));
}

#[test]
fn test_export_failure_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let mut session = Session::new(&config_in(dir.path()), Some(&model)).unwrap();

    let mut ui = ScriptedUi::new();
    let args = ExportArgs { select: vec![WALL_100.value()] };
    assert_eq!(args.run(ExportFormat::Sat, &mut session, &mut ui), 3);
    assert_eq!(ui.errors.len(), 1);

    let mut ui = ScriptedUi::new().pick(None);
    assert_eq!(ExportArgs::default().run(ExportFormat::Sat, &mut session, &mut ui), 1);
}

#[test]
fn test_missing_host_level_is_not_shown_to_user() {
    let dir = tempfile::tempdir().unwrap();
    let (app, document) = bound_document(dir.path(), &[PART_ORPHAN]);
    let mut session = Session::with_document(app, Some(document));
    let mut ui = ScriptedUi::new().directory(Some(dir.path()));

    let code = ExportArgs::default().run(ExportFormat::Dxf, &mut session, &mut ui);

    assert_eq!(code, 3);
    assert!(ui.errors.is_empty(), "{:?}", ui.errors);
    assert!(ui.infos.is_empty());
}

#[test]
fn test_backend_failure_is_shown_to_user() {
    let dir = tempfile::tempdir().unwrap();
    let (app, document) = bound_document(dir.path(), &[PART_205]);
    let mut session = Session::with_document(app, Some(document));
    let missing = dir.path().join("no_such_folder");
    let mut ui = ScriptedUi::new().directory(Some(&missing));

    let code = ExportArgs::default().run(ExportFormat::Sat, &mut session, &mut ui);

    assert_eq!(code, 3);
    assert_eq!(ui.errors.len(), 1);
}

#[test]
fn test_status_without_model() {
    let session = Session::new(&CncFabConfig::default(), None).unwrap();
    let mut out = Vec::new();
    let code = StatusArgs::default().write(&session, &mut out).unwrap();
    assert_eq!(code, 3);
}

#[test]
fn test_missing_model_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Session::new(&CncFabConfig::default(), Some(&dir.path().join("none.json")));
    assert!(result.is_err());
}
