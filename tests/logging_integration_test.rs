//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so every
//! test that initializes logging lives in this single test.

use cncfab::adapters::backend::ExportFormat;
use cncfab::config::LoggingConfig;
use cncfab::core::export::ExportSummary;
use cncfab::domain::{CncFabError, ElementId};
use cncfab::logging::{init_logging, LOG_FILE_NAME};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.is_dir());

    let mut summary = ExportSummary::new(ExportFormat::Dxf, "/out", 2).with_duration(Duration::from_millis(3));
    summary.add_exported(ElementId::new(77), ElementId::new(50), PathBuf::from("/out/L2_A1_50_77.dxf"));
    summary.log_summary();

    // Flush the non-blocking writer
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("Export summary"))
        .expect("summary logged");
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(json["level"], "INFO");
    assert_eq!(json["fields"]["format"], "DXF");
    assert_eq!(json["fields"]["exported"], 1);
    assert!(contents.contains("Export stopped before all targets were written"));

    // A second subscriber cannot be installed
    let err = init_logging("info", &LoggingConfig::default()).err().unwrap();
    assert!(matches!(err, CncFabError::Configuration(_)));
}
