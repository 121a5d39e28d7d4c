//! Configuration system tests
//!
//! Tests for config paths and config file loading/saving.

use proofread::config::{ProofreadConfig, DEFAULT_PLACEHOLDER};
use proofread::config_paths;
use proofread::correction::{PromptStyle, DEFAULT_MODEL, DEFAULT_PORT};
use proofread::surface::SurfaceMode;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("proofread"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// ProofreadConfig Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = ProofreadConfig::default();
    assert_eq!(config.service.model, DEFAULT_MODEL);
    assert_eq!(config.service.endpoint.port, Some(DEFAULT_PORT));
    assert_eq!(config.service.style, PromptStyle::Annotated);
    assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    assert_eq!(config.mode, SurfaceMode::PlainText);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProofreadConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, ProofreadConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "service: [this is: not valid").unwrap();
    assert_eq!(ProofreadConfig::load_from(&path), ProofreadConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = ProofreadConfig::default();
    config.service.model = "mistral".into();
    config.service.endpoint.hostname = "gpu-box".into();
    config.service.endpoint.port = None;
    config.service.style = PromptStyle::Plain;
    config.mode = SurfaceMode::Rich;
    config.placeholder = "Paste your draft".into();

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(ProofreadConfig::load_from(&path), config);
}

#[test]
fn test_hand_written_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "service:\n  endpoint:\n    protocol: https\n    hostname: llm.example.com\n    port: 8443\n  style: plain\n  timeout_secs: 30\nmode: rich\n",
    )
    .unwrap();

    let config = ProofreadConfig::load_from(&path);
    assert_eq!(
        config.service.endpoint.generate_url(),
        "https://llm.example.com:8443/api/generate"
    );
    assert_eq!(config.service.style, PromptStyle::Plain);
    assert_eq!(config.service.timeout_secs, 30);
    assert_eq!(config.service.model, DEFAULT_MODEL);
    assert_eq!(config.mode, SurfaceMode::Rich);
}
