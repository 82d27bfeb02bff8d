//! Configuration system tests
//!
//! Tests for config paths and loading/saving the paste cycle options.

use paste_cycle::config::PasteCycleConfig;
use paste_cycle::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("paste-cycle"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Load / Save Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PasteCycleConfig::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(config, PasteCycleConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "max: [not a number\n").unwrap();
    assert_eq!(PasteCycleConfig::load_from(&path), PasteCycleConfig::default());
}

#[test]
fn test_wrong_type_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "flash_on_paste: sometimes\n").unwrap();
    assert_eq!(PasteCycleConfig::load_from(&path), PasteCycleConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = PasteCycleConfig {
        max: 25,
        flash_on_paste: false,
        select_pasted: true,
        normal_paste_with_multiple_cursors: false,
        auto_indent_on_paste: true,
        flash_duration_ms: 300,
    };

    config.save_to(&path).unwrap();
    assert_eq!(PasteCycleConfig::load_from(&path), config);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "max: 2\ntheme: dark\n").unwrap();
    let config = PasteCycleConfig::load_from(&path);
    assert_eq!(config.max, 2);
    assert!(config.flash_on_paste);
}
