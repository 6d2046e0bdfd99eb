//! Loading `.searchbox.toml` from a project root.

use searchbox_core::{load_searchbox_config, read_config_file, ConfigError, SearchBoxConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert_eq!(load_searchbox_config(dir.path()), SearchBoxConfig::default());
}

#[test]
fn file_overrides_are_applied() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "debounce_ms = 200\nmin_commit_len = 4\nhidden_components = [\"search_input\"]\n",
    )
    .unwrap();

    let config = load_searchbox_config(dir.path());
    assert_eq!(config.debounce_ms, 200);
    assert_eq!(config.min_commit_len, 4);
    assert!(!config.should_render("search_input"));
}

#[test]
fn broken_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "debounce_ms = [").unwrap();
    assert_eq!(load_searchbox_config(dir.path()), SearchBoxConfig::default());
}

#[test]
fn explicit_missing_path_is_an_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = read_config_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
