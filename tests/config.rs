//! Configuration system tests
//!
//! Tests for config paths, editor config, and the persisted file lists.

use std::path::PathBuf;

use datapad::config::EditorConfig;
use datapad::config_paths;
use datapad::favorites::Favorites;
use datapad::format::Format;
use datapad::model::{Session, ViewMode};
use datapad::recent_files::{FileRecord, RecentFiles};
use datapad::value::SortOrder;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("datapad"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_list_files_live_in_config_dir() {
    if let Some(config) = config_paths::config_dir() {
        let recent = config_paths::recent_files_path().unwrap();
        let favorites = config_paths::favorites_path().unwrap();
        assert_eq!(recent, config.join("history.json"));
        assert_eq!(favorites, config.join("favorites.json"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Editor Config Tests
// ========================================================================

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("config.yaml");

    let config = EditorConfig {
        new_file_format: Format::Xml,
        default_view: ViewMode::Raw,
        view_sort: Some(SortOrder::Asc),
        record_history: false,
    };
    config.save_to(&path).unwrap();

    assert_eq!(EditorConfig::load_from(&path), config);
}

#[test]
fn test_config_missing_or_invalid_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());

    std::fs::write(&path, "new_file_format: [not, a, format]\n").unwrap();
    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_session_takes_view_defaults_from_config() {
    let session = Session::new(EditorConfig {
        default_view: ViewMode::Raw,
        view_sort: Some(SortOrder::Desc),
        ..EditorConfig::default()
    });
    assert_eq!(session.view.mode, ViewMode::Raw);
    assert_eq!(session.view.sort, Some(SortOrder::Desc));
}

// ========================================================================
// Recent Files / Favorites Tests
// ========================================================================

fn record(path: &str, format: Format) -> FileRecord {
    FileRecord::new("f", PathBuf::from(path), format, 42)
}

#[test]
fn test_recent_files_json_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut recent = RecentFiles::default();
    recent.add(record("/data/a.yaml", Format::Yaml));
    recent.save_to(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &raw.as_array().unwrap()[0];
    assert_eq!(entry["path"], "/data/a.yaml");
    assert_eq!(entry["format"], "yaml");
    assert_eq!(entry["size"], 42);
    assert!(entry["last_opened"].as_u64().is_some());
}

#[test]
fn test_favorites_and_recent_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let recent_path = dir.path().join("history.json");
    let favorites_path = dir.path().join("favorites.json");

    let mut recent = RecentFiles::default();
    recent.add(record("/a.json", Format::Json));
    recent.save_to(&recent_path).unwrap();

    let mut favorites = Favorites::default();
    favorites.toggle(record("/b.csv", Format::Csv));
    favorites.save_to(&favorites_path).unwrap();

    let recent = RecentFiles::load_from(&recent_path);
    let favorites = Favorites::load_from(&favorites_path);
    assert_eq!(recent.len(), 1);
    assert_eq!(favorites.len(), 1);
    assert!(favorites.contains(std::path::Path::new("/b.csv")));
    assert!(!favorites.contains(std::path::Path::new("/a.json")));
}
