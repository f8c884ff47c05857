use std::fs;
use std::path::{Path, PathBuf};

use clipdeck_core::settings::EditorSettings;

/// Get a temporary directory for test fixtures that persists for the test run.
pub fn fixture_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("failed to create temp dir for fixtures")
}

/// Write default settings, adjusted by `edit`, and return the file path.
pub fn write_settings(
    dir: &Path,
    name: &str,
    edit: impl FnOnce(&mut EditorSettings),
) -> PathBuf {
    let mut settings = EditorSettings::default();
    edit(&mut settings);
    let path = dir.join(format!("{name}.json"));
    settings.save(&path).expect("failed to write settings fixture");
    path
}

/// Write an arbitrary JSON document, e.g. a hand-edited settings file or a
/// replay script.
pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(value).expect("failed to serialize fixture");
    fs::write(&path, json).expect("failed to write fixture");
    path
}
