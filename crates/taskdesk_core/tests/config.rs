use std::fs;
use taskdesk_core::{ConfigError, CoreConfig};
use tempfile::TempDir;

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = CoreConfig::load(dir.path().join("settings.json")).expect("settings should load");
    assert_eq!(config, CoreConfig::default());
}

#[test]
fn settings_file_provides_weights_and_resolves_relative_data_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "data_file": "store/tasks.json",
            "category_weights": { "Work": 80, "University": 60 },
            "theme": "ignored"
        }"#,
    ).expect("fixture should be written");

    let config = CoreConfig::load(&path).expect("settings should load");
    assert_eq!(config.data_file, dir.path().join("store/tasks.json"));
    assert_eq!(config.category_weights.get("Work"), Some(&80));
    assert_eq!(config.category_weights.get("University"), Some(&60));
    assert_eq!(config.category_weights.len(), 2);
}

#[test]
fn absolute_data_file_is_kept() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("settings.json");
    let data_file = dir.path().join("elsewhere.json");
    let body = serde_json::json!({ "data_file": data_file });
    fs::write(&path, body.to_string()).expect("fixture should be written");

    let config = CoreConfig::load(&path).expect("settings should load");
    assert_eq!(config.data_file, data_file);
    assert!(config.category_weights.is_empty());
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ category_weights: ").expect("fixture should be written");

    let err = CoreConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { ref path, .. } if path.ends_with("settings.json")));
    assert!(err.to_string().contains("invalid settings"));
}
