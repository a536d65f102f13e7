// Integration test for runner configuration files

use runecho::config::RunnerConfig;
use runecho::{LogLevel, RunechoError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runner.toml");

    let toml_content = format!(
        r#"
        level = "error"
        color = false
        capture_stdout = true
        current_dir = "{}"

        [env]
        RUST_LOG = "debug"
    "#,
        temp_dir.path().display()
    );

    fs::write(&config_path, toml_content).unwrap();

    let config = RunnerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, LogLevel::Error);
    assert!(!config.color);
    assert!(config.capture_stdout);
    assert_eq!(config.current_dir.as_deref(), Some(temp_dir.path()));
    assert_eq!(config.env.get("RUST_LOG"), Some(&"debug".to_string()));
}

#[test]
fn test_load_json_config_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runner.json");

    fs::write(&config_path, r#"{"capture_stdout": true}"#).unwrap();

    let config = RunnerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, LogLevel::Info);
    assert!(config.color);
    assert!(config.capture_stdout);
    assert!(config.env.is_empty());
}

#[test]
fn test_env_values_are_expanded() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runner.toml");

    let path_value = std::env::var("PATH").unwrap_or_default();
    fs::write(
        &config_path,
        r#"
        [env]
        SEARCH = "${PATH}"
    "#,
    )
    .unwrap();

    let config = RunnerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.env.get("SEARCH"), Some(&path_value));
}

#[test]
fn test_invalid_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runner.toml");

    fs::write(&config_path, r#"level = "verbose""#).unwrap();

    let result = RunnerConfig::from_file(&config_path);
    assert!(matches!(result, Err(RunechoError::InvalidConfig(_))));
}

#[test]
fn test_missing_working_directory_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("runner.json");

    fs::write(
        &config_path,
        r#"{"current_dir": "/nonexistent/runecho/workdir"}"#,
    )
    .unwrap();

    let result = RunnerConfig::from_file(&config_path);
    assert!(matches!(
        result,
        Err(RunechoError::ConfigValidationError(_))
    ));
}
