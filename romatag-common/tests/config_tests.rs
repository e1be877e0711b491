//! Integration tests for configuration loading and graceful degradation
//!
//! Tests:
//! - Missing TOML files do not fail loading
//! - Priority order for config path resolution (CLI > env > platform dir)
//! - Malformed TOML is reported with its path
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate ROMATAG_CONFIG are marked with #[serial].

use romatag_common::config::{
    load_settings, load_toml_config, resolve_config_path, Settings, CONFIG_ENV_VAR,
};
use romatag_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();
    let settings = Settings::from_toml(config).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_full_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
archive_key = "ROMATAG_ORIGINAL"
extensions = [".MP3", "opus"]

[report]
old_title_width = 60
new_title_width = 30

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.archive_key, "ROMATAG_ORIGINAL");
    assert_eq!(settings.extensions, vec!["mp3", "opus"]);
    assert_eq!(settings.old_title_width, 60);
    assert_eq!(settings.new_title_width, 30);
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "archive_key = [not toml").unwrap();

    match load_toml_config(&path) {
        Err(Error::ConfigParse { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ConfigParse error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/romatag-from-env.toml");
    let cli = PathBuf::from("/tmp/romatag-from-cli.toml");

    let resolved = resolve_config_path(Some(&cli));
    assert_eq!(resolved, Some(cli));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_path() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/romatag-from-env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved, Some(PathBuf::from("/tmp/romatag-from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_pointing_at_missing_file_degrades_to_defaults() {
    let dir = TempDir::new().unwrap();
    env::set_var(CONFIG_ENV_VAR, dir.path().join("nope.toml"));

    let settings = load_settings(None).unwrap();
    assert_eq!(settings, Settings::default());

    env::remove_var(CONFIG_ENV_VAR);
}
