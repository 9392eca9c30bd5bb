use evplan_core::config::load;
use evplan_core::errors::ExErrorKind;
use evplan_core::logging_facility::Profile;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let config = load(Some(&path)).unwrap();

    assert_eq!(config.database.path, PathBuf::from(".evplan/evplan.db"));
    assert_eq!(config.database.busy_timeout_ms, 5000);
    assert_eq!(config.logging.profile, Profile::Development);
}

#[test]
fn test_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("evplan.toml");
    fs::write(
        &path,
        r#"
[database]
path = "/srv/evplan/planner.db"
busy_timeout_ms = 250

[logging]
profile = "production"
filter = "evplan_store=debug"
"#,
    )
    .unwrap();

    let config = load(Some(&path)).unwrap();

    assert_eq!(config.database.path, PathBuf::from("/srv/evplan/planner.db"));
    assert_eq!(config.database.busy_timeout(), Duration::from_millis(250));
    assert_eq!(config.logging.profile, Profile::Production);
    assert_eq!(config.logging.filter.as_deref(), Some("evplan_store=debug"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("evplan.toml");
    fs::write(&path, "[logging]\nprofile = \"test\"\n").unwrap();

    let config = load(Some(&path)).unwrap();

    assert_eq!(config.logging.profile, Profile::Test);
    assert_eq!(config.database.busy_timeout_ms, 5000);
}

#[test]
fn test_invalid_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("evplan.toml");
    fs::write(&path, "[database]\nbusy_timeout_ms = \"soon\"\n").unwrap();

    let err = load(Some(&path)).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Config);
    assert_eq!(err.code(), "ERR_CONFIG");
}
