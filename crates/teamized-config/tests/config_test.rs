// Loading and saving config files on disk.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;

use teamized_config::{
    CacheSection, Config, ConfigError, LogFormat, load_config_from, save_config_to,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
log_level = "debug"
log_format = "json"

[cache]
refetch_when_empty = false
stale_after_secs = 90
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.log_format, LogFormat::Json);

    let cache = config.to_cache_config().unwrap();
    assert!(!cache.refetch_when_empty);
    assert_eq!(cache.stale_after, Some(Duration::from_secs(90)));
}

#[test]
fn partial_cache_table_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[cache]\nstale_after_secs = 5\n").unwrap();

    let config = load_config_from(&path).unwrap();
    assert!(config.cache.refetch_when_empty);
    assert_eq!(config.log_level, "info");
}

#[test]
fn malformed_file_is_a_figment_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[cache]\nrefetch_when_empty = \"sometimes\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}

#[test]
fn bad_log_level_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "log_level = \"verbose\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "log_level"));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        log_level: "warn".into(),
        log_format: LogFormat::Text,
        cache: CacheSection {
            refetch_when_empty: false,
            stale_after_secs: Some(300),
        },
    };

    save_config_to(&config, &path).unwrap();
    assert_eq!(load_config_from(&path).unwrap(), config);
}
