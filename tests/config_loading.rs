//! Integration tests for loading and validating config files from disk.

use std::path::Path;

use sentry_notify::config::sources::file_source::FileStore;
use sentry_notify::config::validation::{format_validation_report, validate};
use sentry_notify::config::{ConfigStore, KEY_DSN, KEY_ENVIRONMENT, SENTRY_SECTION};
use sentry_notify::error::NotifierError;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_file_loads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "sentry-notify.yaml",
        "sentry:\n  sentry_dsn: \"https://public@o1.ingest.sentry.io/42\"\n  sentry_environment: prod\n",
    );

    let store = FileStore::load(&path).unwrap();
    assert_eq!(store.name(), "file");
    assert_eq!(store.version().len(), 64);
    assert_eq!(store.get(SENTRY_SECTION, KEY_ENVIRONMENT).unwrap(), "prod");
    assert!(store
        .get(SENTRY_SECTION, "sentry_site")
        .unwrap_err()
        .is_missing_key());

    assert!(validate(store.config()).is_ok());
    assert_eq!(
        format_validation_report("sentry-notify.yaml", store.config()),
        "sentry-notify.yaml is valid (2 keys in [sentry], dsn configured)"
    );
}

#[cfg(feature = "yaml")]
#[test]
fn version_changes_with_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a.yaml", "sentry:\n  sentry_name: one\n");
    let first = FileStore::load(&path).unwrap().version().to_string();
    write(dir.path(), "a.yaml", "sentry:\n  sentry_name: two\n");
    let second = FileStore::load(&path).unwrap().version().to_string();
    assert_ne!(first, second);
}

#[cfg(feature = "yaml")]
#[test]
fn typos_are_reported_with_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "sentry-notify.yaml",
        "sentry:\n  sentry_dns: \"https://public@o1.ingest.sentry.io/42\"\n  environment: prod\n",
    );
    let store = FileStore::load(&path).unwrap();
    let errors = validate(store.config()).unwrap_err();

    assert_eq!(errors.len(), 2);
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert!(rendered.iter().any(|e| e.contains("did you mean 'sentry_dsn'?")));
    assert!(rendered
        .iter()
        .any(|e| e.contains("did you mean 'sentry_environment'?")));
}

#[cfg(feature = "yaml")]
#[test]
fn bad_dsn_fails_validation_but_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "n.yaml", "sentry:\n  sentry_dsn: not-a-dsn\n");
    let store = FileStore::load(&path).unwrap();
    assert_eq!(store.get(SENTRY_SECTION, KEY_DSN).unwrap(), "not-a-dsn");

    let errors = validate(store.config()).unwrap_err();
    assert_eq!(errors[0].key, KEY_DSN);
}

#[cfg(feature = "json")]
#[test]
fn json_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "n.json",
        r#"{"Sentry": {"SENTRY_RELEASE": "2024.06.1", "sentry_name": 7}}"#,
    );
    let store = FileStore::load(&path).unwrap();
    assert_eq!(store.get(SENTRY_SECTION, "sentry_release").unwrap(), "2024.06.1");
    assert_eq!(store.get(SENTRY_SECTION, "sentry_name").unwrap(), "7");
}

#[cfg(feature = "toml")]
#[test]
fn toml_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "n.toml", "[sentry]\nsentry_site = \"eu-west-1\"\n");
    let store = FileStore::load(&path).unwrap();
    assert_eq!(store.get(SENTRY_SECTION, "sentry_site").unwrap(), "eu-west-1");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileStore::load(&dir.path().join("absent.yaml")).err().unwrap();
    assert!(matches!(err, NotifierError::ConfigFileNotFound { .. }));
}

#[test]
fn unknown_extension_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "n.ini", "[sentry]\n");
    let err = FileStore::load(&path).err().unwrap();
    assert!(matches!(err, NotifierError::UnsupportedFormat(_)));
}
