//! Layered key-value configuration lookups.
//!
//! Defines the [`ConfigStore`] trait for pluggable config backends and
//! the [`LayeredStore`] that consults several stores in priority order
//! (environment variables before the config file). Submodules provide
//! the file data model, validation logic, and concrete store
//! implementations.
//!
//! A lookup that misses is reported as [`NotifierError::MissingKey`];
//! callers treat it as "unset", never as a fault.

pub mod model;
pub mod sources;
pub mod validation;

use std::path::Path;

use crate::error::NotifierError;
use sources::env_source::EnvStore;

/// Section holding every key this crate reads.
pub const SENTRY_SECTION: &str = "sentry";

pub const KEY_DSN: &str = "sentry_dsn";
pub const KEY_SITE: &str = "sentry_site";
pub const KEY_NAME: &str = "sentry_name";
pub const KEY_RELEASE: &str = "sentry_release";
pub const KEY_ENVIRONMENT: &str = "sentry_environment";

/// Every key recognised in the [`SENTRY_SECTION`].
pub const KNOWN_KEYS: &[&str] = &[KEY_DSN, KEY_SITE, KEY_NAME, KEY_RELEASE, KEY_ENVIRONMENT];

pub trait ConfigStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Look up `key` in `section`. Empty values are reported as missing.
    fn get(&self, section: &str, key: &str) -> Result<String, NotifierError>;

    /// Like [`get`](Self::get), but also names the store that answered.
    fn locate(&self, section: &str, key: &str) -> Result<(String, &'static str), NotifierError> {
        self.get(section, key).map(|value| (value, self.name()))
    }
}

/// Stores consulted in insertion order; the first hit wins.
#[derive(Default)]
pub struct LayeredStore {
    layers: Vec<Box<dyn ConfigStore>>,
}

impl LayeredStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Box<dyn ConfigStore>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn push(&mut self, layer: Box<dyn ConfigStore>) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ConfigStore for LayeredStore {
    fn name(&self) -> &'static str {
        "layered"
    }

    fn get(&self, section: &str, key: &str) -> Result<String, NotifierError> {
        self.locate(section, key).map(|(value, _)| value)
    }

    fn locate(&self, section: &str, key: &str) -> Result<(String, &'static str), NotifierError> {
        for layer in &self.layers {
            match layer.locate(section, key) {
                Ok(found) => return Ok(found),
                Err(e) if e.is_missing_key() => {}
                Err(e) => return Err(e),
            }
        }
        Err(NotifierError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
            store: self.name(),
        })
    }
}

/// Build the standard store: process environment first, then the config
/// file (explicit path, or auto-detected in `dir`).
pub fn default_store(explicit: Option<&Path>, dir: &Path) -> Result<LayeredStore, NotifierError> {
    let mut store = LayeredStore::new().with_layer(Box::new(EnvStore::from_env()));

    if let Some(file) = sources::resolve_file_store(explicit, dir)? {
        store.push(Box::new(file));
    }

    tracing::debug!(layers = ?store.layer_names(), "config store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ConfigFile;
    use crate::config::sources::file_source::FileStore;

    fn file_store(yaml_like_json: &str) -> FileStore {
        let config: ConfigFile = serde_json::from_str(yaml_like_json).unwrap();
        FileStore::from_config(config, "inline")
    }

    #[test]
    fn env_layer_shadows_file_layer() {
        let env = EnvStore::from_vars(
            "SENTRY_NOTIFY",
            [("SENTRY_NOTIFY__SENTRY__SENTRY_ENVIRONMENT", "from-env")],
        );
        let file = file_store(
            r#"{"sentry": {"sentry_environment": "from-file", "sentry_site": "eu"}}"#,
        );
        let store = LayeredStore::new()
            .with_layer(Box::new(env))
            .with_layer(Box::new(file));

        assert_eq!(
            store.locate(SENTRY_SECTION, KEY_ENVIRONMENT).unwrap(),
            ("from-env".to_string(), "env")
        );
        assert_eq!(
            store.locate(SENTRY_SECTION, KEY_SITE).unwrap(),
            ("eu".to_string(), "file")
        );
    }

    #[test]
    fn miss_in_every_layer_is_missing_key() {
        let store = LayeredStore::new()
            .with_layer(Box::new(EnvStore::from_vars("SENTRY_NOTIFY", Vec::<(String, String)>::new())));
        let err = store.get(SENTRY_SECTION, KEY_DSN).unwrap_err();
        assert!(err.is_missing_key());
    }

    #[test]
    fn empty_store_reports_missing() {
        let store = LayeredStore::new();
        assert!(store.is_empty());
        assert!(store.get(SENTRY_SECTION, KEY_DSN).unwrap_err().is_missing_key());
    }
}
