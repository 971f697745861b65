//! Environment-variable config store.
//!
//! Keys map to variables named `<PREFIX>__<SECTION>__<KEY>`, upper-cased,
//! e.g. `SENTRY_NOTIFY__SENTRY__SENTRY_DSN`. The matching variables are
//! snapshotted when the store is built.

use std::collections::BTreeMap;

use crate::config::ConfigStore;
use crate::error::NotifierError;

pub const DEFAULT_PREFIX: &str = "SENTRY_NOTIFY";

pub struct EnvStore {
    prefix: String,
    vars: BTreeMap<String, String>,
}

impl EnvStore {
    /// Snapshot the process environment under [`DEFAULT_PREFIX`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Snapshot the process environment under a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Build from an explicit list of variables; those outside the prefix
    /// are dropped.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = prefix.to_uppercase();
        let marker = format!("{prefix}__");
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.to_uppercase().starts_with(&marker))
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();
        Self { prefix, vars }
    }

    #[must_use]
    pub fn var_name(&self, section: &str, key: &str) -> String {
        format!(
            "{}__{}__{}",
            self.prefix,
            section.to_uppercase(),
            key.to_uppercase()
        )
    }
}

impl ConfigStore for EnvStore {
    fn name(&self) -> &'static str {
        "env"
    }

    fn get(&self, section: &str, key: &str) -> Result<String, NotifierError> {
        self.vars
            .get(&self.var_name(section, key))
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| NotifierError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
                store: self.name(),
            })
    }
}
