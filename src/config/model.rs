//! Serde data structures for the sentry-notify configuration file.
//!
//! The file is a set of named sections, each a flat map of scalar keys:
//!
//! ```yaml
//! sentry:
//!   sentry_dsn: "https://key@o1.ingest.sentry.io/1"
//!   sentry_environment: "staging"
//! ```
//!
//! Values are kept as [`serde_json::Value`] so that YAML, JSON and TOML
//! all deserialize into the same shape; numbers and booleans are read
//! back as strings. Section and key names are case-insensitive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Section = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ConfigFile {
    pub sections: BTreeMap<String, Section>,
}

impl ConfigFile {
    /// Lower-case every section and key name.
    #[must_use]
    pub fn normalized(self) -> Self {
        let sections = self
            .sections
            .into_iter()
            .map(|(name, section)| {
                let section = section
                    .into_iter()
                    .map(|(k, v)| (k.to_lowercase(), v))
                    .collect();
                (name.to_lowercase(), section)
            })
            .collect();
        Self { sections }
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&name.to_lowercase())
    }

    /// Read a scalar as a string.
    ///
    /// Returns `Ok(None)` when the key is absent, null, or an empty
    /// string, and `Err` with a reason when the value is a table or array.
    pub fn scalar(&self, section: &str, key: &str) -> Result<Option<String>, String> {
        let Some(value) = self
            .section(section)
            .and_then(|s| s.get(&key.to_lowercase()))
        else {
            return Ok(None);
        };
        scalar_to_string(value)
    }

    /// Set a string value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_lowercase())
            .or_default()
            .insert(key.to_lowercase(), Value::String(value.into()));
    }

    #[must_use]
    pub fn total_keys(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }
}

pub fn scalar_to_string(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) => Err("expected a scalar value, found a list".into()),
        Value::Object(_) => Err("expected a scalar value, found a table".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_read_as_strings() {
        let config: ConfigFile = serde_json::from_str(
            r#"{"Sentry": {"SENTRY_NAME": "worker-1", "sample": 0.5, "debug": true, "empty": ""}}"#,
        )
        .unwrap();
        let config = config.normalized();

        assert_eq!(
            config.scalar("sentry", "sentry_name").unwrap().as_deref(),
            Some("worker-1")
        );
        assert_eq!(config.scalar("SENTRY", "Sample").unwrap().as_deref(), Some("0.5"));
        assert_eq!(config.scalar("sentry", "debug").unwrap().as_deref(), Some("true"));
        assert_eq!(config.scalar("sentry", "empty").unwrap(), None);
        assert_eq!(config.scalar("sentry", "absent").unwrap(), None);
        assert_eq!(config.scalar("other", "sentry_name").unwrap(), None);
    }

    #[test]
    fn tables_are_not_scalars() {
        let config: ConfigFile =
            serde_json::from_str(r#"{"sentry": {"tags": {"team": "data"}}}"#).unwrap();
        assert!(config.scalar("sentry", "tags").is_err());
    }

    #[test]
    fn set_creates_section() {
        let mut config = ConfigFile::default();
        config.set("sentry", "sentry_dsn", "https://k@o1.ingest.sentry.io/1");
        assert_eq!(config.total_keys(), 1);
        assert!(config.section("sentry").is_some());
    }
}
