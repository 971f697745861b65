//! Notification task definitions.
//!
//! A [`NotifyTask`] is what a workflow step declares: the message, its
//! metadata, and optionally a DSN so the step works without a `sentry`
//! config section. Executing it performs exactly one dispatch.
//!
//! ```yaml
//! message: "Nightly load finished with warnings"
//! level: warning
//! tags:
//!   dag: etl
//! fingerprint: ["etl", "nightly"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;

use crate::client::ClientOverrides;
use crate::config::sources::file_source::read_content;
use crate::config::sources::deserialize_str;
use crate::error::NotifierError;
use crate::notify::{DispatchOutcome, Dispatcher, Level, NotificationRequest};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyTask {
    pub message: String,

    #[serde(default)]
    pub level: Level,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub extra: BTreeMap<String, Value>,

    #[serde(default)]
    pub fingerprint: Vec<String>,

    #[serde(default)]
    pub culprit: Option<String>,

    #[serde(default)]
    pub time_spent: Option<u64>,

    #[serde(default)]
    pub dsn: Option<SecretString>,
}

impl NotifyTask {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Load a task definition from a YAML, JSON or TOML file.
    pub fn load(path: &Path) -> Result<Self, NotifierError> {
        let content = read_content(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        deserialize_str(ext, &content, &path.display().to_string())
    }

    #[must_use]
    pub fn request(&self) -> NotificationRequest {
        NotificationRequest {
            message: self.message.clone(),
            level: self.level,
            tags: self.tags.clone(),
            environment: self.environment.clone(),
            extra: self.extra.clone(),
            fingerprint: self.fingerprint.clone(),
            culprit: self.culprit.clone(),
            time_spent: self.time_spent,
        }
    }

    pub fn execute(&self, dispatcher: &Dispatcher) -> DispatchOutcome {
        self.execute_with(dispatcher, ClientOverrides::default())
    }

    /// Execute with caller-supplied client settings. The task's own DSN
    /// is used when `overrides` has none.
    pub fn execute_with(&self, dispatcher: &Dispatcher, mut overrides: ClientOverrides) -> DispatchOutcome {
        if overrides.dsn.is_none() {
            overrides.dsn.clone_from(&self.dsn);
        }
        dispatcher.dispatch(&self.request(), &overrides)
    }
}
