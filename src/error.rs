//! Unified error types for sentry-notify.
//!
//! Defines [`NotifierError`] (the main crate error enum) and
//! [`ValidationError`] for config validation failures. Both use
//! `thiserror` for `Display` and `Error` derives. Error messages
//! include contextual hints to guide the user toward a fix.
//!
//! Note that [`Dispatcher::dispatch`](crate::notify::Dispatcher::dispatch)
//! never returns these: delivery problems are logged and folded into a
//! [`DispatchOutcome`](crate::notify::DispatchOutcome).

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub section: String,
    pub key: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  [{}] {}: {}", self.section, self.key, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NotifierError {
    #[error("Key '{key}' not found in section [{section}] of {store}")]
    MissingKey {
        section: String,
        key: String,
        store: &'static str,
    },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("No Sentry DSN configured.\n\n  {hint}")]
    MissingDsn { hint: String },

    #[error("Invalid Sentry DSN: {source}")]
    InvalidDsn {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid client option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("No Sentry transport available (built without the `transport` feature)")]
    NoTransport,

    #[error("Event {event_id} was not confirmed: {reason}")]
    NotDelivered { event_id: String, reason: String },

    #[error("Invalid argument '{input}': expected KEY=VALUE")]
    InvalidKeyValue { input: String },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl NotifierError {
    /// Missing keys are an expected outcome of a config lookup, not a fault.
    #[must_use]
    pub const fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_suggestion() {
        let err = ValidationError {
            section: "sentry".into(),
            key: "sentry_dns".into(),
            message: "unknown key".into(),
            suggestion: Some("did you mean 'sentry_dsn'?".into()),
        };
        assert_eq!(
            err.to_string(),
            "  [sentry] sentry_dns: unknown key (did you mean 'sentry_dsn'?)"
        );
    }

    #[test]
    fn config_validation_lists_every_error() {
        let errors = vec![
            ValidationError {
                section: "sentry".into(),
                key: "a".into(),
                message: "first".into(),
                suggestion: None,
            },
            ValidationError {
                section: "sentry".into(),
                key: "b".into(),
                message: "second".into(),
                suggestion: None,
            },
        ];
        let msg = NotifierError::ConfigValidation { errors }.to_string();
        assert!(msg.contains("a: first"));
        assert!(msg.contains("b: second"));
    }

    #[test]
    fn missing_key_is_recognised() {
        let err = NotifierError::MissingKey {
            section: "sentry".into(),
            key: "sentry_dsn".into(),
            store: "env",
        };
        assert!(err.is_missing_key());
        assert!(!NotifierError::NoTransport.is_missing_key());
    }
}
