//! Passthrough client options.
//!
//! Callers may hand the client settings that have no typed field on
//! [`ClientOverrides`](super::ClientOverrides). Known keys are checked
//! and copied onto [`ClientOptions`]; unknown keys are logged and skipped.
//! `dist` has no client option and is set on each event instead, see [`dist`].

use std::collections::BTreeMap;
use std::time::Duration;

use sentry::ClientOptions;
use serde_json::Value;

use crate::error::NotifierError;

pub const SUPPORTED: &[&str] = &[
    "attach_stacktrace",
    "debug",
    "dist",
    "max_breadcrumbs",
    "sample_rate",
    "send_default_pii",
    "shutdown_timeout",
];

pub fn apply(opts: &mut ClientOptions, extra: &BTreeMap<String, Value>) -> Result<(), NotifierError> {
    for (key, value) in extra {
        match key.as_str() {
            "attach_stacktrace" => opts.attach_stacktrace = as_bool(key, value)?,
            "debug" => opts.debug = as_bool(key, value)?,
            "send_default_pii" => opts.send_default_pii = as_bool(key, value)?,
            "dist" => {
                as_string(key, value)?;
            }
            "max_breadcrumbs" => {
                let n = as_f64(key, value)?;
                if n < 0.0 || n.fract() != 0.0 {
                    return Err(invalid(key, "expected a non-negative integer"));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    opts.max_breadcrumbs = n as usize;
                }
            }
            "sample_rate" => {
                let rate = as_f64(key, value)?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(invalid(key, "expected a number between 0.0 and 1.0"));
                }
                #[allow(clippy::cast_possible_truncation)]
                {
                    opts.sample_rate = rate as f32;
                }
            }
            "shutdown_timeout" => {
                let secs = as_f64(key, value)?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(invalid(key, "expected a non-negative number of seconds"));
                }
                opts.shutdown_timeout = Duration::try_from_secs_f64(secs)
                    .map_err(|_| invalid(key, "number of seconds is out of range"))?;
            }
            other => {
                tracing::warn!(
                    option = other,
                    supported = ?SUPPORTED,
                    "ignoring unsupported client option"
                );
            }
        }
    }
    Ok(())
}

/// The `dist` event attribute, if one was passed.
pub fn dist(extra: &BTreeMap<String, Value>) -> Result<Option<String>, NotifierError> {
    extra
        .get("dist")
        .map(|value| as_string("dist", value))
        .transpose()
}

fn invalid(key: &str, reason: &str) -> NotifierError {
    NotifierError::InvalidOption {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn as_bool(key: &str, value: &Value) -> Result<bool, NotifierError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(invalid(key, "expected a boolean")),
        },
        _ => Err(invalid(key, "expected a boolean")),
    }
}

fn as_f64(key: &str, value: &Value) -> Result<f64, NotifierError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(key, "expected a number")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(key, "expected a number")),
        _ => Err(invalid(key, "expected a number")),
    }
}

fn as_string(key: &str, value: &Value) -> Result<String, NotifierError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(invalid(key, "expected a non-empty string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(pairs: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(pairs).unwrap()
    }

    #[test]
    fn known_options_are_applied() {
        let mut opts = ClientOptions::default();
        apply(
            &mut opts,
            &options(json!({
                "debug": "true",
                "sample_rate": 0.25,
                "max_breadcrumbs": 10,
                "attach_stacktrace": true,
                "send_default_pii": false,
                "dist": 3,
                "shutdown_timeout": "0.5"
            })),
        )
        .unwrap();

        assert!(opts.debug);
        assert!((opts.sample_rate - 0.25).abs() < f32::EPSILON);
        assert_eq!(opts.max_breadcrumbs, 10);
        assert!(opts.attach_stacktrace);
        assert!(!opts.send_default_pii);
        assert_eq!(opts.shutdown_timeout, Duration::from_millis(500));
    }

    #[test]
    fn dist_is_read_separately() {
        assert_eq!(dist(&options(json!({"dist": 3}))).unwrap().as_deref(), Some("3"));
        assert_eq!(dist(&options(json!({"debug": true}))).unwrap(), None);

        let mut opts = ClientOptions::default();
        let err = apply(&mut opts, &options(json!({"dist": ""}))).unwrap_err();
        assert!(matches!(err, NotifierError::InvalidOption { ref key, .. } if key == "dist"));
    }

    #[test]
    fn huge_shutdown_timeout_is_rejected() {
        let mut opts = ClientOptions::default();
        let err = apply(&mut opts, &options(json!({"shutdown_timeout": 1e20}))).unwrap_err();
        assert!(
            matches!(err, NotifierError::InvalidOption { ref key, .. } if key == "shutdown_timeout")
        );
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut opts = ClientOptions::default();
        apply(&mut opts, &options(json!({"transport_threads": 4}))).unwrap();
    }

    #[test]
    fn out_of_range_sample_rate_is_rejected() {
        let mut opts = ClientOptions::default();
        let err = apply(&mut opts, &options(json!({"sample_rate": 1.5}))).unwrap_err();
        assert!(matches!(err, NotifierError::InvalidOption { ref key, .. } if key == "sample_rate"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let mut opts = ClientOptions::default();
        assert!(apply(&mut opts, &options(json!({"debug": [1]}))).is_err());
        assert!(apply(&mut opts, &options(json!({"max_breadcrumbs": 2.5}))).is_err());
    }
}
