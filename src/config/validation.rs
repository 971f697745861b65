//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks the `sentry` section of a parsed
//! [`ConfigFile`] for unknown keys (with "did you mean" suggestions),
//! non-scalar or empty values, and an unparseable DSN. Other sections
//! are left alone. Returns a list of [`ValidationError`] values.

use std::str::FromStr;

use sentry::types::Dsn;

use super::model::{scalar_to_string, ConfigFile};
use super::{KEY_DSN, KNOWN_KEYS, SENTRY_SECTION};
use crate::error::ValidationError;

/// Validate a DSN string. Returns `Ok(())` or a human-readable error.
pub fn validate_dsn(dsn: &str) -> Result<(), String> {
    if dsn.trim().is_empty() {
        return Err("DSN cannot be empty".into());
    }
    Dsn::from_str(dsn)
        .map(|_| ())
        .map_err(|e| format!("'{dsn}' is not a valid DSN: {e}"))
}

pub fn validate(config: &ConfigFile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let Some(section) = config.section(SENTRY_SECTION) else {
        return Err(vec![ValidationError {
            section: SENTRY_SECTION.into(),
            key: "(section)".into(),
            message: "no [sentry] section found".into(),
            suggestion: Some("run 'sentry-notify init' to create one".into()),
        }]);
    };

    for (key, value) in section {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            errors.push(ValidationError {
                section: SENTRY_SECTION.into(),
                key: key.clone(),
                message: "unknown key".into(),
                suggestion: closest_key(key).map(|k| format!("did you mean '{k}'?")),
            });
            continue;
        }

        match scalar_to_string(value) {
            Err(reason) => errors.push(ValidationError {
                section: SENTRY_SECTION.into(),
                key: key.clone(),
                message: reason,
                suggestion: None,
            }),
            Ok(None) => errors.push(ValidationError {
                section: SENTRY_SECTION.into(),
                key: key.clone(),
                message: "value cannot be empty".into(),
                suggestion: Some("remove the key to leave it unset".into()),
            }),
            Ok(Some(v)) if key == KEY_DSN => {
                if let Err(message) = validate_dsn(&v) {
                    errors.push(ValidationError {
                        section: SENTRY_SECTION.into(),
                        key: key.clone(),
                        message,
                        suggestion: Some(
                            "expected https://<public_key>@<host>/<project_id>".into(),
                        ),
                    });
                }
            }
            Ok(Some(_)) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Summary line for a config that passed validation.
#[must_use]
pub fn format_validation_report(path: &str, config: &ConfigFile) -> String {
    let keys = config.section(SENTRY_SECTION).map_or(0, |s| s.len());
    let dsn = match config.scalar(SENTRY_SECTION, KEY_DSN) {
        Ok(Some(_)) => "configured",
        _ => "not set",
    };
    format!("{path} is valid ({keys} keys in [sentry], dsn {dsn})")
}

/// Nearest known key within an edit distance of 3.
fn closest_key(key: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, edit_distance(key, known)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| k)
        .or_else(|| {
            // Bare names like `dsn` or `environment`
            KNOWN_KEYS
                .iter()
                .find(|known| known.strip_prefix("sentry_") == Some(key))
                .copied()
        })
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut curr = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        prev = curr;
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ConfigFile {
        serde_json::from_str::<ConfigFile>(json).unwrap().normalized()
    }

    #[test]
    fn valid_section_passes() {
        let config = parse(
            r#"{"sentry": {
                "sentry_dsn": "https://public@o1.ingest.sentry.io/42",
                "sentry_environment": "staging",
                "sentry_release": 7
            }}"#,
        );
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn missing_section_is_reported() {
        let errors = validate(&parse(r#"{"core": {"x": "y"}}"#)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("no [sentry] section"));
    }

    #[test]
    fn typo_gets_suggestion() {
        let errors = validate(&parse(r#"{"sentry": {"sentry_dns": "x"}}"#)).unwrap_err();
        assert_eq!(errors[0].key, "sentry_dns");
        assert_eq!(
            errors[0].suggestion.as_deref(),
            Some("did you mean 'sentry_dsn'?")
        );
    }

    #[test]
    fn bare_name_gets_prefixed_suggestion() {
        let errors = validate(&parse(r#"{"sentry": {"environment": "prod"}}"#)).unwrap_err();
        assert_eq!(
            errors[0].suggestion.as_deref(),
            Some("did you mean 'sentry_environment'?")
        );
    }

    #[test]
    fn bad_dsn_and_empty_value_both_reported() {
        let errors = validate(&parse(
            r#"{"sentry": {"sentry_dsn": "not a dsn", "sentry_site": ""}}"#,
        ))
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.key == "sentry_dsn"));
        assert!(errors.iter().any(|e| e.key == "sentry_site"));
    }

    #[test]
    fn validate_dsn_rejects_empty() {
        assert!(validate_dsn("  ").is_err());
        assert!(validate_dsn("https://public@o1.ingest.sentry.io/42").is_ok());
    }

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn report_mentions_dsn_state() {
        let config = parse(r#"{"sentry": {"sentry_environment": "dev"}}"#);
        assert_eq!(
            format_validation_report("n.yaml", &config),
            "n.yaml is valid (1 keys in [sentry], dsn not set)"
        );
    }
}
