//! Turn a [`NotificationRequest`] into a Sentry event.

use std::borrow::Cow;
use std::collections::BTreeMap;

use sentry::protocol::Event;
use serde_json::Value;

use super::request::NotificationRequest;

/// `logger` attribute on every event we send.
pub const LOGGER: &str = "sentry-notify";

/// Build the event. `default_tags` come from the client config; request
/// tags override them key by key. Release, environment and server name
/// are left for the client to fill in from its options.
#[must_use]
pub fn build_event(
    request: &NotificationRequest,
    default_tags: &BTreeMap<String, String>,
) -> Event<'static> {
    let mut tags = default_tags.clone();
    tags.extend(request.tags.clone());

    let mut extra = request.extra.clone();
    if let Some(ms) = request.time_spent {
        extra.insert("time_spent".to_string(), Value::from(ms));
    }

    let mut event = Event {
        message: Some(request.message.clone()),
        level: request.level.into(),
        logger: Some(LOGGER.to_string()),
        culprit: request.culprit.clone(),
        tags,
        extra,
        ..Default::default()
    };

    if !request.fingerprint.is_empty() {
        event.fingerprint = Cow::Owned(
            request
                .fingerprint
                .iter()
                .map(|part| Cow::Owned(part.clone()))
                .collect(),
        );
    }

    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::request::Level;

    #[test]
    fn request_fields_are_mapped() {
        let request = NotificationRequest::new("Task failed")
            .with_level(Level::Fatal)
            .with_tag("dag", "etl")
            .with_extra("run_id", "manual__1")
            .with_fingerprint(["etl", "{{ default }}"])
            .with_culprit("etl.extract")
            .with_time_spent(250);

        let event = build_event(&request, &BTreeMap::new());

        assert_eq!(event.message.as_deref(), Some("Task failed"));
        assert_eq!(event.level, sentry::Level::Fatal);
        assert_eq!(event.tags["dag"], "etl");
        assert_eq!(event.extra["run_id"], Value::from("manual__1"));
        assert_eq!(event.extra["time_spent"], Value::from(250));
        assert_eq!(event.culprit.as_deref(), Some("etl.extract"));
        assert_eq!(event.logger.as_deref(), Some(LOGGER));
        let parts: Vec<String> = event.fingerprint.iter().map(ToString::to_string).collect();
        assert_eq!(parts, vec!["etl", "{{ default }}"]);
    }

    #[test]
    fn request_tags_override_defaults() {
        let defaults = BTreeMap::from([
            ("site".to_string(), "eu".to_string()),
            ("dag".to_string(), "default".to_string()),
        ]);
        let request = NotificationRequest::new("x").with_tag("dag", "etl");
        let event = build_event(&request, &defaults);
        assert_eq!(event.tags["site"], "eu");
        assert_eq!(event.tags["dag"], "etl");
    }

    #[test]
    fn empty_fingerprint_keeps_default_grouping() {
        let event = build_event(&NotificationRequest::new("x"), &BTreeMap::new());
        assert_eq!(event.fingerprint, Event::default().fingerprint);
        assert!(!event.extra.contains_key("time_spent"));
    }
}
