//! `sentry-notify resolve` — show the effective client settings.
//!
//! Runs the same resolution as `send` and prints each field with the
//! layer it came from. The DSN itself is never printed, only a short
//! digest of it.

use crate::cli::{OutputFormat, ResolveArgs};
use crate::client::{ClientConfig, Origin, Provenance};
use crate::error::NotifierError;

pub fn execute(args: &ResolveArgs) -> Result<(), NotifierError> {
    let resolver = args.client.resolver()?;
    let (config, provenance) = resolver.resolve_with_provenance(&args.client.overrides());

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&config, &provenance)),
        OutputFormat::Json => println!("{}", render_json(&config, &provenance)),
    }
    Ok(())
}

fn rows(config: &ClientConfig) -> [(&'static str, Option<String>); 5] {
    [
        ("dsn", config.dsn_digest()),
        ("site", config.site.clone()),
        ("name", config.name.clone()),
        ("release", config.release.clone()),
        ("environment", config.environment.clone()),
    ]
}

fn origin(provenance: &Provenance, field: &str) -> Origin {
    provenance.get(field).copied().unwrap_or(Origin::Unset)
}

#[must_use]
pub fn render_text(config: &ClientConfig, provenance: &Provenance) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (field, value) in rows(config) {
        let value = value.unwrap_or_else(|| "-".into());
        // write! to String is infallible
        let _ = writeln!(
            buf,
            "  {field:<12} {value:<44} ({})",
            origin(provenance, field)
        );
    }
    if !config.tags.is_empty() {
        let tags: Vec<String> = config.tags.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let _ = writeln!(buf, "  {:<12} {}", "tags", tags.join(", "));
    }
    if !config.options.is_empty() {
        let options: Vec<String> = config
            .options
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let _ = writeln!(buf, "  {:<12} {}", "options", options.join(", "));
    }
    buf
}

#[must_use]
pub fn render_json(config: &ClientConfig, provenance: &Provenance) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for (field, value) in rows(config) {
        fields.insert(
            field.to_string(),
            serde_json::json!({
                "value": value,
                "source": origin(provenance, field).as_str(),
            }),
        );
    }
    serde_json::json!({
        "fields": fields,
        "tags": config.tags,
        "options": config.options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn sample() -> (ClientConfig, Provenance) {
        let config = ClientConfig {
            dsn: Some(SecretString::new(
                "https://public@o1.ingest.sentry.io/42".into(),
            )),
            environment: Some("staging".into()),
            ..Default::default()
        };
        let provenance = Provenance::from([
            ("dsn", Origin::Store("env")),
            ("environment", Origin::Explicit),
        ]);
        (config, provenance)
    }

    #[test]
    fn text_never_shows_dsn() {
        let (config, provenance) = sample();
        let text = render_text(&config, &provenance);
        assert!(!text.contains("public@"));
        assert!(text.contains("sha256:"));
        assert!(text.contains("(env)"));
        assert!(text.contains("(explicit)"));
        assert!(text.contains("(unset)"));
    }

    #[test]
    fn json_reports_sources() {
        let (config, provenance) = sample();
        let json = render_json(&config, &provenance);
        assert_eq!(json["fields"]["environment"]["value"], "staging");
        assert_eq!(json["fields"]["environment"]["source"], "explicit");
        assert_eq!(json["fields"]["dsn"]["source"], "env");
        assert_eq!(json["fields"]["release"]["value"], serde_json::Value::Null);
        assert!(!json.to_string().contains("public@"));
    }
}
