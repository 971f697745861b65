//! Static starter templates, minimal or fully commented.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::NotifierError;

pub fn run(args: &InitArgs) -> Result<(), NotifierError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("sentry-notify.{}", args.format.extension())));

    if output.exists() {
        return Err(NotifierError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# sentry-notify config

sentry:
  sentry_dsn: "https://<public_key>@<host>/<project_id>"
"#;

const YAML_FULL: &str = r#"# sentry-notify config
#
# Every key is optional. Command-line flags win over this file, and
# SENTRY_NOTIFY__SENTRY__<KEY> environment variables win over it too.

sentry:
  # Where events are sent. Required to deliver anything.
  sentry_dsn: "https://<public_key>@<host>/<project_id>"

  # Sent as the `site` tag on every event
  # sentry_site: "eu-west-1"

  # Server name reported with every event
  # sentry_name: "scheduler-1"

  # Release; defaults to the git HEAD of the working directory
  # sentry_release: "2024.06.1"

  # sentry_environment: "production"
"#;

const JSON_MINIMAL: &str = r#"{
  "sentry": {
    "sentry_dsn": "https://<public_key>@<host>/<project_id>"
  }
}
"#;

const JSON_FULL: &str = r#"{
  "sentry": {
    "sentry_dsn": "https://<public_key>@<host>/<project_id>",
    "sentry_site": "eu-west-1",
    "sentry_name": "scheduler-1",
    "sentry_release": "2024.06.1",
    "sentry_environment": "production"
  }
}
"#;

const TOML_MINIMAL: &str = r#"# sentry-notify config

[sentry]
sentry_dsn = "https://<public_key>@<host>/<project_id>"
"#;

const TOML_FULL: &str = r#"# sentry-notify config
#
# Every key is optional. Command-line flags win over this file, and
# SENTRY_NOTIFY__SENTRY__<KEY> environment variables win over it too.

[sentry]
# Where events are sent. Required to deliver anything.
sentry_dsn = "https://<public_key>@<host>/<project_id>"

# Sent as the `site` tag on every event
# sentry_site = "eu-west-1"

# Server name reported with every event
# sentry_name = "scheduler-1"

# Release; defaults to the git HEAD of the working directory
# sentry_release = "2024.06.1"

# sentry_environment = "production"
"#;
