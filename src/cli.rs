//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (send, resolve, validate, init), and their associated
//! argument structs. Client settings shared by `send` and `resolve`
//! live in [`ClientArgs`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::client::{ClientOverrides, ClientResolver};
use crate::config::ConfigStore;
use crate::error::NotifierError;
use crate::notify::Level;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SENTRY_NOTIFY_GIT_SHORT"),
    " ",
    env!("SENTRY_NOTIFY_TARGET"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "sentry-notify",
    version,
    long_version = LONG_VERSION,
    about = "Best-effort Sentry notifications for workflow tasks",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        sentry-notify init                          Create a starter config\n  \
        sentry-notify send \"Task failed\" -l fatal   Send one notification\n  \
        sentry-notify resolve                       Show the effective client settings"
)]
pub struct Cli {
    /// Log level
    #[arg(short = 'L', long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one notification (never fails the calling task)
    Send(Box<SendArgs>),

    /// Print the resolved client settings and where each came from
    Resolve(ResolveArgs),

    /// Validate a config file
    Validate(ValidateArgs),

    /// Generate a starter config file
    Init(InitArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        sentry-notify send \"Task failed\" -l fatal -t dag=etl\n  \
        sentry-notify send \"Slow load\" -l warning -e rows=120000 -f etl -f load\n  \
        sentry-notify send --task notify.yaml --environment staging")]
pub struct SendArgs {
    /// Notification message (optional when --task provides one)
    #[arg(required_unless_present = "task")]
    pub message: Option<String>,

    /// Task definition file (.yaml, .json, .toml); flags override its fields
    #[arg(long)]
    pub task: Option<PathBuf>,

    /// Severity level [default: info]
    #[arg(short, long)]
    pub level: Option<Level>,

    /// Event tag, repeatable
    #[arg(short, long = "tag", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub tags: Vec<(String, String)>,

    /// Extra metadata, repeatable; VALUE is parsed as JSON when possible
    #[arg(short, long = "extra", value_name = "KEY=VALUE", value_parser = parse_key_json)]
    pub extra: Vec<(String, Value)>,

    /// Fingerprint part, repeatable and ordered
    #[arg(short, long = "fingerprint", value_name = "PART")]
    pub fingerprint: Vec<String>,

    /// Culprit (e.g. the failing task id)
    #[arg(long)]
    pub culprit: Option<String>,

    /// Time spent, in milliseconds
    #[arg(long, value_name = "MS")]
    pub time_spent: Option<u64>,

    #[command(flatten)]
    pub client: ClientArgs,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Explicit client settings; anything not given is looked up.
#[derive(Args, Default)]
pub struct ClientArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "SENTRY_NOTIFY_CONFIG", help_heading = "Client")]
    pub config: Option<PathBuf>,

    /// Sentry DSN
    #[arg(long, help_heading = "Client")]
    pub dsn: Option<String>,

    /// Site, sent as the `site` tag
    #[arg(long, help_heading = "Client")]
    pub site: Option<String>,

    /// Server name
    #[arg(long, help_heading = "Client")]
    pub name: Option<String>,

    /// Release [default: git HEAD of the working directory]
    #[arg(long, help_heading = "Client")]
    pub release: Option<String>,

    /// Environment, e.g. staging
    #[arg(long, help_heading = "Client")]
    pub environment: Option<String>,

    /// Client option passthrough, repeatable (e.g. sample_rate=0.5)
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_key_json, help_heading = "Client")]
    pub options: Vec<(String, Value)>,

    /// Directory used for the release fallback and config auto-detection
    #[arg(short = 'C', long, value_name = "DIR", help_heading = "Client")]
    pub working_dir: Option<PathBuf>,

    /// Do not derive the release from git
    #[arg(long, help_heading = "Client")]
    pub no_vcs_release: bool,
}

impl ClientArgs {
    pub fn working_dir(&self) -> Result<PathBuf, NotifierError> {
        match self.working_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    #[must_use]
    pub fn overrides(&self) -> ClientOverrides {
        let mut overrides = ClientOverrides {
            site: self.site.clone(),
            name: self.name.clone(),
            release: self.release.clone(),
            environment: self.environment.clone(),
            options: self.options.iter().cloned().collect::<BTreeMap<_, _>>(),
            ..Default::default()
        };
        if let Some(ref dsn) = self.dsn {
            overrides = overrides.with_dsn(dsn.clone());
        }
        overrides
    }

    pub fn resolver(&self) -> Result<ClientResolver, NotifierError> {
        let dir = self.working_dir()?;
        let store = crate::config::default_store(self.config.as_deref(), &dir)?;
        Ok(self.resolver_over(Box::new(store), dir))
    }

    #[must_use]
    pub fn resolver_over(&self, store: Box<dyn ConfigStore>, dir: PathBuf) -> ClientResolver {
        ClientResolver::new(store)
            .with_working_dir(dir)
            .with_vcs_fallback(!self.no_vcs_release)
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "sentry-notify.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        sentry-notify init                          Quick start config (yaml)\n  \
        sentry-notify init -i                       Interactive wizard\n  \
        sentry-notify init -f toml -o notify.toml   Non-interactive, TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include every key as a comment (non-interactive only)
    #[arg(long, conflicts_with = "interactive")]
    pub full: bool,

    /// Launch interactive wizard
    #[arg(short, long)]
    pub interactive: bool,
}

/// Parse `KEY=VALUE`.
pub fn parse_key_value(input: &str) -> Result<(String, String), NotifierError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(NotifierError::InvalidKeyValue {
            input: input.to_string(),
        }),
    }
}

/// Parse `KEY=VALUE`, reading VALUE as JSON and falling back to a string.
pub fn parse_key_json(input: &str) -> Result<(String, Value), NotifierError> {
    let (key, raw) = parse_key_value(input)?;
    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
    Ok((key, value))
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
