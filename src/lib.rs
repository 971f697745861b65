//! sentry-notify sends best-effort notifications to Sentry.
//!
//! A workflow task hands over a message plus metadata (level, tags,
//! environment, extra fields, fingerprint). The client settings are
//! resolved from explicit values, the environment, a config file and
//! git, and the event is sent once. Delivery failures are logged and
//! never surface as errors, so a broken notification cannot fail the
//! task that sent it.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (send, resolve, validate, init).
//! - [`config`] -- Layered key-value lookups via the
//!   [`ConfigStore`](config::ConfigStore) trait, file model and validation.
//! - [`client`] -- Client settings resolution and Sentry client construction.
//! - [`notify`] -- Notification requests, event mapping and the
//!   [`Dispatcher`](notify::Dispatcher).
//! - [`task`] -- [`NotifyTask`](task::NotifyTask) definitions executed by workflow steps.
//! - [`capability`] -- Process-wide flag for whether sending is possible at all.
//! - [`vcs`] -- Git revision lookup used as the release fallback.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `transport` | HTTP transport for the Sentry client _(enabled by default)_ |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Every fallible function returns `NotifierError`; its variants document the failures.
#![allow(clippy::missing_errors_doc)]

pub mod capability;
pub mod cli;
pub mod client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod task;
pub mod vcs;
