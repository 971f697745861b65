//! Concrete [`ConfigStore`](super::ConfigStore) implementations.
//!
//! Provides the environment-variable store, the file store (YAML, JSON,
//! TOML gated by feature flags), the [`parse_config_str`] helper for
//! format-specific deserialization, and config file auto-detection.

pub mod env_source;
pub mod file_source;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::config::model::ConfigFile;
use crate::error::NotifierError;
use file_source::FileStore;

/// File names probed, in order, when no config path is given. Only
/// formats compiled into this build are listed.
pub const CANDIDATES: &[&str] = &[
    #[cfg(feature = "yaml")]
    "sentry-notify.yaml",
    #[cfg(feature = "yaml")]
    "sentry-notify.yml",
    #[cfg(feature = "json")]
    "sentry-notify.json",
    #[cfg(feature = "toml")]
    "sentry-notify.toml",
];

/// Deserialize any serde type from a string based on file extension.
pub fn deserialize_str<T: DeserializeOwned>(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<T, NotifierError> {
    let parsed: Result<T, Box<dyn std::error::Error + Send + Sync>> = match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(Into::into),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(Into::into),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(Into::into),

        other => return Err(NotifierError::UnsupportedFormat(other.to_string())),
    };

    parsed.map_err(|source| NotifierError::ConfigParse {
        path: path_display.to_string(),
        source,
    })
}

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<ConfigFile, NotifierError> {
    deserialize_str::<ConfigFile>(ext, content, path_display).map(ConfigFile::normalized)
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Load the explicit config file, or the first [`CANDIDATES`] entry found
/// in `dir`. An explicit path that does not exist is an error; no
/// auto-detected file is not.
pub fn resolve_file_store(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<Option<FileStore>, NotifierError> {
    if let Some(path) = explicit {
        return FileStore::load(path).map(Some);
    }

    for name in CANDIDATES {
        let path: PathBuf = dir.join(name);
        if path.is_file() {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return FileStore::load(&path).map(Some);
        }
    }

    Ok(None)
}
