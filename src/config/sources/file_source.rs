//! File-based config store with SHA256 version tracking.
//!
//! [`FileStore`] implements [`ConfigStore`] for any supported file
//! format. The file is read once at load time; the content hash is kept
//! so that `resolve` output and debug logs identify which revision of
//! the file answered a lookup.

use std::path::{Path, PathBuf};

use super::{parse_config_str, sha256_hex};
use crate::config::model::{scalar_to_string, ConfigFile};
use crate::config::ConfigStore;
use crate::error::NotifierError;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    config: ConfigFile,
    version: String,
}

impl FileStore {
    pub fn load(path: &Path) -> Result<Self, NotifierError> {
        let content = read_content(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = parse_config_str(ext, &content, &path.display().to_string())?;
        reject_non_scalars(path, &config)?;
        let version = sha256_hex(content.as_bytes());

        tracing::debug!(
            path = %path.display(),
            version = %&version[..12],
            sections = config.sections.len(),
            "loaded config file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            config,
            version,
        })
    }

    /// Wrap an already-parsed config, e.g. one assembled in memory.
    #[must_use]
    pub fn from_config(config: ConfigFile, label: &str) -> Self {
        let config = config.normalized();
        let version = serde_json::to_vec(&config)
            .map(|bytes| sha256_hex(&bytes))
            .unwrap_or_default();
        Self {
            path: PathBuf::from(label),
            config,
            version,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }
}

/// Every value the store can hand out must be a scalar.
fn reject_non_scalars(path: &Path, config: &ConfigFile) -> Result<(), NotifierError> {
    for (section, values) in &config.sections {
        for (key, value) in values {
            if let Err(reason) = scalar_to_string(value) {
                return Err(NotifierError::ConfigParse {
                    path: path.display().to_string(),
                    source: format!("[{section}] {key}: {reason}").into(),
                });
            }
        }
    }
    Ok(())
}

pub fn read_content(path: &Path) -> Result<String, NotifierError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NotifierError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NotifierError::Io(e)
        }
    })
}

impl ConfigStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, section: &str, key: &str) -> Result<String, NotifierError> {
        match self.config.scalar(section, key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(NotifierError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
                store: self.name(),
            }),
            Err(reason) => Err(NotifierError::ConfigParse {
                path: self.path.display().to_string(),
                source: format!("[{section}] {key}: {reason}").into(),
            }),
        }
    }
}
