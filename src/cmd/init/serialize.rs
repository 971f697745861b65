//! Serialize a [`ConfigFile`] to the chosen output format.

use crate::cli::ConfigFormat;
use crate::config::model::ConfigFile;
use crate::error::NotifierError;

/// Serialize a `ConfigFile` to a formatted string in the given format.
pub fn serialize_config(config: &ConfigFile, format: &ConfigFormat) -> Result<String, NotifierError> {
    match format {
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => serde_yml::to_string(config)
            .map_err(|e| NotifierError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "yaml"))]
        ConfigFormat::Yaml => Err(NotifierError::UnsupportedFormat("yaml".into())),

        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map(|s| s + "\n")
            .map_err(|e| NotifierError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| NotifierError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "toml"))]
        ConfigFormat::Toml => Err(NotifierError::UnsupportedFormat("toml".into())),
    }
}
