//! Sentry client settings and construction.
//!
//! [`ClientOverrides`] carries the values a caller sets explicitly;
//! [`ClientResolver`] fills in the gaps from the config store and
//! source control to produce a [`ClientConfig`], which in turn builds a
//! one-shot [`sentry::Client`].

pub mod options;
pub mod resolver;

use std::collections::BTreeMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use sentry::types::Dsn;
use sentry::{ClientOptions, TransportFactory};
use serde_json::Value;

use crate::config::sources::sha256_hex;
use crate::error::NotifierError;

pub use resolver::{ClientResolver, Origin, Provenance};

/// Explicitly supplied client settings. Anything left `None` (or empty)
/// is looked up by the resolver.
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub dsn: Option<SecretString>,
    pub site: Option<String>,
    pub name: Option<String>,
    pub release: Option<String>,
    pub environment: Option<String>,
    /// Attached to every event sent with this client. Never read from config.
    pub tags: BTreeMap<String, String>,
    /// Client-specific options, see [`options::SUPPORTED`].
    pub options: BTreeMap<String, Value>,
}

impl ClientOverrides {
    #[must_use]
    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(SecretString::new(dsn.into()));
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    #[must_use]
    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Fully resolved client settings. Built per call and dropped after it.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub dsn: Option<SecretString>,
    pub site: Option<String>,
    pub name: Option<String>,
    pub release: Option<String>,
    pub environment: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub options: BTreeMap<String, Value>,
}

impl ClientConfig {
    /// Short digest that identifies the DSN without revealing it.
    #[must_use]
    pub fn dsn_digest(&self) -> Option<String> {
        self.dsn
            .as_ref()
            .map(|dsn| format!("sha256:{}", &sha256_hex(dsn.expose_secret().as_bytes())[..12]))
    }

    /// Tags every event gets: `site` first, then the configured tags.
    #[must_use]
    pub fn default_tags(&self) -> BTreeMap<String, String> {
        let mut tags = BTreeMap::new();
        if let Some(ref site) = self.site {
            tags.insert("site".to_string(), site.clone());
        }
        tags.extend(self.tags.clone());
        tags
    }

    /// Translate into [`ClientOptions`].
    ///
    /// `transport` replaces the compiled-in HTTP transport when given.
    pub fn client_options(
        &self,
        transport: Option<Arc<dyn TransportFactory>>,
    ) -> Result<ClientOptions, NotifierError> {
        let dsn = self.dsn.as_ref().ok_or_else(|| NotifierError::MissingDsn {
            hint: "Pass --dsn, set sentry_dsn in the [sentry] config section,\n  \
                   or export SENTRY_NOTIFY__SENTRY__SENTRY_DSN."
                .into(),
        })?;
        let dsn: Dsn = dsn
            .expose_secret()
            .parse()
            .map_err(|e: sentry::types::ParseDsnError| NotifierError::InvalidDsn {
                source: Box::new(e),
            })?;

        let transport = match transport {
            Some(t) => t,
            None => default_transport()?,
        };

        let mut opts = ClientOptions {
            dsn: Some(dsn),
            release: self.release.clone().map(Into::into),
            environment: self.environment.clone().map(Into::into),
            server_name: self.name.clone().map(Into::into),
            transport: Some(transport),
            ..Default::default()
        };
        options::apply(&mut opts, &self.options)?;
        Ok(opts)
    }

    /// `dist` passed through the options; it is set per event.
    pub fn dist(&self) -> Result<Option<String>, NotifierError> {
        options::dist(&self.options)
    }

    pub fn build_client(
        &self,
        transport: Option<Arc<dyn TransportFactory>>,
    ) -> Result<sentry::Client, NotifierError> {
        let opts = self.client_options(transport)?;
        Ok(sentry::Client::from(opts))
    }
}

#[cfg(feature = "transport")]
fn default_transport() -> Result<Arc<dyn TransportFactory>, NotifierError> {
    Ok(Arc::new(sentry::transports::DefaultTransportFactory))
}

#[cfg(not(feature = "transport"))]
fn default_transport() -> Result<Arc<dyn TransportFactory>, NotifierError> {
    Err(NotifierError::NoTransport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentry::test::TestTransport;

    const DSN: &str = "https://public@o1.ingest.sentry.io/42";

    fn config_with_dsn(dsn: &str) -> ClientConfig {
        ClientConfig {
            dsn: Some(SecretString::new(dsn.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn missing_dsn_fails_construction() {
        let err = ClientConfig::default()
            .build_client(Some(Arc::new(TestTransport::new())))
            .unwrap_err();
        assert!(matches!(err, NotifierError::MissingDsn { .. }));
    }

    #[test]
    fn malformed_dsn_fails_construction() {
        let err = config_with_dsn("not-a-dsn")
            .build_client(Some(Arc::new(TestTransport::new())))
            .unwrap_err();
        assert!(matches!(err, NotifierError::InvalidDsn { .. }));
    }

    #[test]
    fn options_carry_resolved_fields() {
        let config = ClientConfig {
            name: Some("worker-7".into()),
            release: Some("abc123".into()),
            environment: Some("staging".into()),
            ..config_with_dsn(DSN)
        };
        let opts = config
            .client_options(Some(Arc::new(TestTransport::new())))
            .unwrap();
        assert_eq!(opts.server_name.as_deref(), Some("worker-7"));
        assert_eq!(opts.release.as_deref(), Some("abc123"));
        assert_eq!(opts.environment.as_deref(), Some("staging"));
        assert!(opts.dsn.is_some());
    }

    #[test]
    fn site_becomes_a_tag_and_configured_tags_win() {
        let config = ClientConfig {
            site: Some("eu-west".into()),
            tags: BTreeMap::from([("team".to_string(), "data".to_string())]),
            ..Default::default()
        };
        let tags = config.default_tags();
        assert_eq!(tags.get("site").map(String::as_str), Some("eu-west"));
        assert_eq!(tags.get("team").map(String::as_str), Some("data"));
    }

    #[test]
    fn dsn_digest_hides_secret() {
        let digest = config_with_dsn(DSN).dsn_digest().unwrap();
        assert!(digest.starts_with("sha256:"));
        assert_eq!(digest.len(), "sha256:".len() + 12);
        assert!(!digest.contains("public"));
        assert_eq!(ClientConfig::default().dsn_digest(), None);
    }

    #[test]
    fn debug_output_redacts_dsn() {
        let rendered = format!("{:?}", config_with_dsn(DSN));
        assert!(!rendered.contains("public@"));
    }

    #[test]
    fn overrides_builder_sets_fields() {
        let overrides = ClientOverrides::default()
            .with_dsn(DSN)
            .with_environment("prod")
            .with_release("r1")
            .with_tag("dag", "etl")
            .with_option("debug", true);
        assert_eq!(overrides.dsn.as_ref().unwrap().expose_secret(), DSN);
        assert_eq!(overrides.environment.as_deref(), Some("prod"));
        assert_eq!(overrides.release.as_deref(), Some("r1"));
        assert_eq!(overrides.tags["dag"], "etl");
        assert_eq!(overrides.options["debug"], Value::Bool(true));
    }
}
