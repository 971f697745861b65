//! Resolve [`ClientConfig`] from explicit values, the config store and git.
//!
//! Every field follows the same order: explicit value, then the
//! `sentry` section of the config store, then (for `release` only) the
//! `HEAD` revision of the working directory, then unset. A store miss is
//! expected and only logged at debug level.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use super::{ClientConfig, ClientOverrides};
use crate::config::{
    ConfigStore, KEY_DSN, KEY_ENVIRONMENT, KEY_NAME, KEY_RELEASE, KEY_SITE, SENTRY_SECTION,
};
use crate::vcs;

/// Where a resolved field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Explicit,
    /// Named config store layer (`env`, `file`, ...).
    Store(&'static str),
    Vcs,
    Unset,
}

impl Origin {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Store(name) => *name,
            Self::Vcs => "vcs",
            Self::Unset => "unset",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin per field name (`dsn`, `site`, `name`, `release`, `environment`).
pub type Provenance = BTreeMap<&'static str, Origin>;

pub struct ClientResolver {
    store: Box<dyn ConfigStore>,
    working_dir: PathBuf,
    vcs_fallback: bool,
}

impl ClientResolver {
    #[must_use]
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self {
            store,
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            vcs_fallback: true,
        }
    }

    /// Directory whose git `HEAD` backs the release fallback.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_vcs_fallback(mut self, enabled: bool) -> Self {
        self.vcs_fallback = enabled;
        self
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn resolve(&self, overrides: &ClientOverrides) -> ClientConfig {
        self.resolve_with_provenance(overrides).0
    }

    #[must_use]
    pub fn resolve_with_provenance(&self, overrides: &ClientOverrides) -> (ClientConfig, Provenance) {
        let mut provenance = Provenance::new();

        let explicit_dsn = overrides
            .dsn
            .as_ref()
            .map(|d| d.expose_secret().clone());
        let (dsn, origin) = self.field(explicit_dsn, KEY_DSN);
        provenance.insert("dsn", origin);

        let (site, origin) = self.field(overrides.site.clone(), KEY_SITE);
        provenance.insert("site", origin);

        let (name, origin) = self.field(overrides.name.clone(), KEY_NAME);
        provenance.insert("name", origin);

        let (environment, origin) = self.field(overrides.environment.clone(), KEY_ENVIRONMENT);
        provenance.insert("environment", origin);

        let (mut release, mut origin) = self.field(overrides.release.clone(), KEY_RELEASE);
        if release.is_none() && self.vcs_fallback {
            if let Some(rev) = vcs::head_revision(&self.working_dir) {
                tracing::debug!(release = %rev, "release derived from git HEAD");
                release = Some(rev);
                origin = Origin::Vcs;
            }
        }
        provenance.insert("release", origin);

        let config = ClientConfig {
            dsn: dsn.map(SecretString::new),
            site,
            name,
            release,
            environment,
            tags: overrides.tags.clone(),
            options: overrides.options.clone(),
        };
        (config, provenance)
    }

    fn field(&self, explicit: Option<String>, key: &str) -> (Option<String>, Origin) {
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return (Some(value), Origin::Explicit);
        }
        match self.store.locate(SENTRY_SECTION, key) {
            Ok((value, store)) => (Some(value), Origin::Store(store)),
            Err(e) if e.is_missing_key() => {
                tracing::debug!(
                    section = SENTRY_SECTION,
                    key,
                    reason = %e,
                    "config key not set"
                );
                (None, Origin::Unset)
            }
            Err(e) => {
                tracing::warn!(
                    section = SENTRY_SECTION,
                    key,
                    error = %e,
                    "config key unreadable, leaving it unset"
                );
                (None, Origin::Unset)
            }
        }
    }
}
