//! Best-effort delivery of one notification.
//!
//! [`Dispatcher::dispatch`] resolves the client config, builds a fresh
//! client, captures a single event and waits for the transport to drain.
//! It never returns an error: every failure is logged at error level and
//! reported as [`DispatchOutcome::Dropped`], so a broken notification
//! cannot fail the task that sent it. There is no retry.

use std::path::Path;
use std::sync::Arc;

use sentry::types::Uuid;
use sentry::TransportFactory;

use super::event::build_event;
use super::request::NotificationRequest;
use crate::capability;
use crate::client::{ClientOverrides, ClientResolver};
use crate::config;
use crate::error::NotifierError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { event_id: Uuid },
    /// The sentry client is unavailable in this process; nothing was attempted.
    Disabled,
    Dropped { reason: String },
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

pub struct Dispatcher {
    resolver: ClientResolver,
    transport: Option<Arc<dyn TransportFactory>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(resolver: ClientResolver) -> Self {
        Self {
            resolver,
            transport: None,
        }
    }

    /// Dispatcher over the default store (environment, then the config
    /// file at `config_path` or auto-detected in the current directory).
    pub fn from_environment(config_path: Option<&Path>) -> Result<Self, NotifierError> {
        let dir = std::env::current_dir()?;
        let store = config::default_store(config_path, &dir)?;
        Ok(Self::new(
            ClientResolver::new(Box::new(store)).with_working_dir(dir),
        ))
    }

    /// Send through `transport` instead of the compiled-in HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn TransportFactory>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &ClientResolver {
        &self.resolver
    }

    pub fn dispatch(
        &self,
        request: &NotificationRequest,
        overrides: &ClientOverrides,
    ) -> DispatchOutcome {
        if !capability::is_available() {
            return DispatchOutcome::Disabled;
        }

        match self.try_dispatch(request, overrides) {
            Ok(event_id) => {
                tracing::info!(%event_id, level = %request.level, "notification sent to sentry");
                DispatchOutcome::Delivered { event_id }
            }
            Err(e) => {
                tracing::error!(error = %e, level = %request.level, "failed to send notification to sentry");
                DispatchOutcome::Dropped {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_dispatch(
        &self,
        request: &NotificationRequest,
        overrides: &ClientOverrides,
    ) -> Result<Uuid, NotifierError> {
        let config = if overrides.environment.is_none() && request.environment.is_some() {
            let mut overrides = overrides.clone();
            overrides.environment.clone_from(&request.environment);
            self.resolver.resolve(&overrides)
        } else {
            self.resolver.resolve(overrides)
        };

        let client = config.build_client(self.transport.clone())?;
        let mut event = build_event(request, &config.default_tags());
        event.dist = config.dist()?.map(Into::into);

        let event_id = client.capture_event(event, None);
        let timeout = client.options().shutdown_timeout;
        let drained = client.close(Some(timeout));

        if event_id.is_nil() {
            return Err(NotifierError::NotDelivered {
                event_id: event_id.to_string(),
                reason: "event was discarded by the client (sampled out)".into(),
            });
        }
        if !drained {
            return Err(NotifierError::NotDelivered {
                event_id: event_id.to_string(),
                reason: format!("transport did not drain within {timeout:?}"),
            });
        }
        Ok(event_id)
    }
}

/// One-shot send using [`Dispatcher::from_environment`].
///
/// Config problems are logged like any other delivery failure.
pub fn send_message(request: &NotificationRequest, overrides: &ClientOverrides) -> DispatchOutcome {
    if !capability::is_available() {
        return DispatchOutcome::Disabled;
    }

    match Dispatcher::from_environment(None) {
        Ok(dispatcher) => dispatcher.dispatch(request, overrides),
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification to sentry");
            DispatchOutcome::Dropped {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_delivered_counts_as_delivered() {
        assert!(DispatchOutcome::Delivered {
            event_id: Uuid::nil()
        }
        .is_delivered());
        assert!(!DispatchOutcome::Disabled.is_delivered());
        assert!(!DispatchOutcome::Dropped {
            reason: "x".into()
        }
        .is_delivered());
    }
}
