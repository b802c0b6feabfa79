//! Connectivity state owned by the editor session.

use super::backend::{AlertSink, CadBackend};
use super::log::{LogEntry, LogSource};
use crate::core::{
    reduce, Effect, Health, Link, LinkState, Observation, State, StateHistory, StateTransition,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Link changes kept for diagnostics; older ones are dropped first.
pub const MAX_TRANSITIONS: usize = 256;

#[derive(Debug, Default)]
struct Inner {
    link: LinkState,
    layers: Vec<String>,
    logs: Vec<LogEntry>,
    transitions: StateHistory<Link>,
    closed: bool,
}

/// Backend availability, layer list and diagnostic log.
///
/// Cloning yields another handle to the same state. All mutation goes
/// through [`observe`](ConnectivityManager::observe) and the log methods;
/// once [`close`](ConnectivityManager::close) is called every later
/// completion is ignored.
#[derive(Clone)]
pub struct ConnectivityManager {
    backend: Arc<dyn CadBackend>,
    alerts: Arc<dyn AlertSink>,
    inner: Arc<Mutex<Inner>>,
}

impl ConnectivityManager {
    pub fn new(backend: Arc<dyn CadBackend>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            backend,
            alerts,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub(crate) fn backend(&self) -> Arc<dyn CadBackend> {
        Arc::clone(&self.backend)
    }

    pub async fn connected(&self) -> bool {
        self.inner.lock().await.link.is_connected()
    }

    pub async fn link(&self) -> Link {
        self.inner.lock().await.link.link
    }

    pub async fn layers(&self) -> Vec<String> {
        self.inner.lock().await.layers.clone()
    }

    pub async fn logs(&self) -> Vec<LogEntry> {
        self.inner.lock().await.logs.clone()
    }

    /// Trail of link changes since the manager was created.
    pub async fn transitions(&self) -> StateHistory<Link> {
        self.inner.lock().await.transitions.clone()
    }

    pub async fn add_log(&self, source: LogSource, message: impl Into<String>) {
        let entry = LogEntry::new(source, message);
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return;
        }
        info!(source = %entry.source, "{}", entry.message);
        inner.logs.push(entry);
    }

    pub async fn clear_logs(&self) {
        let mut inner = self.inner.lock().await;
        if !inner.closed {
            inner.logs.clear();
        }
    }

    /// Re-query the backend's layer list.
    ///
    /// On failure the previous list is kept and an empty list is returned.
    /// Concurrent refreshes are not coalesced: the stored list is the result
    /// of the call that is last to complete, not the one issued last.
    pub async fn refresh_layers(&self) -> Vec<String> {
        match self.backend.list_layers().await {
            Ok(layers) => {
                let mut inner = self.inner.lock().await;
                if !inner.closed {
                    inner.layers = layers.clone();
                }
                layers
            }
            Err(err) => {
                warn!(error = %err, "Layer refresh failed");
                Vec::new()
            }
        }
    }

    /// Fold one health observation into the state and run its effects.
    pub async fn observe(&self, observation: Observation) {
        if let Health::Unreachable { reason } = &observation.health {
            debug!(channel = ?observation.channel, %reason, "Backend health query failed");
        }

        let effects = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                debug!("Ignoring observation after close");
                return;
            }

            let (next, effects) = reduce(&inner.link, &observation);
            if next.link != inner.link.link {
                let (from, to) = (inner.link.link, next.link);
                let channel = observation.channel;
                if to.is_error() {
                    warn!(from = from.name(), to = to.name(), ?channel, "Backend link changed");
                } else {
                    info!(from = from.name(), to = to.name(), ?channel, "Backend link changed");
                }
                inner.transitions.push_bounded(
                    StateTransition {
                        from,
                        to,
                        timestamp: Utc::now(),
                        channel,
                    },
                    MAX_TRANSITIONS,
                );
            }
            inner.link = next;
            effects
        };

        for effect in effects {
            if self.is_closed().await {
                return;
            }
            match effect {
                Effect::Log(message) => self.add_log(LogSource::System, message).await,
                Effect::Alert { kind, message } => self.alerts.show(kind, &message),
                Effect::RefreshLayers { announce } => {
                    let layers = self.refresh_layers().await;
                    if announce && !layers.is_empty() {
                        self.add_log(
                            LogSource::System,
                            format!("Found {} layers in drawing", layers.len()),
                        )
                        .await;
                    }
                }
            }
        }
    }

    /// Tear down: every later observation, log change or refresh result is
    /// dropped.
    pub async fn close(&self) {
        self.inner.lock().await.closed = true;
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.closed
    }
}
