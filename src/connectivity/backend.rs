//! External collaborators: the CAD backend and the alert sink.

use super::error::BackendError;
use crate::core::AlertKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Health payload reported by the CAD backend.
///
/// Stream messages carry an extra `"type": "status"` tag, which is ignored.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct StatusReport {
    pub connected: bool,
    pub autocad_running: bool,
}

impl StatusReport {
    pub fn new(connected: bool, autocad_running: bool) -> Self {
        Self {
            connected,
            autocad_running,
        }
    }

    /// Decode a raw status message.
    pub fn from_json(payload: &str) -> Result<Self, BackendError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Live status subscription. Dropping the receiver unsubscribes.
pub type StatusSubscription = mpsc::Receiver<StatusReport>;

/// CAD backend connectivity and layer service.
///
/// Implementations own their transport and timeout policy.
#[async_trait]
pub trait CadBackend: Send + Sync {
    /// One-shot health check.
    async fn check_status(&self) -> Result<StatusReport, BackendError>;

    /// Current named-layer list.
    async fn list_layers(&self) -> Result<Vec<String>, BackendError>;

    /// Open the push status stream.
    async fn subscribe_status(&self) -> Result<StatusSubscription, BackendError>;
}

/// User-facing notification sink. Fire-and-forget.
pub trait AlertSink: Send + Sync {
    fn show(&self, kind: AlertKind, message: &str);
}

/// Sink that drops every alert, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAlerts;

impl AlertSink for SilentAlerts {
    fn show(&self, _kind: AlertKind, _message: &str) {}
}
