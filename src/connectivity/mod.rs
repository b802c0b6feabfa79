//! Imperative shell around the link reducer.
//!
//! This module owns everything with side effects: the CAD backend and alert
//! sink collaborators, the session's log and layer list, and the background
//! tasks that stream and poll backend health.
//!
//! # Example
//!
//! ```rust,no_run
//! use groundwork::connectivity::{
//!     ConnectivityConfig, ConnectivityManager, ConnectivityService, SilentAlerts,
//! };
//! # use groundwork::connectivity::{BackendError, CadBackend, StatusReport, StatusSubscription};
//! # use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! # struct HttpBackend;
//! # #[async_trait]
//! # impl CadBackend for HttpBackend {
//! #     async fn check_status(&self) -> Result<StatusReport, BackendError> { Ok(StatusReport::new(true, true)) }
//! #     async fn list_layers(&self) -> Result<Vec<String>, BackendError> { Ok(vec![]) }
//! #     async fn subscribe_status(&self) -> Result<StatusSubscription, BackendError> {
//! #         Err(BackendError::Stream("unsupported".into()))
//! #     }
//! # }
//! # async fn run() {
//! let manager = ConnectivityManager::new(Arc::new(HttpBackend), Arc::new(SilentAlerts));
//! let service = ConnectivityService::start(manager.clone(), ConnectivityConfig::default());
//!
//! if manager.connected().await {
//!     println!("layers: {:?}", manager.layers().await);
//! }
//! service.stop().await;
//! # }
//! ```

mod backend;
mod config;
mod error;
mod log;
mod manager;
mod service;

pub use backend::{AlertSink, CadBackend, SilentAlerts, StatusReport, StatusSubscription};
pub use config::{
    ConnectivityConfig, ConnectivityConfigBuilder, DEFAULT_CHANNEL_CAPACITY,
    DEFAULT_POLL_INTERVAL,
};
pub use error::{BackendError, ConfigError};
pub use log::{LogEntry, LogSource};
pub use manager::{ConnectivityManager, MAX_TRANSITIONS};
pub use service::{ConnectivityService, MSG_STREAM_FALLBACK};
