//! Background producers feeding the connectivity manager.
//!
//! Two producers race to report backend health: the push status stream and
//! a polling fallback. Both send [`Observation`]s into one channel, and a
//! single consumer applies them to the [`ConnectivityManager`] in arrival
//! order, so the manager never sees concurrent transitions.

use super::backend::CadBackend;
use super::config::ConnectivityConfig;
use super::log::LogSource;
use super::manager::ConnectivityManager;
use crate::core::{Channel, Observation};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const MSG_STREAM_FALLBACK: &str = "Status stream unavailable, falling back to polling";

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Running connectivity protocol. Stops on [`stop`](Self::stop) or drop.
///
/// Must be started from within a Tokio runtime.
pub struct ConnectivityService {
    manager: ConnectivityManager,
    tasks: Vec<JoinHandle<()>>,
}

impl ConnectivityService {
    /// Spawn the stream, poll and consumer tasks.
    pub fn start(manager: ConnectivityManager, config: ConnectivityConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let backend = manager.backend();

        info!(
            poll_interval = ?config.poll_interval,
            "Starting connectivity service"
        );

        let tasks = vec![
            tokio::spawn(consume(manager.clone(), rx)),
            tokio::spawn(stream_status(
                Arc::clone(&backend),
                manager.clone(),
                tx.clone(),
            )),
            tokio::spawn(poll_status(backend, config, tx)),
        ];

        Self { manager, tasks }
    }

    pub fn manager(&self) -> &ConnectivityManager {
        &self.manager
    }

    /// Close the manager and cancel every background task.
    pub async fn stop(mut self) {
        self.manager.close().await;
        self.abort_tasks();
        info!("Connectivity service stopped");
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ConnectivityService {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

async fn consume(manager: ConnectivityManager, mut rx: mpsc::Receiver<Observation>) {
    while let Some(observation) = rx.recv().await {
        manager.observe(observation).await;
    }
    debug!("All health producers finished");
}

async fn stream_status(
    backend: Arc<dyn CadBackend>,
    manager: ConnectivityManager,
    tx: mpsc::Sender<Observation>,
) {
    let mut subscription = match backend.subscribe_status().await {
        Ok(subscription) => subscription,
        Err(err) => {
            warn!(error = %err, "Status stream could not be opened");
            manager.add_log(LogSource::System, MSG_STREAM_FALLBACK).await;
            return;
        }
    };

    while let Some(report) = subscription.recv().await {
        let observation =
            Observation::reported(Channel::Stream, report.connected, report.autocad_running);
        if tx.send(observation).await.is_err() {
            return;
        }
    }
    debug!("Status stream closed by backend");
}

async fn poll_status(
    backend: Arc<dyn CadBackend>,
    config: ConnectivityConfig,
    tx: mpsc::Sender<Observation>,
) {
    let mut ticker = time::interval(config.poll_interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately.
        ticker.tick().await;
        let observation = match backend.check_status().await {
            Ok(report) => {
                Observation::reported(Channel::Poll, report.connected, report.autocad_running)
            }
            Err(err) => Observation::unreachable(Channel::Poll, err.to_string()),
        };
        if tx.send(observation).await.is_err() {
            return;
        }
    }
}
