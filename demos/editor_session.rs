//! Editor Session
//!
//! This example walks through one editing session:
//! - Recording edits and undoing/redoing them with restore markers
//! - Checkpointing the document for an external store
//! - Tracking a simulated CAD backend that drops out and comes back
//!
//! Run with: RUST_LOG=info cargo run --example editor_session

use async_trait::async_trait;
use groundwork::checkpoint::DesignCheckpoint;
use groundwork::connectivity::{
    AlertSink, BackendError, CadBackend, ConnectivityConfig, ConnectivityManager,
    ConnectivityService, LogSource, StatusReport, StatusSubscription,
};
use groundwork::core::AlertKind;
use groundwork::design::{Conductor, DesignDocument, DesignHistory, Point, Rod};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Backend that is down for the first two checks, then up.
struct FlakyBackend {
    checks: AtomicUsize,
}

#[async_trait]
impl CadBackend for FlakyBackend {
    async fn check_status(&self) -> Result<StatusReport, BackendError> {
        match self.checks.fetch_add(1, Ordering::SeqCst) {
            0 | 1 => Err(BackendError::Unreachable("connection refused".to_string())),
            _ => Ok(StatusReport::new(true, true)),
        }
    }

    async fn list_layers(&self) -> Result<Vec<String>, BackendError> {
        Ok(vec!["0".into(), "GRID".into(), "RODS".into()])
    }

    async fn subscribe_status(&self) -> Result<StatusSubscription, BackendError> {
        Err(BackendError::Stream("no websocket endpoint".to_string()))
    }
}

struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn show(&self, kind: AlertKind, message: &str) {
        println!("  [Alert:{kind:?}] {message}");
    }
}

fn edit_history() {
    println!("Example 1: Undo and redo");

    let mut history = DesignHistory::with_capacity(10);
    let mut doc = DesignDocument::new();

    history.push_snapshot(&doc);
    doc.rods.push(Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016));

    history.push_snapshot(&doc);
    doc.rods.push(Rod::new("R2", Point::new(20.0, 0.0), 3.0, 0.016));
    doc.conductors.push(Conductor::new(
        "C1",
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        0.0107,
    ));
    println!(
        "  rods: {}, conductor length: {:.1} m",
        doc.rods.len(),
        doc.total_conductor_length()
    );

    if let Some(restore) = history.undo(&doc) {
        doc = history.apply_external_change(restore).into_document();
    }
    println!("  after undo: rods: {}", doc.rods.len());

    if let Some(restore) = history.redo(&doc) {
        doc = history.apply_external_change(restore).into_document();
    }
    println!(
        "  after redo: rods: {}, can undo: {}, can redo: {}",
        doc.rods.len(),
        history.can_undo(),
        history.can_redo()
    );

    match DesignCheckpoint::new(&doc).to_binary() {
        Ok(bytes) => println!("  checkpoint: {} bytes", bytes.len()),
        Err(err) => println!("  checkpoint failed: {err}"),
    }
}

async fn watch_backend() {
    println!("\nExample 2: Backend connectivity");

    let backend = Arc::new(FlakyBackend {
        checks: AtomicUsize::new(0),
    });
    let manager = ConnectivityManager::new(backend, Arc::new(ConsoleAlerts));
    manager
        .add_log(LogSource::Grabber, "Waiting for drawing import")
        .await;

    let config = ConnectivityConfig::builder()
        .poll_interval(Duration::from_millis(200))
        .build()
        .unwrap_or_default();
    let service = ConnectivityService::start(manager.clone(), config);

    tokio::time::sleep(Duration::from_millis(700)).await;
    service.stop().await;

    for entry in manager.logs().await {
        println!("  {entry}");
    }
    println!("  layers: {:?}", manager.layers().await);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Editor Session Example ===\n");
    edit_history();
    watch_backend().await;
}
