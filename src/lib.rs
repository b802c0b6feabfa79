//! Groundwork: state core for a grounding-grid design editor
//!
//! Groundwork follows a "pure core, imperative shell" layout. The design
//! history and the backend link reducer are plain functions over plain
//! values; the only code that touches I/O, timers or user alerts lives in
//! [`connectivity`].
//!
//! # Core Concepts
//!
//! - **Design history**: bounded undo/redo over isolated document snapshots
//! - **Link reducer**: pure folding of health observations into logs,
//!   alerts and layer refreshes, with first-observation and de-duplication
//!   rules
//! - **Connectivity service**: push stream plus polling fallback feeding a
//!   single consumer
//! - **Checkpoints**: versioned JSON/binary hand-off of a design document
//!
//! # Example
//!
//! ```rust
//! use groundwork::design::{DesignDocument, DesignHistory, Point, Rod};
//!
//! let mut history = DesignHistory::with_capacity(20);
//! let mut doc = DesignDocument::new();
//!
//! history.push_snapshot(&doc);
//! doc.rods.push(Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016));
//!
//! if let Some(restore) = history.undo(&doc) {
//!     doc = history.apply_external_change(restore).into_document();
//! }
//! assert!(doc.rods.is_empty());
//! assert!(history.can_redo());
//! ```

pub mod checkpoint;
pub mod connectivity;
pub mod core;
pub mod design;

// Re-export commonly used types
pub use connectivity::{ConnectivityConfig, ConnectivityManager, ConnectivityService, LogEntry};
pub use crate::core::{reduce, Link, LinkState, Observation, State, StateHistory, StateTransition};
pub use design::{DesignDocument, DesignHistory, Restore, Snapshot};
