//! Grid design document and its undo/redo history.
//!
//! - `DesignDocument` and its entities (rods, conductors, placements)
//! - `Snapshot`: isolated copies of a document
//! - `DesignHistory`: bounded past/future stacks with restore markers
//! - `validate`: accumulated structural checks via Stillwater `Validation`
//!
//! Everything here is synchronous and owned by a single editor.

mod document;
mod history;
mod snapshot;
mod validate;

pub use document::{Conductor, DesignDocument, Placement, PlacementKind, Point, Rod};
pub use history::{DesignHistory, Origin, Restore, DEFAULT_CAPACITY};
pub use snapshot::Snapshot;
pub use validate::DocumentViolation;
