//! Bounded undo/redo history for a design document.
//!
//! Two stacks of full-document snapshots: `past` (oldest first) and
//! `future` (most recently undone last). The history lives for one editing
//! session and is never persisted.

use super::document::DesignDocument;
use super::snapshot::Snapshot;
use std::collections::VecDeque;
use tracing::debug;

/// Snapshots kept in `past` unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// Which history operation produced a [`Restore`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Origin {
    Undo,
    Redo,
}

/// A snapshot handed out by [`DesignHistory::undo`] or
/// [`DesignHistory::redo`].
///
/// The editor shell passes it back through
/// [`DesignHistory::apply_external_change`] to obtain the document to show.
/// Changes applied that way are never recorded as edits, so applying an
/// undo cannot wipe the redo branch.
#[must_use = "a restore does nothing until it is applied"]
#[derive(Clone, PartialEq, Debug)]
pub struct Restore {
    snapshot: Snapshot,
    origin: Origin,
}

impl Restore {
    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

/// Undo/redo history over design snapshots.
///
/// # Example
///
/// ```rust
/// use groundwork::design::{DesignDocument, DesignHistory, Point, Rod};
///
/// let mut history = DesignHistory::new();
/// let mut doc = DesignDocument::new();
///
/// // Record the state before each user edit.
/// history.push_snapshot(&doc);
/// doc.rods.push(Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016));
///
/// let restore = history.undo(&doc).expect("one edit to undo");
/// doc = history.apply_external_change(restore).into_document();
/// assert!(doc.rods.is_empty());
/// assert!(history.can_redo());
///
/// let restore = history.redo(&doc).expect("one edit to redo");
/// doc = history.apply_external_change(restore).into_document();
/// assert_eq!(doc.rods.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DesignHistory {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    capacity: usize,
}

impl Default for DesignHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history retaining at most `capacity` past snapshots.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            past: VecDeque::with_capacity(capacity),
            future: Vec::new(),
            capacity,
        }
    }

    /// Record `document` as a new history entry.
    ///
    /// Evicts the oldest entry once capacity is exceeded and abandons the
    /// redo branch.
    pub fn push_snapshot(&mut self, document: &DesignDocument) {
        self.push_past(Snapshot::capture(document));
        self.future.clear();
        debug!(undo_depth = self.past.len(), "Recorded design snapshot");
    }

    /// Step back one entry.
    ///
    /// Returns `None` with no side effect when there is nothing to undo.
    /// Otherwise `current` is kept on the redo stack so [`redo`] can bring
    /// it back exactly.
    ///
    /// [`redo`]: DesignHistory::redo
    pub fn undo(&mut self, current: &DesignDocument) -> Option<Restore> {
        let snapshot = self.past.pop_back()?;
        self.future.push(Snapshot::capture(current));
        debug!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "Undo"
        );
        Some(Restore {
            snapshot,
            origin: Origin::Undo,
        })
    }

    /// Step forward one entry. Symmetric to [`undo`](DesignHistory::undo).
    pub fn redo(&mut self, current: &DesignDocument) -> Option<Restore> {
        let snapshot = self.future.pop()?;
        self.push_past(Snapshot::capture(current));
        debug!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "Redo"
        );
        Some(Restore {
            snapshot,
            origin: Origin::Redo,
        })
    }

    /// Accept a restore produced by this history and return the snapshot
    /// the shell should apply. Nothing is recorded.
    pub fn apply_external_change(&self, restore: Restore) -> Snapshot {
        debug!(origin = ?restore.origin, "Applying restored snapshot");
        restore.snapshot
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Past snapshots, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter()
    }

    /// Drop both stacks, e.g. when another design is loaded.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{Point, Rod};

    fn doc_with_rods(n: usize) -> DesignDocument {
        DesignDocument {
            rods: (0..n)
                .map(|i| Rod::new(format!("R{i}"), Point::new(i as f64, 0.0), 3.0, 0.016))
                .collect(),
            ..DesignDocument::new()
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = DesignHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = DesignHistory::with_capacity(0);
        history.push_snapshot(&doc_with_rods(1));
        history.push_snapshot(&doc_with_rods(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn idle_undo_and_redo_are_no_ops() {
        let mut history = DesignHistory::new();
        let doc = doc_with_rods(1);

        assert!(history.undo(&doc).is_none());
        assert_eq!(history.redo_depth(), 0);
        assert!(history.redo(&doc).is_none());
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn undo_past_the_start_leaves_redo_stack_alone() {
        let mut history = DesignHistory::new();
        let a = doc_with_rods(1);
        let b = doc_with_rods(2);

        history.push_snapshot(&a);
        let restore = history.undo(&b).unwrap();
        let current = history.apply_external_change(restore).into_document();
        assert_eq!(history.redo_depth(), 1);

        assert!(history.undo(&current).is_none());
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.undo_depth(), 0);

        let restore = history.redo(&current).unwrap();
        assert!(restore.snapshot().matches(&b));
    }

    #[test]
    fn capacity_two_evicts_oldest() {
        let s1 = doc_with_rods(1);
        let s2 = doc_with_rods(2);
        let s3 = doc_with_rods(3);
        let current = doc_with_rods(4);

        let mut history = DesignHistory::with_capacity(2);
        history.push_snapshot(&s1);
        history.push_snapshot(&s2);
        history.push_snapshot(&s3);

        let past: Vec<_> = history.past().collect();
        assert_eq!(past.len(), 2);
        assert!(past[0].matches(&s2));
        assert!(past[1].matches(&s3));

        let restore = history.undo(&current).unwrap();
        assert!(restore.snapshot().matches(&s3));
        assert_eq!(restore.origin(), Origin::Undo);
        assert_eq!(history.undo_depth(), 1);
        assert!(history.past().next().unwrap().matches(&s2));
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let a = doc_with_rods(1);
        let b = doc_with_rods(2);
        let mut history = DesignHistory::new();

        history.push_snapshot(&a);
        let current = b.clone();

        let restore = history.undo(&current).unwrap();
        let undone = history.apply_external_change(restore);
        assert!(undone.matches(&a));

        let redone = history.redo(&undone.to_document()).unwrap();
        assert_eq!(redone.origin(), Origin::Redo);
        assert!(history.apply_external_change(redone).matches(&b));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn push_clears_redo_stack() {
        let mut history = DesignHistory::new();
        history.push_snapshot(&doc_with_rods(1));
        let _ = history.undo(&doc_with_rods(2));
        assert!(history.can_redo());

        history.push_snapshot(&doc_with_rods(3));
        assert!(!history.can_redo());
    }

    #[test]
    fn applying_a_restore_records_nothing() {
        let mut history = DesignHistory::new();
        history.push_snapshot(&doc_with_rods(1));
        history.push_snapshot(&doc_with_rods(2));

        let restore = history.undo(&doc_with_rods(3)).unwrap();
        let _ = history.apply_external_change(restore);

        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn redo_respects_capacity() {
        let mut history = DesignHistory::with_capacity(1);
        history.push_snapshot(&doc_with_rods(1));
        let _ = history.undo(&doc_with_rods(2));
        let _ = history.redo(&doc_with_rods(1));
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn snapshots_are_isolated_from_live_edits() {
        let mut doc = doc_with_rods(2);
        let mut history = DesignHistory::new();
        history.push_snapshot(&doc);

        doc.rods[0].position = Point::new(42.0, 42.0);
        doc.rods.pop();

        let restored = history.undo(&doc).unwrap();
        assert_eq!(restored.snapshot().rods().len(), 2);
        assert_eq!(restored.snapshot().rods()[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn clear_drops_both_stacks() {
        let mut history = DesignHistory::new();
        history.push_snapshot(&doc_with_rods(1));
        history.push_snapshot(&doc_with_rods(2));
        let _ = history.undo(&doc_with_rods(3));

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
