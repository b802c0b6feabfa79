//! Link transition history tracking.
//!
//! Provides an immutable trail of state changes over time. Only real
//! changes are recorded; repeated observations of the same value never
//! reach the history.

use super::link::Channel;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use groundwork::core::{Channel, Link, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Link::Unknown,
///     to: Link::Connected,
///     timestamp: Utc::now(),
///     channel: Channel::Poll,
/// };
/// assert_eq!(transition.to, Link::Connected);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was observed
    pub timestamp: DateTime<Utc>,
    /// Which producer delivered the observation that caused it
    pub channel: Channel,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history with the transition appended and
/// leaves the original untouched. Long-lived owners append in place with
/// [`push_bounded`](StateHistory::push_bounded) instead.
///
/// # Example
///
/// ```rust
/// use groundwork::core::{Channel, Link, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Link::Unknown,
///         to: Link::Disconnected,
///         timestamp: Utc::now(),
///         channel: Channel::Poll,
///     })
///     .record(StateTransition {
///         from: Link::Disconnected,
///         to: Link::Connected,
///         timestamp: Utc::now(),
///         channel: Channel::Stream,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Link::Unknown, &Link::Disconnected, &Link::Connected]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place, dropping the oldest ones so at most
    /// `limit` remain.
    ///
    /// A `limit` of zero is treated as one.
    pub fn push_bounded(&mut self, transition: StateTransition<S>, limit: usize) {
        self.transitions.push(transition);
        let excess = self.transitions.len().saturating_sub(limit.max(1));
        if excess > 0 {
            self.transitions.drain(..excess);
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state followed by the `to` state of each
    /// transition, in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all transitions in recording order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
