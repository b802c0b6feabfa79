//! Pure core of the connectivity state machine.
//!
//! This module contains the side-effect free pieces:
//! - Link states via the `State` trait
//! - The observation reducer that decides logs, alerts and layer refreshes
//! - Immutable history of link transitions
//!
//! Anything that touches the backend, timers or the alert sink lives in
//! [`crate::connectivity`].

mod history;
mod link;
mod state;

pub use history::{StateHistory, StateTransition};
pub use link::{
    reduce, AlertKind, Channel, Effect, Health, Link, LinkState, Observation, ALERT_CONNECTED,
    ALERT_UNAVAILABLE, MSG_CONNECTED, MSG_ESTABLISHED, MSG_LOST, MSG_NOT_DETECTED,
};
pub use state::State;
