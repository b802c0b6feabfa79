//! Core State trait for link states.
//!
//! Link states are plain values; this trait provides pure methods for
//! inspecting them without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for states tracked by a [`StateHistory`](super::StateHistory).
///
/// All methods are pure. States must be cloneable for history tracking,
/// comparable so unchanged observations can be detected, and serializable
/// so a transition trail can be exported for diagnostics.
///
/// # Example
///
/// ```rust
/// use groundwork::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     Off,
///     On,
///     Blown,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///             Self::Blown => "Blown",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Blown)
///     }
/// }
///
/// assert!(Lamp::Blown.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this state represents a degraded or failed condition.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channel, Link, StateHistory, StateTransition};
    use chrono::Utc;

    fn describe<S: State>(states: &[S]) -> Vec<(String, bool)> {
        states
            .iter()
            .map(|s| (s.name().to_string(), s.is_error()))
            .collect()
    }

    #[test]
    fn link_reports_names_and_errors_through_the_trait() {
        let described = describe(&[Link::Unknown, Link::Connected, Link::Disconnected]);
        assert_eq!(
            described,
            vec![
                ("Unknown".to_string(), false),
                ("Connected".to_string(), false),
                ("Disconnected".to_string(), true),
            ]
        );
    }

    #[test]
    fn link_survives_json() {
        for link in [Link::Unknown, Link::Connected, Link::Disconnected] {
            let json = serde_json::to_string(&link).unwrap();
            let back: Link = serde_json::from_str(&json).unwrap();
            assert_eq!(back, link);
            assert_eq!(back.name(), link.name());
        }
    }

    #[test]
    fn link_trail_survives_json() {
        let trail = StateHistory::new().record(StateTransition {
            from: Link::Connected,
            to: Link::Disconnected,
            timestamp: Utc::now(),
            channel: Channel::Stream,
        });

        let json = serde_json::to_string(&trail).unwrap();
        let back: StateHistory<Link> = serde_json::from_str(&json).unwrap();

        let last = back.last().unwrap();
        assert!(last.to.is_error());
        assert!(!last.from.is_error());
        assert_eq!(last.channel, Channel::Stream);
    }
}
