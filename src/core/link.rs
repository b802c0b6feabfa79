//! Backend link states and the pure transition reducer.
//!
//! The stream and poll producers both deliver [`Observation`]s. Folding an
//! observation into the current [`LinkState`] is a pure function returning
//! the next state plus the side effects the shell must perform, so the
//! first-observation and de-duplication rules are testable without I/O.

use super::state::State;
use serde::{Deserialize, Serialize};

pub const MSG_CONNECTED: &str = "CAD backend connected";
pub const MSG_NOT_DETECTED: &str = "CAD backend not detected";
pub const MSG_ESTABLISHED: &str = "CAD backend connection established";
pub const MSG_LOST: &str = "CAD backend connection lost";
pub const ALERT_CONNECTED: &str = "Connected to CAD backend";
pub const ALERT_UNAVAILABLE: &str = "CAD backend is not available";

/// Availability of the CAD backend as last observed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Link {
    /// Nothing observed yet
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl State for Link {
    fn name(&self) -> &str {
        match self {
            Self::Unknown => "Unknown",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}

impl Link {
    fn from_connected(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }
}

/// Producer that delivered an observation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stream,
    Poll,
}

/// One health sample as seen by a producer.
#[derive(Clone, PartialEq, Debug)]
pub enum Health {
    /// The backend answered.
    Reported {
        connected: bool,
        backend_running: bool,
    },
    /// The query rejected (network error, refused, malformed reply).
    Unreachable { reason: String },
}

/// A health sample tagged with the channel it arrived on.
#[derive(Clone, PartialEq, Debug)]
pub struct Observation {
    pub channel: Channel,
    pub health: Health,
}

impl Observation {
    pub fn reported(channel: Channel, connected: bool, backend_running: bool) -> Self {
        Self {
            channel,
            health: Health::Reported {
                connected,
                backend_running,
            },
        }
    }

    pub fn unreachable(channel: Channel, reason: impl Into<String>) -> Self {
        Self {
            channel,
            health: Health::Unreachable {
                reason: reason.into(),
            },
        }
    }

    /// A reachable backend that is not running counts as disconnected.
    pub fn is_now_connected(&self) -> bool {
        match &self.health {
            Health::Reported {
                connected,
                backend_running,
            } => *connected && *backend_running,
            Health::Unreachable { .. } => false,
        }
    }
}

/// Kind of user-facing alert.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

/// Side effect requested by [`reduce`].
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    /// Append a system log line.
    Log(String),
    /// Show a user-facing alert.
    Alert { kind: AlertKind, message: String },
    /// Re-query the layer list. `announce` asks the shell to log the count.
    RefreshLayers { announce: bool },
}

/// Reducer state: last known link value and the alert de-duplication flag.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LinkState {
    pub link: Link,
    /// Set once a failure alert has been shown for the current
    /// disconnection streak; cleared when the link comes back.
    pub alert_suppressed: bool,
}

impl LinkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.link == Link::Connected
    }
}

fn log(message: &str) -> Effect {
    Effect::Log(message.to_string())
}

fn alert(kind: AlertKind, message: &str) -> Effect {
    Effect::Alert {
        kind,
        message: message.to_string(),
    }
}

/// Fold one observation into the link state.
///
/// # Example
///
/// ```rust
/// use groundwork::core::{reduce, Channel, Effect, Link, LinkState, Observation};
///
/// let (state, effects) = reduce(&LinkState::new(), &Observation::reported(Channel::Poll, true, true));
/// assert_eq!(state.link, Link::Connected);
/// assert!(effects.contains(&Effect::RefreshLayers { announce: true }));
///
/// // Same value again: nothing to do.
/// let (_, effects) = reduce(&state, &Observation::reported(Channel::Stream, true, true));
/// assert!(effects.is_empty());
/// ```
pub fn reduce(state: &LinkState, observation: &Observation) -> (LinkState, Vec<Effect>) {
    let next = Link::from_connected(observation.is_now_connected());

    match (state.link, next) {
        (Link::Unknown, Link::Connected) => (
            LinkState {
                link: next,
                alert_suppressed: false,
            },
            vec![log(MSG_CONNECTED), Effect::RefreshLayers { announce: true }],
        ),
        (Link::Unknown, _) => (
            LinkState {
                link: next,
                alert_suppressed: true,
            },
            vec![
                log(MSG_NOT_DETECTED),
                alert(AlertKind::Error, ALERT_UNAVAILABLE),
            ],
        ),
        (previous, next) if previous == next => (*state, Vec::new()),
        (_, Link::Connected) => (
            LinkState {
                link: next,
                alert_suppressed: false,
            },
            vec![
                log(MSG_ESTABLISHED),
                alert(AlertKind::Success, ALERT_CONNECTED),
                Effect::RefreshLayers { announce: false },
            ],
        ),
        (_, _) => {
            let mut effects = vec![log(MSG_LOST)];
            if !state.alert_suppressed {
                effects.push(alert(AlertKind::Error, ALERT_UNAVAILABLE));
            }
            (
                LinkState {
                    link: next,
                    alert_suppressed: true,
                },
                effects,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up(channel: Channel) -> Observation {
        Observation::reported(channel, true, true)
    }

    fn down(channel: Channel) -> Observation {
        Observation::reported(channel, false, false)
    }

    fn alerts(effects: &[Effect]) -> Vec<AlertKind> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Alert { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    fn logs(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Log(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn backend_running_is_required() {
        assert!(Observation::reported(Channel::Poll, true, true).is_now_connected());
        assert!(!Observation::reported(Channel::Poll, true, false).is_now_connected());
        assert!(!Observation::reported(Channel::Poll, false, true).is_now_connected());
        assert!(!Observation::unreachable(Channel::Poll, "refused").is_now_connected());
    }

    #[test]
    fn first_connected_observation_logs_and_refreshes() {
        let (state, effects) = reduce(&LinkState::new(), &up(Channel::Poll));

        assert_eq!(state.link, Link::Connected);
        assert!(!state.alert_suppressed);
        assert_eq!(logs(&effects), vec![MSG_CONNECTED]);
        assert!(alerts(&effects).is_empty());
        assert!(effects.contains(&Effect::RefreshLayers { announce: true }));
    }

    #[test]
    fn first_disconnected_observation_alerts_once() {
        let (state, effects) = reduce(&LinkState::new(), &down(Channel::Poll));

        assert_eq!(state.link, Link::Disconnected);
        assert!(state.alert_suppressed);
        assert_eq!(logs(&effects), vec![MSG_NOT_DETECTED]);
        assert_eq!(alerts(&effects), vec![AlertKind::Error]);
    }

    #[test]
    fn first_observation_never_logs_a_transition() {
        for observation in [up(Channel::Stream), down(Channel::Stream)] {
            let (_, effects) = reduce(&LinkState::new(), &observation);
            let lines = logs(&effects);
            assert!(!lines.contains(&MSG_LOST));
            assert!(!lines.contains(&MSG_ESTABLISHED));
        }
    }

    #[test]
    fn unreachable_first_check_matches_disconnected() {
        let (from_failure, failure_effects) = reduce(
            &LinkState::new(),
            &Observation::unreachable(Channel::Poll, "connection refused"),
        );
        let (from_report, report_effects) = reduce(&LinkState::new(), &down(Channel::Poll));

        assert_eq!(from_failure, from_report);
        assert_eq!(failure_effects, report_effects);
    }

    #[test]
    fn repeated_failures_are_silent() {
        let (state, _) = reduce(
            &LinkState::new(),
            &Observation::unreachable(Channel::Poll, "timeout"),
        );
        let (state, effects) = reduce(&state, &Observation::unreachable(Channel::Poll, "timeout"));

        assert!(effects.is_empty());
        assert!(state.alert_suppressed);
    }

    #[test]
    fn unchanged_connected_value_is_a_no_op() {
        let (state, _) = reduce(&LinkState::new(), &up(Channel::Poll));
        let (next, effects) = reduce(&state, &up(Channel::Stream));

        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn reconnect_logs_established_and_alerts_success() {
        let (state, _) = reduce(&LinkState::new(), &down(Channel::Poll));
        let (state, effects) = reduce(&state, &up(Channel::Stream));

        assert_eq!(state.link, Link::Connected);
        assert!(!state.alert_suppressed);
        assert_eq!(logs(&effects), vec![MSG_ESTABLISHED]);
        assert_eq!(alerts(&effects), vec![AlertKind::Success]);
        assert!(effects.contains(&Effect::RefreshLayers { announce: false }));
    }

    #[test]
    fn disconnect_from_both_channels_alerts_once() {
        let (state, _) = reduce(&LinkState::new(), &up(Channel::Poll));
        let (state, first) = reduce(&state, &down(Channel::Stream));
        let (state, second) = reduce(&state, &down(Channel::Poll));

        assert_eq!(logs(&first), vec![MSG_LOST]);
        assert_eq!(alerts(&first), vec![AlertKind::Error]);
        assert!(second.is_empty());
        assert!(state.alert_suppressed);
    }

    #[test]
    fn three_observation_scenario() {
        let state = LinkState::new();

        let (state, effects) = reduce(&state, &Observation::reported(Channel::Poll, false, false));
        assert_eq!(logs(&effects), vec![MSG_NOT_DETECTED]);
        assert_eq!(alerts(&effects), vec![AlertKind::Error]);

        let (state, effects) = reduce(&state, &Observation::reported(Channel::Poll, true, true));
        assert_eq!(logs(&effects), vec![MSG_ESTABLISHED]);
        assert_eq!(alerts(&effects), vec![AlertKind::Success]);
        assert!(effects.contains(&Effect::RefreshLayers { announce: false }));

        let (state, effects) = reduce(&state, &Observation::reported(Channel::Poll, true, false));
        assert_eq!(logs(&effects), vec![MSG_LOST]);
        assert_eq!(alerts(&effects), vec![AlertKind::Error]);
        assert_eq!(state.link, Link::Disconnected);
    }

    #[test]
    fn link_state_names() {
        assert_eq!(Link::Unknown.name(), "Unknown");
        assert!(Link::Disconnected.is_error());
        assert!(!Link::Connected.is_error());
    }
}
