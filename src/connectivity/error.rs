//! Connectivity error types.

use thiserror::Error;

/// Failures reported by a [`CadBackend`](super::CadBackend).
///
/// None of these escape the connectivity layer; they are folded into
/// disconnected observations or empty layer lists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// The backend could not be reached at all
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with an error
    #[error("Backend rejected request: {0}")]
    Rejected(String),

    /// The status stream could not be opened or broke
    #[error("Status stream failed: {0}")]
    Stream(String),

    /// The reply could not be decoded
    #[error("Malformed backend reply: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Errors from loading a [`ConnectivityConfig`](super::ConnectivityConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
