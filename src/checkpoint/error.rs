//! Checkpoint error types.

use thiserror::Error;

/// Errors from writing or loading a design checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or bincode failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Payload could not be decoded
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Payload was written by an unknown format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The stored document breaks one or more invariants
    #[error("Checkpoint validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
