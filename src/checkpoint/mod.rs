//! Checkpoints of a design document.
//!
//! A checkpoint is the hand-off format between the editor and whatever
//! external store keeps designs. JSON is used where a human may read the
//! payload and bincode where size matters. Undo/redo history is session
//! state and is never checkpointed.

use crate::design::DesignDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable, versioned copy of a design document.
///
/// # Example
///
/// ```rust
/// use groundwork::checkpoint::DesignCheckpoint;
/// use groundwork::design::{DesignDocument, Point, Rod};
///
/// let doc = DesignDocument {
///     rods: vec![Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016)],
///     ..DesignDocument::new()
/// };
/// let json = DesignCheckpoint::new(&doc).to_json().unwrap();
/// let restored = DesignCheckpoint::from_json(&json).unwrap();
/// assert_eq!(restored.document, doc);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub document: DesignDocument,
}

impl DesignCheckpoint {
    pub fn new(document: &DesignDocument) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            document: document.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.verify()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.verify()?;
        Ok(checkpoint)
    }

    /// Check the format version and the document invariants.
    pub fn verify(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        match self.document.validate() {
            Validation::Success(_) => {
                debug!(id = %self.id, "Checkpoint verified");
                Ok(())
            }
            Validation::Failure(errors) => Err(CheckpointError::ValidationFailed(
                errors.iter().map(ToString::to_string).collect(),
            )),
        }
    }
}
