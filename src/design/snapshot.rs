//! Immutable design snapshots.

use super::document::{Conductor, DesignDocument, Placement, Rod};
use serde::{Deserialize, Serialize};

/// Independently owned copy of a document at one point in time.
///
/// Every entity is cloned element-wise on capture, so editing the live
/// document afterwards can never reach a stored snapshot. There are no
/// mutating accessors.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    rods: Vec<Rod>,
    conductors: Vec<Conductor>,
    placements: Vec<Placement>,
}

impl Snapshot {
    /// Capture the current state of `document`.
    pub fn capture(document: &DesignDocument) -> Self {
        Self::from_parts(&document.rods, &document.conductors, &document.placements)
    }

    /// Capture from the three collections directly.
    pub fn from_parts(rods: &[Rod], conductors: &[Conductor], placements: &[Placement]) -> Self {
        Self {
            rods: rods.to_vec(),
            conductors: conductors.to_vec(),
            placements: placements.to_vec(),
        }
    }

    pub fn rods(&self) -> &[Rod] {
        &self.rods
    }

    pub fn conductors(&self) -> &[Conductor] {
        &self.conductors
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Clone out a live document to apply.
    pub fn to_document(&self) -> DesignDocument {
        self.clone().into_document()
    }

    pub fn into_document(self) -> DesignDocument {
        DesignDocument {
            rods: self.rods,
            conductors: self.conductors,
            placements: self.placements,
        }
    }

    /// True when this snapshot holds exactly the contents of `document`.
    pub fn matches(&self, document: &DesignDocument) -> bool {
        self.rods == document.rods
            && self.conductors == document.conductors
            && self.placements == document.placements
    }
}

impl From<&DesignDocument> for Snapshot {
    fn from(document: &DesignDocument) -> Self {
        Self::capture(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{PlacementKind, Point};

    fn document() -> DesignDocument {
        DesignDocument {
            rods: vec![Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016)],
            conductors: vec![Conductor::new(
                "C1",
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                0.01,
            )],
            placements: vec![Placement::new(PlacementKind::Cross, Point::new(0.0, 0.0))],
        }
    }

    #[test]
    fn capture_copies_all_collections() {
        let doc = document();
        let snapshot = Snapshot::capture(&doc);

        assert_eq!(snapshot.rods(), doc.rods.as_slice());
        assert_eq!(snapshot.conductors(), doc.conductors.as_slice());
        assert_eq!(snapshot.placements(), doc.placements.as_slice());
        assert!(snapshot.matches(&doc));
    }

    #[test]
    fn live_edits_do_not_reach_snapshot() {
        let mut doc = document();
        let snapshot = Snapshot::capture(&doc);

        doc.rods[0].position = Point::new(9.0, 9.0);
        doc.rods[0].label = "moved".to_string();
        doc.conductors.clear();
        doc.placements.push(Placement::new(PlacementKind::Tee, Point::new(1.0, 1.0)));

        assert_eq!(snapshot.rods()[0].position, Point::new(0.0, 0.0));
        assert_eq!(snapshot.rods()[0].label, "R1");
        assert_eq!(snapshot.conductors().len(), 1);
        assert_eq!(snapshot.placements().len(), 1);
        assert!(!snapshot.matches(&doc));
    }

    #[test]
    fn into_document_round_trips() {
        let doc = document();
        assert_eq!(Snapshot::from(&doc).into_document(), doc);
        assert_eq!(Snapshot::capture(&doc).to_document(), doc);
    }
}
