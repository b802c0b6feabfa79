//! Grounding-grid design document.
//!
//! The live document is owned by the editor shell. This crate only reads
//! and clones it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Plan-view coordinate in metres.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Vertical ground rod.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Rod {
    pub id: String,
    pub label: String,
    pub position: Point,
    pub depth: f64,
    pub diameter: f64,
}

impl Rod {
    pub fn new(label: impl Into<String>, position: Point, depth: f64, diameter: f64) -> Self {
        Self {
            id: fresh_id(),
            label: label.into(),
            position,
            depth,
            diameter,
        }
    }
}

/// Horizontal buried conductor between two points.
///
/// `length` is derived from the endpoints; keep it in sync by moving
/// endpoints through [`Conductor::set_endpoints`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Conductor {
    pub id: String,
    pub label: String,
    pub start: Point,
    pub end: Point,
    pub diameter: f64,
    pub length: f64,
}

impl Conductor {
    pub fn new(label: impl Into<String>, start: Point, end: Point, diameter: f64) -> Self {
        Self {
            id: fresh_id(),
            label: label.into(),
            start,
            end,
            diameter,
            length: start.distance_to(&end),
        }
    }

    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.length = start.distance_to(&end);
    }
}

/// Junction classification produced by the layout routine.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    Segment,
    Tee,
    Cross,
}

/// Derived junction marker.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub kind: PlacementKind,
    pub position: Point,
}

impl Placement {
    pub fn new(kind: PlacementKind, position: Point) -> Self {
        Self {
            id: fresh_id(),
            kind,
            position,
        }
    }
}

/// Full design state: rods, conductors and derived placements.
///
/// Collection order is preserved for deterministic re-rendering.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DesignDocument {
    pub rods: Vec<Rod>,
    pub conductors: Vec<Conductor>,
    pub placements: Vec<Placement>,
}

impl DesignDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rods.is_empty() && self.conductors.is_empty() && self.placements.is_empty()
    }

    /// Sum of all conductor lengths.
    pub fn total_conductor_length(&self) -> f64 {
        self.conductors.iter().map(|c| c.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conductor_length_is_derived_from_endpoints() {
        let conductor = Conductor::new("C1", Point::new(0.0, 0.0), Point::new(3.0, 4.0), 0.01);
        assert_eq!(conductor.length, 5.0);
    }

    #[test]
    fn set_endpoints_recomputes_length() {
        let mut conductor = Conductor::new("C1", Point::new(0.0, 0.0), Point::new(3.0, 4.0), 0.01);
        conductor.set_endpoints(Point::new(1.0, 1.0), Point::new(1.0, 11.0));
        assert_eq!(conductor.length, 10.0);
    }

    #[test]
    fn constructors_allocate_distinct_ids() {
        let a = Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016);
        let b = Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn total_conductor_length_sums_all_conductors() {
        let doc = DesignDocument {
            conductors: vec![
                Conductor::new("C1", Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.01),
                Conductor::new("C2", Point::new(0.0, 0.0), Point::new(0.0, 5.0), 0.01),
            ],
            ..DesignDocument::new()
        };
        assert_eq!(doc.total_conductor_length(), 15.0);
        assert!(!doc.is_empty());
        assert!(DesignDocument::new().is_empty());
    }

    #[test]
    fn document_serializes_correctly() {
        let doc = DesignDocument {
            rods: vec![Rod::new("R1", Point::new(1.0, 2.0), 3.0, 0.016)],
            conductors: vec![],
            placements: vec![Placement::new(PlacementKind::Tee, Point::new(1.0, 2.0))],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"tee\""));
        let back: DesignDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
