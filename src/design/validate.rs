//! Structural checks for design documents.
//!
//! Uses Stillwater's `Validation` so a caller sees every broken rule in a
//! document at once instead of fixing them one by one.

use super::document::{DesignDocument, Point};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single broken document invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DocumentViolation {
    #[error("Duplicate {collection} id '{id}'")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },

    #[error("{collection} '{id}' has a non-finite coordinate")]
    NonFiniteCoordinate {
        collection: &'static str,
        id: String,
    },

    #[error("{collection} '{id}' has non-positive {field} ({value})")]
    NonPositive {
        collection: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },
}

type Check = Validation<(), NonEmptyVec<DocumentViolation>>;

fn unique_ids<'a>(collection: &'static str, ids: impl Iterator<Item = &'a str>) -> Vec<Check> {
    let mut seen = HashSet::new();
    ids.filter(|id| !seen.insert(*id))
        .map(|id| {
            Validation::fail(DocumentViolation::DuplicateId {
                collection,
                id: id.to_string(),
            })
        })
        .collect()
}

fn finite(collection: &'static str, id: &str, points: &[Point]) -> Check {
    if points.iter().all(Point::is_finite) {
        Validation::success(())
    } else {
        Validation::fail(DocumentViolation::NonFiniteCoordinate {
            collection,
            id: id.to_string(),
        })
    }
}

fn positive(collection: &'static str, id: &str, field: &'static str, value: f64) -> Check {
    // NaN fails too.
    if value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(DocumentViolation::NonPositive {
            collection,
            id: id.to_string(),
            field,
            value,
        })
    }
}

impl DesignDocument {
    /// Check every document invariant, accumulating ALL violations.
    ///
    /// # Example
    ///
    /// ```rust
    /// use groundwork::design::{DesignDocument, Point, Rod};
    /// use stillwater::validation::Validation;
    ///
    /// let mut rod = Rod::new("R1", Point::new(0.0, 0.0), 3.0, 0.016);
    /// let doc = DesignDocument { rods: vec![rod.clone()], ..DesignDocument::new() };
    /// assert!(matches!(doc.validate(), Validation::Success(_)));
    ///
    /// rod.depth = 0.0;
    /// let broken = DesignDocument { rods: vec![rod.clone(), rod], ..DesignDocument::new() };
    /// match broken.validate() {
    ///     // duplicate id + two zero depths
    ///     Validation::Failure(errors) => assert_eq!(errors.len(), 3),
    ///     Validation::Success(_) => unreachable!(),
    /// }
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DocumentViolation>> {
        let mut checks: Vec<Check> = Vec::new();

        checks.extend(unique_ids("rod", self.rods.iter().map(|r| r.id.as_str())));
        checks.extend(unique_ids(
            "conductor",
            self.conductors.iter().map(|c| c.id.as_str()),
        ));
        checks.extend(unique_ids(
            "placement",
            self.placements.iter().map(|p| p.id.as_str()),
        ));

        for rod in &self.rods {
            checks.push(finite("rod", &rod.id, &[rod.position]));
            checks.push(positive("rod", &rod.id, "depth", rod.depth));
            checks.push(positive("rod", &rod.id, "diameter", rod.diameter));
        }
        for conductor in &self.conductors {
            checks.push(finite(
                "conductor",
                &conductor.id,
                &[conductor.start, conductor.end],
            ));
            checks.push(positive(
                "conductor",
                &conductor.id,
                "diameter",
                conductor.diameter,
            ));
        }
        for placement in &self.placements {
            checks.push(finite("placement", &placement.id, &[placement.position]));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
