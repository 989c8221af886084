//! Collision and bounds validation.
//!
//! Every module is approximated as a circle on the horizontal plane, so two
//! modules collide when their centers are closer than
//! `(length + width) / 2 + margin`. Rotation is not taken into account and
//! elevation is ignored.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use gantry_core::{
    geometry::{Bounds, Footprint, Position},
    placement::ModulePlacement,
};

/// Safety margin added to the clearance radius, in meters.
pub const DEFAULT_MARGIN: f64 = 0.5;

/// Why a candidate position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The position lies outside the site bounds.
    OutOfBounds,
    /// The position is too close to an existing module.
    Collision,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::OutOfBounds => write!(f, "out of bounds"),
            InvalidReason::Collision => write!(f, "collision"),
        }
    }
}

/// Outcome of [`CollisionChecker::validate_placement`].
///
/// Serializes as `{"valid": true}` or
/// `{"valid": false, "reason": "out of bounds"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(InvalidReason),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Returns the rejection reason, if any.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(reason) => Some(*reason),
        }
    }
}

impl Serialize for Validation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reason = self.reason();
        let mut state =
            serializer.serialize_struct("Validation", if reason.is_some() { 2 } else { 1 })?;
        state.serialize_field("valid", &self.is_valid())?;
        if let Some(reason) = reason {
            state.serialize_field("reason", &reason.to_string())?;
        } else {
            state.skip_field("reason")?;
        }
        state.end()
    }
}

/// Checks candidate positions against a roster of placed modules.
///
/// # Examples
///
/// ```
/// # use gantry::collision::{CollisionChecker, InvalidReason, Validation};
/// # use gantry_core::{geometry::{Bounds, Position}, identifier::ModuleKind, placement::ModulePlacement};
/// let checker = CollisionChecker::default();
/// let existing = [ModulePlacement::new("a", ModuleKind::default(), Position::default())];
///
/// assert!(checker.detect_collisions(Position::new(5.0, 0.0, 0.0), &existing));
/// assert!(!checker.detect_collisions(Position::new(8.0, 0.0, 0.0), &existing));
///
/// let site = Bounds::new(Position::new(-10.0, 0.0, -10.0), Position::new(10.0, 0.0, 10.0));
/// assert_eq!(
///     checker.validate_placement(Position::new(12.0, 0.0, 0.0), &existing, Some(&site)),
///     Validation::Invalid(InvalidReason::OutOfBounds),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionChecker {
    footprint: Footprint,
    margin: f64,
}

impl Default for CollisionChecker {
    fn default() -> Self {
        Self::new(Footprint::default())
    }
}

impl CollisionChecker {
    /// Creates a checker for modules of the given footprint with the default
    /// margin.
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Minimum center-to-center distance between two modules.
    pub fn threshold(&self) -> f64 {
        self.footprint.clearance(self.margin)
    }

    /// Returns `true` when `candidate` is closer than [`threshold`](Self::threshold)
    /// to any existing module.
    pub fn detect_collisions(&self, candidate: Position, existing: &[ModulePlacement]) -> bool {
        let threshold = self.threshold();
        existing
            .iter()
            .any(|module| candidate.horizontal_distance(module.position()) < threshold)
    }

    /// Validates a candidate against the site bounds and the roster.
    ///
    /// Bounds are checked first, so a position that is both out of bounds
    /// and colliding reports [`InvalidReason::OutOfBounds`].
    pub fn validate_placement(
        &self,
        candidate: Position,
        existing: &[ModulePlacement],
        bounds: Option<&Bounds>,
    ) -> Validation {
        if bounds.is_some_and(|bounds| !bounds.contains(candidate)) {
            return Validation::Invalid(InvalidReason::OutOfBounds);
        }
        if self.detect_collisions(candidate, existing) {
            return Validation::Invalid(InvalidReason::Collision);
        }
        Validation::Valid
    }
}

/// Shorthand for [`CollisionChecker::detect_collisions`] with the default
/// margin.
pub fn detect_collisions(
    candidate: Position,
    existing: &[ModulePlacement],
    footprint: Footprint,
) -> bool {
    CollisionChecker::new(footprint).detect_collisions(candidate, existing)
}

/// Shorthand for [`CollisionChecker::validate_placement`] with the default
/// footprint and margin.
pub fn validate_placement(
    candidate: Position,
    existing: &[ModulePlacement],
    bounds: Option<&Bounds>,
) -> Validation {
    CollisionChecker::default().validate_placement(candidate, existing, bounds)
}


#[cfg(test)]
mod proptest_tests {
    use gantry_core::identifier::ModuleKind;
    use proptest::prelude::*;

    use super::*;

    fn position_strategy() -> impl Strategy<Value = Position> {
        (-50.0f64..50.0, -5.0f64..5.0, -50.0f64..50.0)
            .prop_map(|(x, y, z)| Position::new(x, y, z))
    }

    fn footprint_strategy() -> impl Strategy<Value = Footprint> {
        (0.5f64..20.0, 0.5f64..5.0, 0.5f64..5.0)
            .prop_map(|(length, width, height)| Footprint::new(length, width, height))
    }

    /// A collides with B exactly when B collides with A.
    fn check_symmetry(a: Position, b: Position, footprint: Footprint) -> Result<(), TestCaseError> {
        let at_a = [ModulePlacement::new("a", ModuleKind::default(), a)];
        let at_b = [ModulePlacement::new("b", ModuleKind::default(), b)];

        prop_assert_eq!(
            detect_collisions(b, &at_a, footprint),
            detect_collisions(a, &at_b, footprint)
        );
        Ok(())
    }

    /// A valid placement never collides.
    fn check_valid_implies_clear(
        candidate: Position,
        others: Vec<Position>,
    ) -> Result<(), TestCaseError> {
        let existing: Vec<_> = others
            .into_iter()
            .enumerate()
            .map(|(i, p)| ModulePlacement::new(format!("m{i}"), ModuleKind::default(), p))
            .collect();

        if validate_placement(candidate, &existing, None).is_valid() {
            prop_assert!(!detect_collisions(candidate, &existing, Footprint::HD5));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            a in position_strategy(),
            b in position_strategy(),
            footprint in footprint_strategy(),
        ) {
            check_symmetry(a, b, footprint)?;
        }

        #[test]
        fn valid_implies_clear(
            candidate in position_strategy(),
            others in prop::collection::vec(position_strategy(), 0..8),
        ) {
            check_valid_implies_clear(candidate, others)?;
        }
    }
}
