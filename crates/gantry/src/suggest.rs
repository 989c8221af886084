//! Placement suggestions, space utilization and safety auditing.
//!
//! The [`SuggestionService`] proposes positions for new modules that extend
//! an existing site without breaking its clearance rules. Two strategies
//! feed it:
//!
//! 1. **Grid fill** walks a regular grid over the whole site and offers
//!    every free cell.
//! 2. **Adjacency** offers the four cardinal neighbors of each existing
//!    module, used only when grid fill came up short.
//!
//! Every candidate must also pass
//! [`CollisionChecker::validate_placement`] against the existing modules and
//! the site bounds, and must not crowd a suggestion that was already
//! accepted.

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use gantry_core::{
    geometry::{Bounds, Footprint, Position},
    placement::{ModulePlacement, PlacementSuggestion, SuggestionReason},
};

use crate::collision::CollisionChecker;

/// Confidence of a grid-fill suggestion.
pub const GRID_CONFIDENCE: f64 = 0.9;
/// Confidence of an adjacency suggestion.
pub const ADJACENT_CONFIDENCE: f64 = 0.7;
/// Edge of the square site assumed when no bounds are given, in meters.
pub const DEFAULT_SITE_EXTENT: f64 = 200.0;
/// Suggestions returned by [`SuggestionService::suggest_placements`] when a
/// caller has no preference.
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;
/// Suggestions attached to a [`SpaceReport`].
pub const DEFAULT_OPTIMIZE_COUNT: usize = 10;
/// Fraction of the spacing under which a cell counts as occupied.
pub const OCCUPANCY_FACTOR: f64 = 0.8;

/// Site utilization together with suggestions for filling it further.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceReport {
    efficiency: f64,
    suggestions: Vec<PlacementSuggestion>,
}

impl SpaceReport {
    /// Percentage of the site area covered by module footprints.
    ///
    /// May exceed 100 when modules overlap or lie outside the site.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn suggestions(&self) -> &[PlacementSuggestion] {
        &self.suggestions
    }
}

/// Two modules closer than the minimum safety spacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyViolation {
    first: String,
    second: String,
    distance: f64,
    min_spacing: f64,
}

impl SafetyViolation {
    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Measured horizontal distance between the two modules.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn min_spacing(&self) -> f64 {
        self.min_spacing
    }
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "modules {} and {} too close ({:.2}m < {}m)",
            self.first, self.second, self.distance, self.min_spacing
        )
    }
}

/// Outcome of [`SuggestionService::check_safety_rules`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyReport {
    valid: bool,
    violations: Vec<SafetyViolation>,
}

impl SafetyReport {
    /// `true` when no pair of modules is too close.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn violations(&self) -> &[SafetyViolation] {
        &self.violations
    }
}

/// Suggests placements and audits existing sites.
///
/// Grid cells and adjacency offsets are both `width + 2` apart, while
/// validation rejects anything closer than the checker's clearance radius.
/// With the default HD5 footprint that is 4.438 m against 7.817 m, so
/// adjacency candidates are always rejected and grid suggestions only come
/// from cells well away from existing modules. Adjacency only contributes
/// for footprints whose clearance is below their spacing.
///
/// # Examples
///
/// ```
/// # use gantry::suggest::SuggestionService;
/// # use gantry_core::{geometry::{Bounds, Position}, placement::SuggestionReason};
/// let service = SuggestionService::default();
/// let site = Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(50.0, 0.0, 50.0));
///
/// let suggestions = service.suggest_placements(&[], Some(&site), 3);
/// assert_eq!(suggestions.len(), 3);
/// assert!(suggestions.iter().all(|s| s.reason() == SuggestionReason::Grid));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionService {
    checker: CollisionChecker,
    site_extent: f64,
    optimize_count: usize,
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::new(CollisionChecker::default())
    }
}

impl SuggestionService {
    /// Creates a service whose candidates are validated with `checker`.
    pub fn new(checker: CollisionChecker) -> Self {
        Self {
            checker,
            site_extent: DEFAULT_SITE_EXTENT,
            optimize_count: DEFAULT_OPTIMIZE_COUNT,
        }
    }

    /// Sets the edge of the square site assumed when no bounds are given.
    pub fn with_site_extent(mut self, site_extent: f64) -> Self {
        self.site_extent = site_extent;
        self
    }

    /// Sets how many suggestions [`optimize_space`](Self::optimize_space)
    /// returns.
    pub fn with_optimize_count(mut self, optimize_count: usize) -> Self {
        self.optimize_count = optimize_count;
        self
    }

    pub fn footprint(&self) -> Footprint {
        self.checker.footprint()
    }

    /// Grid step of both strategies: one module width plus two meters.
    pub fn spacing(&self) -> f64 {
        self.footprint().width() + 2.0
    }

    /// Minimum distance between any two modules in a safety audit.
    pub fn safety_spacing(&self) -> f64 {
        self.footprint().width() + 1.0
    }

    fn occupancy_threshold(&self) -> f64 {
        OCCUPANCY_FACTOR * self.spacing()
    }

    /// Returns up to `count` suggestions, best first.
    ///
    /// Grid-fill suggestions rank above adjacency suggestions; within a
    /// strategy the generation order is kept.
    pub fn suggest_placements(
        &self,
        existing: &[ModulePlacement],
        bounds: Option<&Bounds>,
        count: usize,
    ) -> Vec<PlacementSuggestion> {
        let mut accepted = Accepted::new(self, existing, bounds, count);

        self.fill_grid(&mut accepted, existing, bounds);
        let from_grid = accepted.suggestions.len();

        if !accepted.is_full() && !existing.is_empty() {
            self.fill_adjacent(&mut accepted, existing);
        }

        let mut suggestions = accepted.suggestions;
        suggestions.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
        suggestions.truncate(count);

        debug!(
            existing = existing.len(),
            grid = from_grid,
            adjacent = suggestions.len() - from_grid.min(suggestions.len()),
            requested = count;
            "Placement suggestions computed"
        );
        trace!(suggestions:?; "Suggested placements");

        suggestions
    }

    /// Reports site utilization and up to the configured number of
    /// suggestions.
    ///
    /// Without bounds the site is a square of the configured extent
    /// (40 000 m² by default). A site with no usable area reports an
    /// efficiency of 0.
    pub fn optimize_space(&self, existing: &[ModulePlacement], bounds: Option<&Bounds>) -> SpaceReport {
        let site_area = bounds.map_or(self.site_extent * self.site_extent, |bounds| bounds.area());
        let used_area = existing.len() as f64 * self.footprint().area();
        let efficiency = if site_area.is_finite() && site_area > 0.0 {
            used_area / site_area * 100.0
        } else {
            0.0
        };

        SpaceReport {
            efficiency,
            suggestions: self.suggest_placements(existing, bounds, self.optimize_count),
        }
    }

    /// Checks every pair of modules against the safety spacing.
    ///
    /// Each pair closer than [`safety_spacing`](Self::safety_spacing)
    /// produces one violation, in roster order.
    pub fn check_safety_rules(&self, existing: &[ModulePlacement]) -> SafetyReport {
        let min_spacing = self.safety_spacing();
        let mut violations = Vec::new();

        for (i, a) in existing.iter().enumerate() {
            for b in &existing[i + 1..] {
                let distance = a.position().horizontal_distance(b.position());
                if distance < min_spacing {
                    violations.push(SafetyViolation {
                        first: a.id().to_string(),
                        second: b.id().to_string(),
                        distance,
                        min_spacing,
                    });
                }
            }
        }

        debug!(modules = existing.len(), violations = violations.len(); "Safety rules checked");

        SafetyReport {
            valid: violations.is_empty(),
            violations,
        }
    }

    fn fill_grid(&self, accepted: &mut Accepted<'_>, existing: &[ModulePlacement], bounds: Option<&Bounds>) {
        let spacing = self.spacing();
        let site = bounds.copied().unwrap_or_else(|| Bounds::centered_square(self.site_extent));
        let columns = grid_cells(site.width(), spacing);
        let rows = grid_cells(site.depth(), spacing);

        if columns.saturating_mul(rows) <= existing.len() as u64 {
            trace!(columns, rows; "Site grid already full, skipping grid fill");
            return;
        }

        let (start_x, start_z) = match bounds {
            Some(bounds) => (bounds.min().x() + spacing, bounds.min().z() + spacing),
            None => (-site.width() / 2.0, -site.depth() / 2.0),
        };

        'rows: for row in 0..rows {
            for col in 0..columns {
                if accepted.is_full() {
                    break 'rows;
                }
                let position = Position::new(
                    start_x + col as f64 * spacing,
                    0.0,
                    start_z + row as f64 * spacing,
                );
                accepted.offer(position, GRID_CONFIDENCE, SuggestionReason::Grid);
            }
        }
    }

    fn fill_adjacent(&self, accepted: &mut Accepted<'_>, existing: &[ModulePlacement]) {
        let spacing = self.spacing();
        let offsets = [
            Position::new(0.0, 0.0, spacing),
            Position::new(0.0, 0.0, -spacing),
            Position::new(spacing, 0.0, 0.0),
            Position::new(-spacing, 0.0, 0.0),
        ];

        for module in existing {
            for offset in offsets {
                if accepted.is_full() {
                    return;
                }
                let position = module.position().add_position(offset);
                accepted.offer(position, ADJACENT_CONFIDENCE, SuggestionReason::Adjacent);
            }
        }
    }
}

/// Number of whole grid steps that fit in `extent`.
fn grid_cells(extent: f64, spacing: f64) -> u64 {
    let cells = (extent / spacing).floor();
    if cells.is_finite() && cells > 0.0 {
        // Saturates for absurdly large sites.
        cells as u64
    } else {
        0
    }
}

/// Suggestions accepted so far, with the rules a new one must pass.
struct Accepted<'a> {
    service: &'a SuggestionService,
    existing: &'a [ModulePlacement],
    bounds: Option<&'a Bounds>,
    limit: usize,
    suggestions: Vec<PlacementSuggestion>,
}

impl<'a> Accepted<'a> {
    fn new(
        service: &'a SuggestionService,
        existing: &'a [ModulePlacement],
        bounds: Option<&'a Bounds>,
        limit: usize,
    ) -> Self {
        Self {
            service,
            existing,
            bounds,
            limit,
            suggestions: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.suggestions.len() >= self.limit
    }

    fn offer(&mut self, position: Position, confidence: f64, reason: SuggestionReason) {
        let threshold = self.service.occupancy_threshold();
        let crowded = |other: Position| position.horizontal_distance(other) < threshold;

        if self.existing.iter().any(|module| crowded(module.position())) {
            return;
        }
        if self.suggestions.iter().any(|s| crowded(s.position())) {
            return;
        }
        if !self
            .service
            .checker
            .validate_placement(position, self.existing, self.bounds)
            .is_valid()
        {
            return;
        }

        self.suggestions
            .push(PlacementSuggestion::new(position, confidence, reason));
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use gantry_core::identifier::ModuleKind;

    use super::*;

    fn module(id: &str, x: f64, z: f64) -> ModulePlacement {
        ModulePlacement::new(id, ModuleKind::default(), Position::new(x, 0.0, z))
    }

    fn bounds(width: f64, depth: f64) -> Bounds {
        Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(width, 0.0, depth))
    }

    #[test]
    fn test_grid_fill_on_empty_site() {
        let service = SuggestionService::default();
        let site = bounds(100.0, 60.0);
        let suggestions = service.suggest_placements(&[], Some(&site), 5);

        assert_eq!(suggestions.len(), 5);
        let first = suggestions[0];
        assert!(approx_eq!(f64, first.position().x(), service.spacing()));
        assert!(approx_eq!(f64, first.position().z(), service.spacing()));
        assert_eq!(first.position().y(), 0.0);
        assert_eq!(first.confidence(), GRID_CONFIDENCE);
        assert_eq!(first.reason().to_string(), "optimal grid placement");
        // Consecutive cells walk along X.
        assert!(approx_eq!(
            f64,
            suggestions[1].position().x() - first.position().x(),
            service.spacing(),
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_grid_fill_without_bounds_starts_at_corner() {
        let service = SuggestionService::default();
        let suggestions = service.suggest_placements(&[], None, 1);

        assert_eq!(suggestions[0].position(), Position::new(-100.0, 0.0, -100.0));
    }

    #[test]
    fn test_suggestions_avoid_existing_modules() {
        let service = SuggestionService::default();
        let site = bounds(100.0, 60.0);
        let existing = [module("a", 10.0, 10.0), module("b", 40.0, 20.0)];
        let checker = CollisionChecker::default();

        let suggestions = service.suggest_placements(&existing, Some(&site), 20);
        assert!(!suggestions.is_empty());
        for suggestion in &suggestions {
            assert!(
                checker
                    .validate_placement(suggestion.position(), &existing, Some(&site))
                    .is_valid()
            );
        }
    }

    #[test]
    fn test_suggestions_do_not_crowd_each_other() {
        let service = SuggestionService::default();
        let site = bounds(100.0, 60.0);
        let suggestions = service.suggest_placements(&[], Some(&site), 30);

        for (i, a) in suggestions.iter().enumerate() {
            for b in &suggestions[i + 1..] {
                assert!(
                    a.position().horizontal_distance(b.position())
                        >= OCCUPANCY_FACTOR * service.spacing()
                );
            }
        }
    }

    #[test]
    fn test_full_site_falls_back_to_adjacency() {
        // A site too small for even one grid cell.
        let service = SuggestionService::default();
        let site = bounds(4.0, 4.0);
        let existing = [module("a", 2.0, 2.0)];

        let suggestions = service.suggest_placements(&existing, Some(&site), 5);
        // Every cardinal neighbor is out of bounds.
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_default_footprint_rejects_adjacency() {
        let service = SuggestionService::default();
        assert!(service.spacing() < CollisionChecker::default().threshold());

        // No grid row fits in the strip, and every neighbor collides.
        let strip = Bounds::new(Position::new(-10.0, 0.0, -1.0), Position::new(10.0, 0.0, 1.0));
        let existing = [module("a", 0.0, 0.0)];
        assert!(service.suggest_placements(&existing, Some(&strip), 5).is_empty());
    }

    #[test]
    fn test_adjacency_with_small_footprint() {
        // With a compact module the adjacency offsets clear the collision radius.
        let checker = CollisionChecker::new(Footprint::new(1.0, 4.0, 1.0)).with_margin(0.0);
        let service = SuggestionService::new(checker);
        // spacing = 6.0, collision threshold = 2.5; one grid cell, already taken
        let site = Bounds::new(Position::new(-5.0, 0.0, -5.0), Position::new(5.0, 0.0, 5.0));
        let existing = [module("a", 0.0, 0.0)];

        let suggestions = service.suggest_placements(&existing, Some(&site), 5);
        assert!(suggestions.is_empty());

        // A narrow strip: no grid row fits, so only adjacency contributes and
        // the north and south neighbors fall outside.
        let strip = Bounds::new(Position::new(-6.0, 0.0, -1.0), Position::new(6.0, 0.0, 1.0));
        let suggestions = service.suggest_placements(&existing, Some(&strip), 5);
        let positions: Vec<_> = suggestions.iter().map(|s| s.position()).collect();
        assert_eq!(
            positions,
            [Position::new(6.0, 0.0, 0.0), Position::new(-6.0, 0.0, 0.0)]
        );
        assert!(suggestions.iter().all(|s| s.confidence() == ADJACENT_CONFIDENCE));
        assert_eq!(suggestions[0].reason().to_string(), "optimal adjacent placement");
    }

    #[test]
    fn test_grid_suggestions_rank_first() {
        let checker = CollisionChecker::new(Footprint::new(1.0, 4.0, 1.0)).with_margin(0.0);
        let service = SuggestionService::new(checker);
        // Grid cells at (6, 6) and (12, 6) etc; one module far from the grid start.
        let site = Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(12.0, 0.0, 12.0));
        let existing = [module("a", 12.0, 0.0)];

        let suggestions = service.suggest_placements(&existing, Some(&site), 10);
        assert!(suggestions.len() >= 2);
        assert_eq!(suggestions[0].reason(), SuggestionReason::Grid);
        let mut seen_adjacent = false;
        for suggestion in &suggestions {
            match suggestion.reason() {
                SuggestionReason::Grid => assert!(!seen_adjacent),
                SuggestionReason::Adjacent => seen_adjacent = true,
            }
        }
    }

    #[test]
    fn test_count_limits_output() {
        let service = SuggestionService::default();
        assert!(service.suggest_placements(&[], None, 0).is_empty());
        assert_eq!(service.suggest_placements(&[], None, 7).len(), 7);
    }

    #[test]
    fn test_optimize_space_efficiency() {
        let service = SuggestionService::default();
        let existing = [module("a", 0.0, 0.0), module("b", 50.0, 50.0)];

        let report = service.optimize_space(&existing, None);
        let expected = 2.0 * 12.196 * 2.438 / 40_000.0 * 100.0;
        assert!(approx_eq!(f64, report.efficiency(), expected, epsilon = 1e-9));
        assert_eq!(report.suggestions().len(), DEFAULT_OPTIMIZE_COUNT);

        let site = bounds(100.0, 50.0);
        let report = service.optimize_space(&existing, Some(&site));
        assert!(approx_eq!(
            f64,
            report.efficiency(),
            2.0 * 12.196 * 2.438 / 5_000.0 * 100.0,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_optimize_space_degenerate_site() {
        let service = SuggestionService::default();
        let flat = Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(10.0, 0.0, 0.0));

        let report = service.optimize_space(&[module("a", 0.0, 0.0)], Some(&flat));
        assert_eq!(report.efficiency(), 0.0);
    }

    #[test]
    fn test_optimize_count_is_configurable() {
        let service = SuggestionService::default().with_optimize_count(3);
        assert_eq!(service.optimize_space(&[], None).suggestions().len(), 3);
    }

    #[test]
    fn test_safety_rules_clean_site() {
        let service = SuggestionService::default();
        let existing = [module("a", 0.0, 0.0), module("b", 10.0, 0.0), module("c", 0.0, 10.0)];

        let report = service.check_safety_rules(&existing);
        assert!(report.is_valid());
        assert!(report.violations().is_empty());
    }

    #[test]
    fn test_safety_rules_close_pair() {
        let service = SuggestionService::default();
        let existing = [module("a", 0.0, 0.0), module("b", 1.0, 0.0)];

        let report = service.check_safety_rules(&existing);
        assert!(!report.is_valid());
        assert_eq!(report.violations().len(), 1);

        let violation = &report.violations()[0];
        assert_eq!(violation.first(), "a");
        assert_eq!(violation.second(), "b");
        assert_eq!(violation.distance(), 1.0);
        assert_eq!(violation.to_string(), "modules a and b too close (1.00m < 3.438m)");
    }

    #[test]
    fn test_safety_rules_every_pair_reported() {
        let service = SuggestionService::default();
        let existing = [module("a", 0.0, 0.0), module("b", 1.0, 0.0), module("c", 0.0, 1.0)];

        let report = service.check_safety_rules(&existing);
        let pairs: Vec<_> = report
            .violations()
            .iter()
            .map(|v| (v.first(), v.second()))
            .collect();
        assert_eq!(pairs, [("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn test_safety_report_serialization() {
        let service = SuggestionService::default();
        let report = service.check_safety_rules(&[module("a", 0.0, 0.0), module("b", 1.0, 0.0)]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["first"], "a");
        assert_eq!(json["violations"][0]["distance"], 1.0);
    }
}
