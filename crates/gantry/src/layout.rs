//! Turning parsed commands into concrete module placements.
//!
//! The [`LayoutGenerator`] dispatches on a command's action and pattern,
//! computes positions (delegating grids, lines and circles to the
//! [`pattern`](crate::pattern) module) and gives every position a fresh id
//! from an [`IdSource`]. Layouts are not checked for collisions or clamped
//! to any bounds.

use log::{debug, trace, warn};

use gantry_core::{
    command::{Action, CommandParams, CommandPattern, ParsedCommand},
    geometry::{Footprint, Position},
    placement::ModulePlacement,
};

use crate::pattern::{DEFAULT_CIRCLE_COUNT, PatternKind, PatternParams, generate_pattern};

/// Modules placed by a rows command that gives no count.
pub const DEFAULT_ROWS_COUNT: u32 = 10;
/// Modules per row when a bare count is tiled.
pub const TILE_ROW_LENGTH: u32 = 5;
/// Largest number of placements a single request may produce.
pub const DEFAULT_MAX_PLACEMENTS: usize = 10_000;
/// Prefix of ids produced by [`SequentialIds::default`].
pub const DEFAULT_ID_PREFIX: &str = "module";

/// A supply of unique placement ids.
///
/// Implemented for [`SequentialIds`] and for any `FnMut() -> String`, so a
/// host can plug in its own scheme:
///
/// ```
/// # use gantry::layout::IdSource;
/// let mut n = 100;
/// let mut ids = move || {
///     n += 1;
///     format!("pump-{n}")
/// };
/// assert_eq!(ids.next_id(), "pump-101");
/// ```
pub trait IdSource {
    /// Returns an id that this source has never returned before.
    fn next_id(&mut self) -> String;
}

impl<F: FnMut() -> String> IdSource for F {
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Ids of the form `<prefix>_<n>` with a monotonically increasing counter.
///
/// Reusing one source across several layouts keeps ids unique across all of
/// them.
///
/// ```
/// # use gantry::layout::{IdSource, SequentialIds};
/// let mut ids = SequentialIds::new("hd5");
/// assert_eq!(ids.next_id(), "hd5_0");
/// assert_eq!(ids.next_id(), "hd5_1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 0)
    }

    /// Creates a source whose first id uses the counter value `next`.
    pub fn starting_at(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// The positions a command asks for, before ids are assigned.
enum Plan {
    Rows { count: u32, rows: u32 },
    Pattern(PatternKind, PatternParams),
    Tiles { count: u32 },
    Nothing,
}

impl Plan {
    fn len(&self) -> u64 {
        match self {
            Plan::Rows { count, .. } | Plan::Tiles { count } => u64::from(*count),
            Plan::Pattern(kind, params) => params.planned_len(*kind),
            Plan::Nothing => 0,
        }
    }
}

/// Generates module placements from layout commands.
///
/// # Examples
///
/// ```
/// # use gantry::layout::LayoutGenerator;
/// # use gantry_core::geometry::Position;
/// let generator = LayoutGenerator::default();
/// let placements = generator.generate_layout("create a line of 5 containers", Position::default());
///
/// assert_eq!(placements.len(), 5);
/// assert_eq!(placements[0].id(), "module_0");
/// assert_eq!(placements[0].kind(), "HD5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGenerator {
    footprint: Footprint,
    max_placements: usize,
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new(Footprint::default())
    }
}

impl LayoutGenerator {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            max_placements: DEFAULT_MAX_PLACEMENTS,
        }
    }

    /// Sets the largest layout a single request may produce. Larger requests
    /// yield no placements.
    pub fn with_max_placements(mut self, max_placements: usize) -> Self {
        self.max_placements = max_placements;
        self
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn max_placements(&self) -> usize {
        self.max_placements
    }

    /// Distance between neighboring modules: one module width plus two
    /// meters of aisle.
    pub fn spacing(&self) -> f64 {
        self.footprint.width() + 2.0
    }

    /// Parses `text` and lays it out around `center` with ids
    /// `module_0`, `module_1`, ...
    ///
    /// Unrecognized text produces no placements.
    pub fn generate_layout(&self, text: &str, center: Position) -> Vec<ModulePlacement> {
        self.generate_layout_with(text, center, &mut SequentialIds::default())
    }

    /// Like [`generate_layout`](Self::generate_layout) with ids drawn from
    /// `ids`.
    pub fn generate_layout_with(
        &self,
        text: &str,
        center: Position,
        ids: &mut impl IdSource,
    ) -> Vec<ModulePlacement> {
        match gantry_parser::parse_command(text) {
            Some(command) => self.layout_from_command(&command, center, ids),
            None => {
                debug!(text; "Command not recognized, nothing to lay out");
                Vec::new()
            }
        }
    }

    /// Lays out an already parsed command around `center`.
    ///
    /// | action | pattern | requires | layout |
    /// |--------|---------|----------|--------|
    /// | place | rows | `rows > 0` | `count` (default 10) modules in `rows` rows |
    /// | place, arrange | grid | params | `rows x columns` grid |
    /// | place, create | line | `count` | line along `angle` (default 0) |
    /// | place | circle | usable `radius` | `count` (default 8) modules on a circle |
    /// | place | none of the above | `count` | rows of 5 growing along +X and +Z |
    ///
    /// Any other combination produces no placements. Every placement gets
    /// the command's module type and the center's elevation.
    pub fn layout_from_command(
        &self,
        command: &ParsedCommand,
        center: Position,
        ids: &mut impl IdSource,
    ) -> Vec<ModulePlacement> {
        let plan = plan(command);
        let planned = plan.len();
        if planned > self.max_placements as u64 {
            warn!(
                planned,
                max_placements = self.max_placements;
                "Layout request exceeds the placement limit, nothing placed"
            );
            return Vec::new();
        }

        let spacing = command
            .params()
            .and_then(CommandParams::spacing)
            .filter(|spacing| spacing.is_finite() && *spacing > 0.0)
            .unwrap_or_else(|| self.spacing());

        let positions = match plan {
            Plan::Rows { count, rows } => rows_positions(center, count, rows, spacing),
            Plan::Pattern(kind, params) => {
                generate_pattern(kind, center, &params.with_spacing(spacing), self.footprint)
            }
            Plan::Tiles { count } => tile_positions(center, count, spacing),
            Plan::Nothing => Vec::new(),
        };

        let module_type = command.module_type();
        let placements: Vec<_> = positions
            .into_iter()
            .map(|position| ModulePlacement::new(ids.next_id(), module_type, position))
            .collect();

        debug!(
            action = command.action().to_string(),
            count = placements.len();
            "Layout generated"
        );
        trace!(placements:?; "Generated placements");

        placements
    }
}

fn plan(command: &ParsedCommand) -> Plan {
    let params = command.params();
    let count = command.count();
    let rows = params.and_then(CommandParams::rows).filter(|rows| *rows > 0);

    match command.action() {
        Action::Place => match (command.pattern(), rows, count) {
            (Some(CommandPattern::Rows), Some(rows), _) => Plan::Rows {
                count: count.unwrap_or(DEFAULT_ROWS_COUNT),
                rows,
            },
            (Some(CommandPattern::Grid), _, _) if params.is_some() => grid_plan(params),
            (Some(CommandPattern::Line), _, Some(count)) => line_plan(params, count),
            (Some(CommandPattern::Circle), _, _) if usable_radius(params) => {
                let count = count.unwrap_or(DEFAULT_CIRCLE_COUNT);
                Plan::Pattern(PatternKind::Circle, pattern_params(params).with_count(count))
            }
            (_, _, Some(count)) => Plan::Tiles { count },
            _ => Plan::Nothing,
        },
        Action::Arrange => match command.pattern() {
            Some(CommandPattern::Grid) if params.is_some() => grid_plan(params),
            _ => Plan::Nothing,
        },
        Action::Create => match (command.pattern(), count) {
            (Some(CommandPattern::Line), Some(count)) => line_plan(params, count),
            _ => Plan::Nothing,
        },
    }
}

fn pattern_params(params: Option<&CommandParams>) -> PatternParams {
    params.map(PatternParams::from).unwrap_or_default()
}

fn grid_plan(params: Option<&CommandParams>) -> Plan {
    Plan::Pattern(PatternKind::Grid, pattern_params(params))
}

fn line_plan(params: Option<&CommandParams>, count: u32) -> Plan {
    Plan::Pattern(PatternKind::Line, pattern_params(params).with_count(count))
}

fn usable_radius(params: Option<&CommandParams>) -> bool {
    params
        .and_then(CommandParams::radius)
        .is_some_and(|radius| radius.is_finite() && radius > 0.0)
}

/// `count` modules in `rows` rows of `ceil(count / rows)`, centered on
/// `center`. The last row may be short.
fn rows_positions(center: Position, count: u32, rows: u32, spacing: f64) -> Vec<Position> {
    let per_row = count.div_ceil(rows);
    let half_row = f64::from(per_row) / 2.0;
    let half_rows = f64::from(rows) / 2.0;

    (0..rows)
        .flat_map(|row| (0..per_row).map(move |col| (row, col)))
        .take(count as usize)
        .map(|(row, col)| {
            Position::new(
                center.x() + (f64::from(col) - half_row) * spacing,
                center.y(),
                center.z() + (f64::from(row) - half_rows) * spacing,
            )
        })
        .collect()
}

/// `count` modules in rows of [`TILE_ROW_LENGTH`] starting at `center`.
fn tile_positions(center: Position, count: u32, spacing: f64) -> Vec<Position> {
    (0..count)
        .map(|i| {
            Position::new(
                center.x() + f64::from(i % TILE_ROW_LENGTH) * spacing,
                center.y(),
                center.z() + f64::from(i / TILE_ROW_LENGTH) * spacing,
            )
        })
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn command_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (1u32..60, 1u32..8).prop_map(|(count, rows)| format!("place {count} containers in {rows} rows")),
            (1u32..10, 1u32..10).prop_map(|(r, c)| format!("arrange containers in a grid {r}x{c}")),
            (1u32..60).prop_map(|count| format!("create a line of {count} containers")),
            (1u32..80).prop_map(|radius| format!("place containers in a circle with radius {radius}")),
            (1u32..60).prop_map(|count| format!("place {count} containers")),
        ]
    }

    /// The same command and center always produce the same placements.
    fn check_deterministic(text: &str, x: f64, z: f64) -> Result<(), TestCaseError> {
        let generator = LayoutGenerator::default();
        let center = Position::new(x, 0.0, z);

        let first = generator.generate_layout(text, center);
        let second = generator.generate_layout(text, center);

        prop_assert!(!first.is_empty());
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// The first emitted rows layout holds exactly `count` modules and no row
    /// exceeds `ceil(count / rows)`.
    fn check_rows_shape(count: u32, rows: u32) -> Result<(), TestCaseError> {
        let positions = rows_positions(Position::default(), count, rows, 4.0);
        prop_assert_eq!(positions.len(), count as usize);

        let per_row = count.div_ceil(rows) as usize;
        for row in 0..rows {
            let z = (f64::from(row) - f64::from(rows) / 2.0) * 4.0;
            let in_row = positions.iter().filter(|p| p.z() == z).count();
            prop_assert!(in_row <= per_row);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn layout_is_deterministic(
            text in command_strategy(),
            x in -100.0f64..100.0,
            z in -100.0f64..100.0,
        ) {
            check_deterministic(&text, x, z)?;
        }

        #[test]
        fn rows_shape(count in 0u32..200, rows in 1u32..20) {
            check_rows_shape(count, rows)?;
        }
    }
}
