//! Geometric pattern generation.
//!
//! Produces the raw coordinate sets behind every layout: a centered grid, a
//! centered line along an arbitrary direction, and a ring of evenly spaced
//! points. Patterns carry no identity; the layout generator turns positions
//! into placements.
//!
//! All positions keep the center's elevation. Output order is stable.

use std::f64::consts::TAU;

use gantry_core::{
    command::CommandParams,
    geometry::{Footprint, Position},
};

/// Rows and columns of a grid when not specified.
pub const DEFAULT_GRID_SIZE: u32 = 2;
/// Positions in a line when not specified.
pub const DEFAULT_LINE_COUNT: u32 = 5;
/// Positions on a circle when not specified.
pub const DEFAULT_CIRCLE_COUNT: u32 = 8;
/// Circle radius when not specified, in meters.
pub const DEFAULT_RADIUS: f64 = 10.0;

/// The shape a pattern lays positions out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Grid,
    Line,
    Circle,
}

/// Parameters for [`generate_pattern`]. Every field is optional and falls
/// back to a per-kind default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatternParams {
    count: Option<u32>,
    spacing: Option<f64>,
    rows: Option<u32>,
    columns: Option<u32>,
    radius: Option<f64>,
    angle: Option<f64>,
}

impl PatternParams {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the direction of a line, in radians from the +X axis toward +Z.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Number of positions [`generate_pattern`] will produce for `kind`.
    ///
    /// This is cheap to compute and lets callers reject oversized requests
    /// before generating anything.
    pub fn planned_len(&self, kind: PatternKind) -> u64 {
        match kind {
            PatternKind::Grid => {
                u64::from(self.rows.unwrap_or(DEFAULT_GRID_SIZE))
                    * u64::from(self.columns.unwrap_or(DEFAULT_GRID_SIZE))
            }
            PatternKind::Line => u64::from(self.count.unwrap_or(DEFAULT_LINE_COUNT)),
            PatternKind::Circle => {
                if self.radius().is_some() {
                    u64::from(self.count.unwrap_or(DEFAULT_CIRCLE_COUNT))
                } else {
                    0
                }
            }
        }
    }

    /// Usable spacing, falling back to `default` for missing, non-positive or
    /// non-finite values.
    fn spacing_or(&self, default: f64) -> f64 {
        self.spacing
            .filter(|spacing| spacing.is_finite() && *spacing > 0.0)
            .unwrap_or(default)
    }

    /// Usable radius, or `None` when the configured one is non-positive or
    /// non-finite.
    fn radius(&self) -> Option<f64> {
        Some(self.radius.unwrap_or(DEFAULT_RADIUS)).filter(|r| r.is_finite() && *r > 0.0)
    }
}

impl From<&CommandParams> for PatternParams {
    fn from(params: &CommandParams) -> Self {
        Self {
            count: None,
            spacing: params.spacing(),
            rows: params.rows(),
            columns: params.columns(),
            radius: params.radius(),
            angle: params.angle(),
        }
    }
}

/// Spacing used by patterns when none is given: one module width plus a
/// meter of aisle.
pub fn default_spacing(footprint: Footprint) -> f64 {
    footprint.width() + 1.0
}

/// Generates the positions of a pattern centered on `center`.
///
/// - **Grid**: `rows x columns` positions in row-major order, `spacing` apart
///   on both horizontal axes. Rows advance along Z, columns along X.
/// - **Line**: `count` positions `spacing` apart along `angle`.
/// - **Circle**: `count` positions on a circle of `radius`, starting on the
///   +X axis and turning toward +Z.
///
/// A zero count, row or column count, or an unusable radius produces no
/// positions.
///
/// # Examples
///
/// ```
/// # use gantry::pattern::{generate_pattern, PatternKind, PatternParams};
/// # use gantry_core::geometry::{Footprint, Position};
/// let params = PatternParams::default().with_rows(3).with_columns(4).with_spacing(2.0);
/// let grid = generate_pattern(PatternKind::Grid, Position::default(), &params, Footprint::HD5);
///
/// assert_eq!(grid.len(), 12);
/// assert_eq!(grid[0], Position::new(-3.0, 0.0, -2.0));
/// assert_eq!(grid[11], Position::new(3.0, 0.0, 2.0));
/// ```
pub fn generate_pattern(
    kind: PatternKind,
    center: Position,
    params: &PatternParams,
    footprint: Footprint,
) -> Vec<Position> {
    let spacing = params.spacing_or(default_spacing(footprint));

    match kind {
        PatternKind::Grid => {
            let rows = params.rows.unwrap_or(DEFAULT_GRID_SIZE);
            let columns = params.columns.unwrap_or(DEFAULT_GRID_SIZE);
            grid(center, rows, columns, spacing)
        }
        PatternKind::Line => {
            let count = params.count.unwrap_or(DEFAULT_LINE_COUNT);
            let angle = params.angle.filter(|a| a.is_finite()).unwrap_or(0.0);
            line(center, count, spacing, angle)
        }
        PatternKind::Circle => match params.radius() {
            Some(radius) => circle(center, params.count.unwrap_or(DEFAULT_CIRCLE_COUNT), radius),
            None => Vec::new(),
        },
    }
}

fn grid(center: Position, rows: u32, columns: u32, spacing: f64) -> Vec<Position> {
    let start_x = center.x() - f64::from(columns.saturating_sub(1)) * spacing / 2.0;
    let start_z = center.z() - f64::from(rows.saturating_sub(1)) * spacing / 2.0;

    (0..rows)
        .flat_map(|row| (0..columns).map(move |col| (row, col)))
        .map(|(row, col)| {
            Position::new(
                start_x + f64::from(col) * spacing,
                center.y(),
                start_z + f64::from(row) * spacing,
            )
        })
        .collect()
}

fn line(center: Position, count: u32, spacing: f64, angle: f64) -> Vec<Position> {
    let (sin, cos) = angle.sin_cos();
    let half = f64::from(count.saturating_sub(1)) * spacing / 2.0;
    let start_x = center.x() - half * cos;
    let start_z = center.z() - half * sin;

    (0..count)
        .map(|i| {
            let offset = f64::from(i) * spacing;
            Position::new(start_x + offset * cos, center.y(), start_z + offset * sin)
        })
        .collect()
}

fn circle(center: Position, count: u32, radius: f64) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let (sin, cos) = (TAU * f64::from(i) / f64::from(count)).sin_cos();
            Position::new(
                center.x() + radius * cos,
                center.y(),
                center.z() + radius * sin,
            )
        })
        .collect()
}
