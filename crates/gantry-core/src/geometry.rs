//! Geometric primitives for site layout and placement.
//!
//! This module provides the fundamental geometric types used throughout Gantry
//! for positioning modules on a site and reasoning about their clearances.
//!
//! # Overview
//!
//! - [`Position`] - A 3D coordinate in site space, in meters
//! - [`Rotation`] - Euler angles in radians, carried through but never used for clearances
//! - [`Bounds`] - An axis-aligned box constraining the horizontal placement plane
//! - [`Footprint`] - The physical envelope of a module
//!
//! # Coordinate System
//!
//! Gantry uses a right-handed, Y-up coordinate system:
//!
//! ```text
//!          +Y (vertical)
//!           │
//!           │
//!           └──────► +X
//!          ╱
//!         ╱
//!       +Z
//! ```
//!
//! - **Horizontal plane**: `x` and `z` form the plane used for every distance,
//!   collision and bounds computation.
//! - **Vertical axis**: `y` is elevation. It is carried through untouched by
//!   the layout engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 3D point representing a position in site coordinate space.
///
/// Positions use `f64` coordinates in meters. Serialized as a three-element
/// array `[x, y, z]`.
///
/// # Examples
///
/// ```
/// # use gantry_core::geometry::Position;
/// let a = Position::new(0.0, 0.0, 0.0);
/// let b = Position::new(3.0, 7.0, 4.0);
///
/// // The vertical axis does not contribute to horizontal distance
/// assert_eq!(a.horizontal_distance(b), 5.0);
///
/// let moved = a.add_position(b);
/// assert_eq!(moved.y(), 7.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Creates a new position with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the position
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate (elevation) of the position
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the position
    pub fn z(self) -> f64 {
        self.z
    }

    /// Creates a new position with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new position with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Creates a new position with the specified z-coordinate
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Adds another position to this one component-wise
    pub fn add_position(self, other: Position) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Subtracts another position from this one component-wise
    pub fn sub_position(self, other: Position) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Euclidean distance on the horizontal (X, Z) plane.
    ///
    /// This is the distance notion used by every clearance rule in Gantry.
    pub fn horizontal_distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Full Euclidean distance, including the vertical axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gantry_core::geometry::Position;
    /// let a = Position::new(0.0, 0.0, 0.0);
    /// let b = Position::new(2.0, 3.0, 6.0);
    /// assert_eq!(a.distance(b), 7.0);
    /// ```
    pub fn distance(self, other: Position) -> f64 {
        let delta = self.sub_position(other);
        (delta.x * delta.x + delta.y * delta.y + delta.z * delta.z).sqrt()
    }

    /// Returns `true` when all three coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [f64; 3] {
    fn from(position: Position) -> Self {
        [position.x, position.y, position.z]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Errors produced when parsing a [`Position`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("expected three comma-separated coordinates, found {0}")]
    Arity(usize),

    #[error("invalid coordinate `{0}`")]
    Coordinate(String),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `"x,y,z"`; whitespace around each coordinate is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(ParsePositionError::Arity(parts.len()));
        };

        let coordinate = |value: &str| {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParsePositionError::Coordinate(value.to_string()))
        };

        Ok(Self::new(coordinate(*x)?, coordinate(*y)?, coordinate(*z)?))
    }
}

/// Euler rotation angles in radians.
///
/// Rotations are copied through to the rendering layer. Clearance math treats
/// every footprint as isotropic and never reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rotation {
    rx: f64,
    ry: f64,
    rz: f64,
}

impl Rotation {
    pub fn new(rx: f64, ry: f64, rz: f64) -> Self {
        Self { rx, ry, rz }
    }

    /// Rotation around the X axis
    pub fn rx(self) -> f64 {
        self.rx
    }

    /// Rotation around the vertical axis (yaw)
    pub fn ry(self) -> f64 {
        self.ry
    }

    /// Rotation around the Z axis
    pub fn rz(self) -> f64 {
        self.rz
    }
}

impl From<[f64; 3]> for Rotation {
    fn from([rx, ry, rz]: [f64; 3]) -> Self {
        Self { rx, ry, rz }
    }
}

impl From<Rotation> for [f64; 3] {
    fn from(rotation: Rotation) -> Self {
        [rotation.rx, rotation.ry, rotation.rz]
    }
}

/// An axis-aligned box constraining placements on the horizontal plane.
///
/// Only the `x` and `z` extents participate in containment checks; the `y`
/// extent is accepted and carried but never enforced.
///
/// # Examples
///
/// ```
/// # use gantry_core::geometry::{Bounds, Position};
/// let site = Bounds::new(Position::new(0.0, 0.0, 0.0), Position::new(50.0, 0.0, 20.0));
///
/// assert_eq!(site.width(), 50.0);
/// assert_eq!(site.depth(), 20.0);
/// assert_eq!(site.area(), 1000.0);
///
/// // Containment is inclusive and ignores elevation
/// assert!(site.contains(Position::new(50.0, 99.0, 0.0)));
/// assert!(!site.contains(Position::new(50.1, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min: Position,
    max: Position,
}

impl Bounds {
    /// Creates bounds from a minimum and a maximum corner
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Creates a square site of edge `extent` centered on the origin
    pub fn centered_square(extent: f64) -> Self {
        let half = extent / 2.0;
        Self {
            min: Position::new(-half, 0.0, -half),
            max: Position::new(half, 0.0, half),
        }
    }

    /// Returns the minimum corner
    pub fn min(self) -> Position {
        self.min
    }

    /// Returns the maximum corner
    pub fn max(self) -> Position {
        self.max
    }

    /// Extent along the X axis
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along the Z axis
    pub fn depth(self) -> f64 {
        self.max.z - self.min.z
    }

    /// Horizontal area covered by the bounds
    pub fn area(self) -> f64 {
        self.width() * self.depth()
    }

    /// Returns the center of the bounds
    pub fn center(self) -> Position {
        Position::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Checks whether a position lies within the bounds on the horizontal plane.
    ///
    /// Positions exactly on an edge are inside.
    pub fn contains(self, position: Position) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.z
            && position.z <= self.max.z
    }
}

/// The physical envelope of a module, in meters.
///
/// Clearance rules approximate every footprint as a circle whose radius is
/// derived from `length` and `width`; `height` is informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    length: f64,
    width: f64,
    height: f64,
}

impl Footprint {
    /// The envelope of a 40-foot HD5 container, the default module class.
    pub const HD5: Footprint = Footprint {
        length: 12.196,
        width: 2.438,
        height: 2.9,
    };

    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Returns the length (long horizontal side)
    pub fn length(self) -> f64 {
        self.length
    }

    /// Returns the width (short horizontal side)
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the vertical extent
    pub fn height(self) -> f64 {
        self.height
    }

    /// Ground area covered by one module
    pub fn area(self) -> f64 {
        self.length * self.width
    }

    /// Minimum center-to-center distance between two modules for the given margin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gantry_core::geometry::Footprint;
    /// let footprint = Footprint::new(4.0, 2.0, 1.0);
    /// assert_eq!(footprint.clearance(0.5), 3.5);
    /// ```
    pub fn clearance(self, margin: f64) -> f64 {
        (self.length + self.width) / 2.0 + margin
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::HD5
    }
}
