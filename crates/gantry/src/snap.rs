//! Snapping of free-form positions onto a grid or onto nearby modules.

use gantry_core::{geometry::Position, placement::ModulePlacement};

/// Default grid cell size, in meters.
pub const DEFAULT_GRID_SIZE: f64 = 1.0;
/// Default reach of [`smart_snap`], in meters.
pub const DEFAULT_SNAP_DISTANCE: f64 = 2.0;

/// Rounds X and Z to the nearest multiple of `grid_size`; Y is unchanged.
///
/// Halfway values round toward positive infinity. A non-positive or
/// non-finite `grid_size` leaves the position untouched.
///
/// # Examples
///
/// ```
/// # use gantry::snap::snap_to_grid;
/// # use gantry_core::geometry::Position;
/// let snapped = snap_to_grid(Position::new(3.4, 7.7, -1.6), 1.0);
/// assert_eq!(snapped, Position::new(3.0, 7.7, -2.0));
///
/// assert_eq!(snap_to_grid(Position::new(2.5, 0.0, -2.5), 1.0), Position::new(3.0, 0.0, -2.0));
/// ```
pub fn snap_to_grid(position: Position, grid_size: f64) -> Position {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return position;
    }

    let snap = |value: f64| (value / grid_size + 0.5).floor() * grid_size;
    position
        .with_x(snap(position.x()))
        .with_z(snap(position.z()))
}

/// Aligns a position with the nearest module within `snap_distance`.
///
/// Only modules at a horizontal distance `d` with `0 < d < snap_distance`
/// are considered. The candidate takes the nearest module's X coordinate
/// when it is closer along X than along Z, and its Z coordinate otherwise.
/// When several modules are equally near, the first in roster order wins.
/// Without a module in range the position is returned unchanged.
///
/// # Examples
///
/// ```
/// # use gantry::snap::smart_snap;
/// # use gantry_core::{geometry::Position, identifier::ModuleKind, placement::ModulePlacement};
/// let existing = [ModulePlacement::new("a", ModuleKind::default(), Position::new(10.0, 0.0, 10.0))];
///
/// let snapped = smart_snap(Position::new(10.3, 0.0, 11.0), &existing, 2.0);
/// assert_eq!(snapped, Position::new(10.0, 0.0, 11.0));
/// ```
pub fn smart_snap(position: Position, existing: &[ModulePlacement], snap_distance: f64) -> Position {
    let mut nearest: Option<(Position, f64)> = None;

    for module in existing {
        let target = module.position();
        let distance = position.horizontal_distance(target);
        let in_range = distance > 0.0 && distance < snap_distance;
        let closer = nearest.is_none_or(|(_, best)| distance < best);
        if in_range && closer {
            nearest = Some((target, distance));
        }
    }

    match nearest {
        Some((target, _)) => {
            let dx = (position.x() - target.x()).abs();
            let dz = (position.z() - target.z()).abs();
            if dx < dz {
                position.with_x(target.x())
            } else {
                position.with_z(target.z())
            }
        }
        None => position,
    }
}
