//! Edge snapping for dragged rooms.

use kurbo::Point;

use crate::model::Room;

/// Maximum distance (meters) at which a dragged edge snaps flush to a
/// neighbour's edge.
pub const SNAP_DISTANCE: f64 = 0.15;

/// Result of a snap pass.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The possibly-adjusted position.
    pub position: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// A result with no snapping.
    pub fn none(position: Point) -> Self {
        Self {
            position,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a candidate position for `room` flush against neighbouring rooms.
///
/// Per neighbour there are two candidate alignments on each axis: the
/// dragged room placed against the neighbour's far edge, and placed so its
/// own far edge touches the neighbour's near edge. Axes are evaluated
/// independently and the closest candidate within [`SNAP_DISTANCE`] wins.
/// The position is never rejected, only adjusted.
pub fn snap_to_neighbors<'a>(
    room: &Room,
    candidate: Point,
    neighbors: impl Iterator<Item = (&'a Room, Point)>,
) -> SnapResult {
    // (distance, snapped coordinate) per axis
    let mut best_x: Option<(f64, f64)> = None;
    let mut best_y: Option<(f64, f64)> = None;

    for (other, pos) in neighbors {
        if other.id == room.id {
            continue;
        }
        for target in [pos.x + other.length_m, pos.x - room.length_m] {
            let dist = (candidate.x - target).abs();
            if dist < SNAP_DISTANCE && best_x.is_none_or(|(best, _)| dist < best) {
                best_x = Some((dist, target));
            }
        }
        for target in [pos.y + other.width_m, pos.y - room.width_m] {
            let dist = (candidate.y - target).abs();
            if dist < SNAP_DISTANCE && best_y.is_none_or(|(best, _)| dist < best) {
                best_y = Some((dist, target));
            }
        }
    }

    SnapResult {
        position: Point::new(
            best_x.map_or(candidate.x, |(_, x)| x),
            best_y.map_or(candidate.y, |(_, y)| y),
        ),
        snapped_x: best_x.is_some(),
        snapped_y: best_y.is_some(),
    }
}
