//! Pointer-capture state for room dragging and view panning.

use kurbo::{Point, Vec2};

use crate::input::PointerId;
use crate::model::RoomId;

/// Capture taken on pointer-down over a room. It becomes an actual drag on
/// the first matching pointer-move; until then a pointer-up is a plain
/// click and must not persist anything.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragState {
    pub room_id: RoomId,
    pub pointer: PointerId,
    pub start_screen: Point,
    pub start_room: Point,
    /// At least one pointer-move arrived for this capture.
    pub moved: bool,
}

/// Modifier-gated view pan in progress. Independent of room dragging; the
/// two never run at the same time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanState {
    pub pointer: PointerId,
    pub start_screen: Point,
    pub start_pan: Vec2,
}
