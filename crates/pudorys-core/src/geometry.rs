//! World-space geometry of wall openings.

use kurbo::{Line, Point};

use crate::model::{DoorRef, Floor, Room, Wall, WallOpening};

/// Line segment of an opening, for a room placed with its top-left corner
/// at `pos`. The offset runs from the wall's start corner; the segment
/// spans the opening's width along the wall. Openings without a
/// recognized wall produce no geometry.
pub fn opening_segment(room: &Room, pos: Point, opening: &impl WallOpening) -> Option<Line> {
    let wall = opening.wall()?;
    let off = opening.offset_m();
    let w = opening.width_m();
    let segment = match wall {
        Wall::North => Line::new((pos.x + off, pos.y), (pos.x + off + w, pos.y)),
        Wall::South => Line::new(
            (pos.x + off, pos.y + room.width_m),
            (pos.x + off + w, pos.y + room.width_m),
        ),
        Wall::East => Line::new(
            (pos.x + room.length_m, pos.y + off),
            (pos.x + room.length_m, pos.y + off + w),
        ),
        Wall::West => Line::new((pos.x, pos.y + off), (pos.x, pos.y + off + w)),
    };
    Some(segment)
}

/// Midpoint of an opening's wall segment.
pub fn opening_center(room: &Room, pos: Point, opening: &impl WallOpening) -> Option<Point> {
    opening_segment(room, pos, opening).map(midpoint)
}

/// World-space center of a referenced door at its room's current position.
/// `None` when the room, door, position, or wall is missing (stale
/// references are tolerated).
pub fn door_center(floor: &Floor, door: DoorRef) -> Option<Point> {
    let room = floor.room(door.room_id)?;
    let pos = floor.room_pos(door.room_id)?;
    let door = room.door(door.door_id)?;
    opening_center(room, pos, door)
}

/// Midpoint of a segment.
pub fn midpoint(line: Line) -> Point {
    Point::new((line.p0.x + line.p1.x) / 2.0, (line.p0.y + line.p1.y) / 2.0)
}
