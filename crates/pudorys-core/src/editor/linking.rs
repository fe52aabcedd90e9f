//! Door-to-door linking: opposite-wall validation and alignment.

use kurbo::Point;
use thiserror::Error;

use crate::geometry;
use crate::model::{DoorRef, Floor, Wall};

/// Rejection of a link attempt. Surfaced to the user; the pending door
/// selection is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("doors must sit on opposite walls ({a} does not face {b})")]
    WallsNotOpposite { a: Wall, b: Wall },
}

/// Link the pending door (`first`) to `second`.
///
/// On success the first room is translated so its door center coincides
/// exactly with the second door's center (the second room does not move),
/// and a fresh link entry replaces any link either door was part of.
/// Stale references make the attempt a silent no-op (`Ok(false)`).
pub(crate) fn link_doors(
    floor: &mut Floor,
    first: DoorRef,
    second: DoorRef,
) -> Result<bool, LinkError> {
    let Some(wall_a) = floor.door(first).and_then(|d| d.wall) else {
        return Ok(false);
    };
    let Some(wall_b) = floor.door(second).and_then(|d| d.wall) else {
        return Ok(false);
    };
    if !wall_a.is_opposite(wall_b) {
        return Err(LinkError::WallsNotOpposite {
            a: wall_a,
            b: wall_b,
        });
    }

    let Some(center_a) = geometry::door_center(floor, first) else {
        return Ok(false);
    };
    let Some(center_b) = geometry::door_center(floor, second) else {
        return Ok(false);
    };
    let Some(pos_a) = floor.room_pos(first.room_id) else {
        return Ok(false);
    };

    floor.set_room_pos(
        first.room_id,
        Point::new(
            pos_a.x + (center_b.x - center_a.x),
            pos_a.y + (center_b.y - center_a.y),
        ),
    );
    floor.record_link(first, second);
    log::debug!(
        "linked doors {}/{} -> {}/{}",
        first.room_id,
        first.door_id,
        second.room_id,
        second.door_id
    );
    Ok(true)
}
