//! Survey data model: projects, floors, rooms, and wall openings.

mod floor;
mod opening;
mod project;
mod room;

pub use floor::{Floor, FloorId, Link, LinkId, Plan2d, SavedView};
pub use opening::{
    DEFAULT_DOOR_WIDTH_M, Door, DoorRef, OpeningId, Openings, Wall, WallOpening, Window, wall_code,
};
pub use project::{Project, ProjectId};
pub use room::{Room, RoomId};
