//! Floors: one building level holding rooms and the 2D layout state.

use std::collections::HashMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::opening::{Door, DoorRef};
use super::room::{Room, RoomId};

/// Identifier of a floor.
pub type FloorId = Uuid;
/// Identifier of a door-to-door link.
pub type LinkId = Uuid;

/// A persisted connection between two doors on different rooms.
///
/// The link set is authoritative over the doors' `linked_door`
/// back-references; [`Floor::record_link`] and [`Floor::unlink_door`] keep
/// the two in agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub a: DoorRef,
    pub b: DoorRef,
}

impl Link {
    pub fn new(a: DoorRef, b: DoorRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            a,
            b,
        }
    }

    /// Whether either end references the given door.
    pub fn mentions(&self, door: DoorRef) -> bool {
        self.a == door || self.b == door
    }

    /// The opposite end, if `door` is one of the two ends.
    pub fn other_end(&self, door: DoorRef) -> Option<DoorRef> {
        if self.a == door {
            Some(self.b)
        } else if self.b == door {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Saved zoom/pan, kept for continuity across sessions. Overwritable view
/// state, structurally separate from the room/opening/link data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

/// The 2D layout block of a floor: placed room positions (top-left
/// corners, meters), door links, the selected room, and the saved view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan2d {
    #[serde(default)]
    pub room_pos: HashMap<RoomId, Point>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub selected_room_id: Option<RoomId>,
    #[serde(default)]
    pub view: Option<SavedView>,
}

/// One level of a building.
///
/// Invariant: every room has exactly one entry in `plan2d.room_pos`, and
/// the link set only references doors that exist. All mutations that could
/// violate this go through the methods below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub plan2d: Plan2d,
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rooms: Vec::new(),
            plan2d: Plan2d::default(),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn room_pos(&self, id: RoomId) -> Option<Point> {
        self.plan2d.room_pos.get(&id).copied()
    }

    /// Update a room's placed position. Positions of unknown rooms are
    /// ignored so stale UI events cannot grow the mapping.
    pub fn set_room_pos(&mut self, id: RoomId, pos: Point) {
        if self.rooms.iter().any(|r| r.id == id) {
            self.plan2d.room_pos.insert(id, pos);
        }
    }

    /// Add a room placed at the origin.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.add_room_at(room, Point::ZERO)
    }

    /// Add a room at a position, creating its position entry.
    pub fn add_room_at(&mut self, room: Room, pos: Point) -> RoomId {
        let id = room.id;
        self.plan2d.room_pos.insert(id, pos);
        self.rooms.push(room);
        id
    }

    /// Remove a room, purging its position entry, every link mentioning
    /// one of its doors, and the paired doors' back-references.
    pub fn remove_room(&mut self, id: RoomId) -> Option<Room> {
        let idx = self.rooms.iter().position(|r| r.id == id)?;

        let door_refs: Vec<DoorRef> = self.rooms[idx]
            .openings
            .doors
            .iter()
            .map(|d| DoorRef {
                room_id: id,
                door_id: d.id,
            })
            .collect();
        for door in door_refs {
            self.unlink_door(door);
        }
        // Links may still name the room through doors that no longer exist.
        self.plan2d
            .links
            .retain(|l| l.a.room_id != id && l.b.room_id != id);

        self.plan2d.room_pos.remove(&id);
        if self.plan2d.selected_room_id == Some(id) {
            self.plan2d.selected_room_id = None;
        }
        Some(self.rooms.remove(idx))
    }

    /// Resolve a door reference.
    pub fn door(&self, door: DoorRef) -> Option<&Door> {
        self.room(door.room_id)?.door(door.door_id)
    }

    pub fn door_mut(&mut self, door: DoorRef) -> Option<&mut Door> {
        self.room_mut(door.room_id)?.door_mut(door.door_id)
    }

    /// Remove a door, dissolving any link it participates in.
    pub fn remove_door(&mut self, door: DoorRef) -> Option<Door> {
        self.unlink_door(door);
        let room = self.room_mut(door.room_id)?;
        let idx = room
            .openings
            .doors
            .iter()
            .position(|d| d.id == door.door_id)?;
        Some(room.openings.doors.remove(idx))
    }

    /// Record a link between two doors. Any pre-existing link mentioning
    /// either door is dissolved first (at most one link per door), then
    /// both back-references are set and a fresh link entry is stored.
    pub fn record_link(&mut self, a: DoorRef, b: DoorRef) -> LinkId {
        for end in [a, b] {
            if let Some(partner) = self.door(end).and_then(|d| d.linked_door) {
                if let Some(other) = self.door_mut(partner) {
                    other.linked_door = None;
                }
            }
        }
        self.plan2d.links.retain(|l| !(l.mentions(a) || l.mentions(b)));

        if let Some(door) = self.door_mut(a) {
            door.linked_door = Some(b);
        }
        if let Some(door) = self.door_mut(b) {
            door.linked_door = Some(a);
        }
        let link = Link::new(a, b);
        let id = link.id;
        self.plan2d.links.push(link);
        id
    }

    /// Dissolve the link a door participates in: the link entry is removed
    /// and both back-references are cleared. Returns whether anything
    /// changed. The link set is authoritative, so the partner is
    /// recovered from it even if the door's own back-reference is gone.
    pub fn unlink_door(&mut self, door: DoorRef) -> bool {
        let partner = self
            .door(door)
            .and_then(|d| d.linked_door)
            .or_else(|| self.plan2d.links.iter().find_map(|l| l.other_end(door)));

        let links_before = self.plan2d.links.len();
        self.plan2d.links.retain(|l| !l.mentions(door));
        let mut changed = self.plan2d.links.len() != links_before;

        if let Some(d) = self.door_mut(door) {
            if d.linked_door.take().is_some() {
                changed = true;
            }
        }
        if let Some(partner) = partner {
            if let Some(p) = self.door_mut(partner) {
                if p.linked_door.take().is_some() {
                    changed = true;
                }
            }
        }
        changed
    }

    /// Sum of room areas in m², rounded to two decimals.
    pub fn total_area_m2(&self) -> f64 {
        let total: f64 = self.rooms.iter().map(|r| r.area_m2()).sum();
        (total * 100.0).round() / 100.0
    }
}
