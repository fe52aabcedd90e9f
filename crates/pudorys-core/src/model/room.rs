//! Rooms: rectangular spaces with wall openings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::opening::{Door, OpeningId, Openings, Window};

/// Identifier of a room.
pub type RoomId = Uuid;

/// A rectangular room. `length_m` runs along the X axis and `width_m`
/// along the Y axis of the floor plan; both must be positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub length_m: f64,
    pub width_m: f64,
    #[serde(default)]
    pub openings: Openings,
}

impl Room {
    pub fn new(name: impl Into<String>, length_m: f64, width_m: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            length_m,
            width_m,
            openings: Openings::default(),
        }
    }

    /// Floor area in m², rounded to two decimals.
    pub fn area_m2(&self) -> f64 {
        (self.length_m * self.width_m * 100.0).round() / 100.0
    }

    pub fn door(&self, id: OpeningId) -> Option<&Door> {
        self.openings.doors.iter().find(|d| d.id == id)
    }

    pub fn door_mut(&mut self, id: OpeningId) -> Option<&mut Door> {
        self.openings.doors.iter_mut().find(|d| d.id == id)
    }

    pub fn window(&self, id: OpeningId) -> Option<&Window> {
        self.openings.windows.iter().find(|w| w.id == id)
    }

    /// Add a door and return its id.
    pub fn add_door(&mut self, door: Door) -> OpeningId {
        let id = door.id;
        self.openings.doors.push(door);
        id
    }

    /// Add a window and return its id.
    pub fn add_window(&mut self, window: Window) -> OpeningId {
        let id = window.id;
        self.openings.windows.push(window);
        id
    }
}
