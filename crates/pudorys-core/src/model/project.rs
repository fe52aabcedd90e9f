//! Survey projects: the top-level persisted unit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::floor::{Floor, FloorId};

/// Identifier of a project.
pub type ProjectId = Uuid;

/// A surveyed property: a named collection of floors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            floors: Vec::new(),
        }
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floor_mut(&mut self, id: FloorId) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == id)
    }

    /// Replace a floor with an edited copy (matched by id). Returns whether
    /// the floor was found.
    pub fn put_floor(&mut self, floor: Floor) -> bool {
        match self.floors.iter_mut().find(|f| f.id == floor.id) {
            Some(slot) => {
                *slot = floor;
                true
            }
            None => false,
        }
    }

    /// Serialize the project to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::room::Room;

    #[test]
    fn test_json_roundtrip() {
        let mut project = Project::new("Vinohrady apartment");
        let mut floor = Floor::new("Ground");
        floor.add_room(Room::new("Kitchen", 4.0, 3.0));
        project.floors.push(floor);

        let json = project.to_json().unwrap();
        let back = Project::from_json(&json).unwrap();
        assert_eq!(back.id, project.id);
        assert_eq!(back.floors.len(), 1);
        assert_eq!(back.floors[0].rooms.len(), 1);
    }

    #[test]
    fn test_put_floor_replaces_by_id() {
        let mut project = Project::new("House");
        let floor = Floor::new("Ground");
        let floor_id = floor.id;
        project.floors.push(floor);

        let mut edited = project.floor(floor_id).unwrap().clone();
        edited.add_room(Room::new("Hall", 3.0, 3.0));
        assert!(project.put_floor(edited));
        assert_eq!(project.floor(floor_id).unwrap().rooms.len(), 1);

        assert!(!project.put_floor(Floor::new("Orphan")));
    }
}
