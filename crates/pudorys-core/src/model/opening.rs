//! Wall openings: doors and windows.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::room::RoomId;

/// Identifier of a door or window.
pub type OpeningId = Uuid;

/// Default door leaf width in meters, used when a survey omits it.
pub const DEFAULT_DOOR_WIDTH_M: f64 = 0.9;

/// Wall of a rectangular room, viewed from above with the room's top-left
/// corner as origin (length along X, width along Y).
///
/// Canonical codes are `N`/`E`/`S`/`W`; older survey exports used the
/// letters `A`-`D`, which map 1:1 and are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    North,
    East,
    South,
    West,
}

impl Wall {
    /// Parse a wall code, including the legacy `A`-`D` aliases.
    /// Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "N" | "A" => Some(Wall::North),
            "E" | "B" => Some(Wall::East),
            "S" | "C" => Some(Wall::South),
            "W" | "D" => Some(Wall::West),
            _ => None,
        }
    }

    /// Canonical single-letter code.
    pub fn as_code(self) -> &'static str {
        match self {
            Wall::North => "N",
            Wall::East => "E",
            Wall::South => "S",
            Wall::West => "W",
        }
    }

    /// The facing wall.
    pub fn opposite(self) -> Self {
        match self {
            Wall::North => Wall::South,
            Wall::East => Wall::West,
            Wall::South => Wall::North,
            Wall::West => Wall::East,
        }
    }

    /// Whether two walls face each other (N↔S, E↔W).
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Wall::North => "north",
            Wall::East => "east",
            Wall::South => "south",
            Wall::West => "west",
        };
        f.write_str(name)
    }
}

impl Serialize for Wall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for Wall {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Wall::from_code(&code)
            .ok_or_else(|| D::Error::custom(format!("unrecognized wall code {code:?}")))
    }
}

/// Lenient (de)serialization for optional wall codes: an unknown code
/// becomes `None` instead of failing the whole document, so one malformed
/// opening cannot take down a floor load.
pub mod wall_code {
    use super::Wall;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(wall: &Option<Wall>, serializer: S) -> Result<S::Ok, S::Error> {
        match wall {
            Some(w) => serializer.serialize_some(w.as_code()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Wall>, D::Error> {
        let code: Option<String> = Option::deserialize(deserializer)?;
        Ok(code.and_then(|c| {
            let wall = Wall::from_code(&c);
            if wall.is_none() {
                log::warn!("ignoring opening with unknown wall code {c:?}");
            }
            wall
        }))
    }
}

/// Non-owning reference to a door on some room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorRef {
    pub room_id: RoomId,
    pub door_id: OpeningId,
}

/// A door opening. May carry a back-reference to the door it is linked
/// with on another room; the floor's link set is authoritative and the two
/// are kept in agreement by the floor's link operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: OpeningId,
    #[serde(default, with = "wall_code")]
    pub wall: Option<Wall>,
    /// Distance from the wall's start corner, meters.
    pub offset_m: f64,
    pub width_m: f64,
    #[serde(default)]
    pub linked_door: Option<DoorRef>,
}

impl Door {
    pub fn new(wall: Wall, offset_m: f64, width_m: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall: Some(wall),
            offset_m,
            width_m,
            linked_door: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.linked_door.is_some()
    }
}

/// A window opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    pub id: OpeningId,
    #[serde(default, with = "wall_code")]
    pub wall: Option<Wall>,
    /// Distance from the wall's start corner, meters.
    pub offset_m: f64,
    pub width_m: f64,
}

impl Window {
    pub fn new(wall: Wall, offset_m: f64, width_m: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall: Some(wall),
            offset_m,
            width_m,
        }
    }
}

/// All openings of a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Openings {
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
}

/// Common placement of doors and windows on a wall.
pub trait WallOpening {
    fn wall(&self) -> Option<Wall>;
    fn offset_m(&self) -> f64;
    fn width_m(&self) -> f64;
}

impl WallOpening for Door {
    fn wall(&self) -> Option<Wall> {
        self.wall
    }
    fn offset_m(&self) -> f64 {
        self.offset_m
    }
    fn width_m(&self) -> f64 {
        self.width_m
    }
}

impl WallOpening for Window {
    fn wall(&self) -> Option<Wall> {
        self.wall
    }
    fn offset_m(&self) -> f64 {
        self.offset_m
    }
    fn width_m(&self) -> f64 {
        self.width_m
    }
}
