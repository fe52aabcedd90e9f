//! Pudorys Core Library
//!
//! Platform-agnostic data model and logic for the pudorys survey tool:
//! the 2D floor-plan editor (coordinate transforms, edge snapping, drag
//! interaction, door linking), the project/floor/room data model, the
//! price estimator, and project storage backends.

pub mod camera;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod model;
pub mod pricing;
pub mod snap;
pub mod storage;
pub mod surface;

pub use camera::Camera;
pub use editor::{EditorConfig, EditorData, LinkError, PlanEditor, RegistryEntry, Response};
pub use input::{Modifiers, PointerId};
pub use model::{Door, DoorRef, Floor, Link, Plan2d, Project, Room, Wall, Window};
pub use snap::{SNAP_DISTANCE, SnapResult, snap_to_neighbors};
pub use surface::{DrawCmd, NodeKind, RecordingSurface, Surface, SurfaceError};
