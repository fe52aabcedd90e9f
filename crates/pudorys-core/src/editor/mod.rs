//! The interactive 2D floor-plan editor.
//!
//! One editor instance owns the floor being edited, the view transform,
//! and all interaction state (drag capture, view pan, pending door
//! selection). There are no process-wide singletons; multiple editors for
//! different floors coexist. Hosts feed pointer/control events in, act on
//! the returned [`Response`], and receive the floor through the change
//! callback whenever a persisted-worthy mutation completes (drag-end with
//! movement, link creation, unlink).

mod drag;
mod linking;

pub use linking::LinkError;

use kurbo::{Point, Rect};

use crate::camera::{self, Camera};
use crate::geometry;
use crate::input::{Modifiers, PointerId};
use crate::model::{DoorRef, Floor, Project, RoomId};
use crate::snap;
use crate::surface::{NodeKind, Surface};
use drag::{DragState, PanState};

/// Screen-space radius of a clickable door marker.
pub const DOOR_MARKER_RADIUS: f64 = 6.0;
/// Radius of the decorative window markers (not clickable).
pub const WINDOW_MARKER_RADIUS: f64 = 4.0;
/// Corner rounding of room boxes, screen pixels.
const ROOM_CORNER_RADIUS: f64 = 4.0;
/// Vertical distance between the room name and the area line of a label.
const LABEL_LINE_HEIGHT: f64 = 14.0;

/// Editor configuration supplied by the host.
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    /// Snap dragged rooms flush against neighbouring edges.
    pub snap_enabled: bool,
    /// Rendering density, screen pixels per meter at zoom 1.0.
    pub px_per_meter: f64,
    /// Mirror zoom/pan into the floor's saved-view block. Never routed
    /// through the change callback either way.
    pub persist_view: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            px_per_meter: camera::PX_PER_METER,
            persist_view: true,
        }
    }
}

/// The project/floor pair the editor operates on. The floor is the
/// editor's working copy and the value handed to the change callback; the
/// project provides context only.
#[derive(Debug, Clone)]
pub struct EditorData {
    pub project: Project,
    pub floor: Floor,
}

/// Outcome of an input event, telling the host what to do next.
#[derive(Debug, Default)]
pub struct Response {
    /// A redraw is required. Hosts may coalesce redraws to
    /// animation-frame rate during continuous drags.
    pub redraw: bool,
    /// A link attempt was rejected; surface the message to the user.
    pub rejection: Option<LinkError>,
}

impl Response {
    pub const NONE: Response = Response {
        redraw: false,
        rejection: None,
    };

    fn repaint() -> Self {
        Response {
            redraw: true,
            rejection: None,
        }
    }

    fn rejected(error: LinkError) -> Self {
        Response {
            redraw: false,
            rejection: Some(error),
        }
    }
}

/// Entry of the room registry list kept in sync with the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub room_id: RoomId,
    pub name: String,
    pub area_m2: f64,
    pub selected: bool,
}

type ChangeCallback = Box<dyn FnMut(&Floor)>;

/// Interactive 2D floor-plan editor. See the module docs for the
/// lifecycle: `new → set_data → (events/render) → into_data`.
pub struct PlanEditor {
    data: Option<EditorData>,
    camera: Camera,
    config: EditorConfig,
    drag: Option<DragState>,
    pan: Option<PanState>,
    pending_door: Option<DoorRef>,
    on_change: Option<ChangeCallback>,
}

impl Default for PlanEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl PlanEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            data: None,
            camera: Camera::new(config.px_per_meter),
            config,
            drag: None,
            pan: None,
            pending_door: None,
            on_change: None,
        }
    }

    /// Register the change callback invoked after each persisted mutation.
    pub fn on_change(&mut self, callback: impl FnMut(&Floor) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Bind the editor to a floor. Must be called before the first render.
    /// Clears interaction state and restores the floor's saved view if one
    /// is present.
    pub fn set_data(&mut self, data: EditorData) {
        self.drag = None;
        self.pan = None;
        self.pending_door = None;
        if let Some(view) = data.floor.plan2d.view {
            self.camera.apply_view(view);
        }
        self.data = Some(data);
    }

    pub fn data(&self) -> Option<&EditorData> {
        self.data.as_ref()
    }

    /// The floor currently being edited.
    pub fn floor(&self) -> Option<&Floor> {
        self.data.as_ref().map(|d| &d.floor)
    }

    /// Hand the bound data back to the host.
    pub fn into_data(self) -> Option<EditorData> {
        self.data
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> EditorConfig {
        self.config
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.config.snap_enabled = enabled;
    }

    /// The door awaiting a second click to complete a link.
    pub fn pending_door(&self) -> Option<DoorRef> {
        self.pending_door
    }

    pub fn selected_room_id(&self) -> Option<RoomId> {
        self.floor()?.plan2d.selected_room_id
    }

    /// Programmatic selection. Unknown room ids are ignored as stale.
    pub fn set_selected_room_id(&mut self, id: Option<RoomId>) -> Response {
        let Some(data) = self.data.as_mut() else {
            return Response::NONE;
        };
        if let Some(id) = id {
            if data.floor.room(id).is_none() {
                log::debug!("ignoring selection of unknown room {id}");
                return Response::NONE;
            }
        }
        if data.floor.plan2d.selected_room_id == id {
            return Response::NONE;
        }
        data.floor.plan2d.selected_room_id = id;
        Response::repaint()
    }

    // ---- zoom & pan controls -------------------------------------------

    pub fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    /// Set the zoom level directly (slider input); clamped defensively.
    pub fn set_zoom(&mut self, zoom: f64) -> Response {
        self.camera.set_zoom(zoom);
        self.persist_view();
        Response::repaint()
    }

    pub fn set_pan(&mut self, x: f64, y: f64) -> Response {
        self.camera.set_pan(x, y);
        self.persist_view();
        Response::repaint()
    }

    /// Reset to zoom 1.0 and no pan.
    pub fn reset_view(&mut self) -> Response {
        self.camera.reset();
        self.persist_view();
        Response::repaint()
    }

    /// Wheel gesture: only acts while the accelerator key is held; ±10%
    /// per tick, clamped. The host mirrors the new zoom into its slider.
    pub fn wheel(&mut self, delta_y: f64, modifiers: Modifiers) -> Response {
        if !modifiers.ctrl {
            return Response::NONE;
        }
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        self.camera.zoom_by(factor);
        self.persist_view();
        Response::repaint()
    }

    /// Zoom/pan changes are view state: they are mirrored into the floor's
    /// saved-view block when configured, and never fire the change
    /// callback.
    fn persist_view(&mut self) {
        if !self.config.persist_view {
            return;
        }
        if let Some(data) = self.data.as_mut() {
            data.floor.plan2d.view = Some(self.camera.saved_view());
        }
    }

    // ---- pointer state machine -----------------------------------------

    /// Pointer-down in surface-local screen coordinates.
    pub fn pointer_down(&mut self, pointer: PointerId, screen: Point, modifiers: Modifiers) -> Response {
        if self.data.is_none() || self.pan.is_some() || self.drag.is_some() {
            return Response::NONE;
        }

        // Space-gated view pan; room drag takes precedence only via the
        // drag.is_some() guard above.
        if modifiers.space {
            self.pan = Some(PanState {
                pointer,
                start_screen: screen,
                start_pan: self.camera.pan(),
            });
            return Response::NONE;
        }

        if let Some(door) = self.hit_door_marker(screen) {
            return self.handle_door_click(door, modifiers);
        }

        if let Some(room_id) = self.hit_room(screen) {
            let Some(data) = self.data.as_mut() else {
                return Response::NONE;
            };
            let floor = &mut data.floor;
            let was_selected = floor.plan2d.selected_room_id == Some(room_id);
            // Tap toggles selection; only a freshly-selected room arms a
            // drag capture.
            floor.plan2d.selected_room_id = if was_selected { None } else { Some(room_id) };
            if !was_selected {
                if let Some(pos) = floor.room_pos(room_id) {
                    self.drag = Some(DragState {
                        room_id,
                        pointer,
                        start_screen: screen,
                        start_room: pos,
                        moved: false,
                    });
                }
            }
            return Response::repaint();
        }

        Response::NONE
    }

    /// Pointer-move for a captured pointer. Updates the pan or the dragged
    /// room's position (through the snap engine when enabled).
    pub fn pointer_move(&mut self, pointer: PointerId, screen: Point) -> Response {
        if let Some(pan) = self.pan {
            if pan.pointer == pointer {
                self.camera.set_pan(
                    pan.start_pan.x + (screen.x - pan.start_screen.x),
                    pan.start_pan.y + (screen.y - pan.start_screen.y),
                );
                self.persist_view();
                return Response::repaint();
            }
            return Response::NONE;
        }

        let (room_id, start_screen, start_room) = match self.drag.as_mut() {
            Some(drag) if drag.pointer == pointer => {
                drag.moved = true;
                (drag.room_id, drag.start_screen, drag.start_room)
            }
            _ => return Response::NONE,
        };

        let scale = self.camera.scale();
        let snap_enabled = self.config.snap_enabled;
        let Some(data) = self.data.as_mut() else {
            return Response::NONE;
        };
        let floor = &mut data.floor;

        let candidate = Point::new(
            start_room.x + (screen.x - start_screen.x) / scale,
            start_room.y + (screen.y - start_screen.y) / scale,
        );
        let position = if snap_enabled {
            let Some(room) = floor.room(room_id) else {
                // The room vanished mid-drag; drop the stale event.
                return Response::NONE;
            };
            let neighbors = floor
                .rooms
                .iter()
                .filter_map(|r| floor.plan2d.room_pos.get(&r.id).map(|p| (r, *p)));
            snap::snap_to_neighbors(room, candidate, neighbors).position
        } else {
            candidate
        };
        floor.set_room_pos(room_id, position);
        Response::repaint()
    }

    /// Pointer-up: ends a pan or a drag capture. A capture that actually
    /// moved fires the change callback; a plain click does not.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Response {
        if let Some(pan) = self.pan {
            if pan.pointer == pointer {
                self.pan = None;
            }
            return Response::NONE;
        }

        let Some(drag) = self.drag else {
            return Response::NONE;
        };
        if drag.pointer != pointer {
            return Response::NONE;
        }
        self.drag = None;
        if drag.moved {
            self.emit_change();
            Response::repaint()
        } else {
            Response::NONE
        }
    }

    /// Loss of pointer capture: cleanup only, nothing is persisted.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> Response {
        if let Some(pan) = self.pan {
            if pan.pointer == pointer {
                self.pan = None;
            }
            return Response::NONE;
        }
        match self.drag {
            Some(drag) if drag.pointer == pointer => {
                self.drag = None;
                Response::repaint()
            }
            _ => Response::NONE,
        }
    }

    /// Click on a registry entry: plain selection (no toggle).
    pub fn registry_click(&mut self, room_id: RoomId) -> Response {
        self.set_selected_room_id(Some(room_id))
    }

    // ---- door linking --------------------------------------------------

    fn handle_door_click(&mut self, door: DoorRef, modifiers: Modifiers) -> Response {
        let Some(data) = self.data.as_mut() else {
            return Response::NONE;
        };
        let floor = &mut data.floor;

        // Alt-click on a linked door unlinks it, bypassing the pending
        // selection logic. An alt-click on an unlinked door falls through.
        if modifiers.alt && floor.door(door).is_some_and(|d| d.is_linked()) {
            floor.unlink_door(door);
            log::debug!("unlinked door {}/{}", door.room_id, door.door_id);
            self.emit_change();
            return Response::repaint();
        }

        match self.pending_door {
            None => {
                self.pending_door = Some(door);
                Response::repaint()
            }
            Some(pending) if pending == door => {
                self.pending_door = None;
                Response::repaint()
            }
            Some(pending) => match linking::link_doors(floor, pending, door) {
                Ok(true) => {
                    self.pending_door = None;
                    self.emit_change();
                    Response::repaint()
                }
                // Stale pending reference: leave the selection alone.
                Ok(false) => Response::NONE,
                Err(error) => Response::rejected(error),
            },
        }
    }

    fn emit_change(&mut self) {
        if let (Some(callback), Some(data)) = (self.on_change.as_mut(), self.data.as_ref()) {
            callback(&data.floor);
        }
    }

    // ---- hit testing ---------------------------------------------------

    /// Topmost door marker under a screen point, if any. Later rooms draw
    /// on top, so iteration runs back-to-front.
    fn hit_door_marker(&self, screen: Point) -> Option<DoorRef> {
        let floor = self.floor()?;
        for room in floor.rooms.iter().rev() {
            let Some(pos) = floor.room_pos(room.id) else {
                continue;
            };
            for door in &room.openings.doors {
                let Some(center) = geometry::opening_center(room, pos, door) else {
                    continue;
                };
                let marker = self.camera.world_to_screen(center);
                let (dx, dy) = (screen.x - marker.x, screen.y - marker.y);
                if dx * dx + dy * dy <= DOOR_MARKER_RADIUS * DOOR_MARKER_RADIUS {
                    return Some(DoorRef {
                        room_id: room.id,
                        door_id: door.id,
                    });
                }
            }
        }
        None
    }

    /// Topmost room box under a screen point, if any.
    fn hit_room(&self, screen: Point) -> Option<RoomId> {
        let floor = self.floor()?;
        let world = self.camera.screen_to_world(screen);
        for room in floor.rooms.iter().rev() {
            let Some(pos) = floor.room_pos(room.id) else {
                continue;
            };
            let bounds = Rect::new(pos.x, pos.y, pos.x + room.length_m, pos.y + room.width_m);
            if bounds.contains(world) {
                return Some(room.id);
            }
        }
        None
    }

    // ---- rendering -----------------------------------------------------

    /// Idempotent full redraw of room shapes, openings, and link lines.
    /// The registry list is produced by [`PlanEditor::registry`].
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        let Some(floor) = self.floor() else {
            return;
        };
        let selected = floor.plan2d.selected_room_id;
        let scale = self.camera.scale();

        for room in &floor.rooms {
            let Some(pos) = floor.room_pos(room.id) else {
                continue;
            };
            let top_left = self.camera.world_to_screen(pos);
            let bounds = Rect::new(
                top_left.x,
                top_left.y,
                top_left.x + room.length_m * scale,
                top_left.y + room.width_m * scale,
            );
            surface.rect(
                bounds,
                ROOM_CORNER_RADIUS,
                NodeKind::RoomBox {
                    selected: selected == Some(room.id),
                },
            );
            let center = bounds.center();
            surface.text(center, &room.name, NodeKind::RoomLabel);
            surface.text(
                Point::new(center.x, center.y + LABEL_LINE_HEIGHT),
                &format!("{} m²", room.area_m2()),
                NodeKind::RoomLabel,
            );

            for door in &room.openings.doors {
                let Some(segment) = geometry::opening_segment(room, pos, door) else {
                    continue;
                };
                let p0 = self.camera.world_to_screen(segment.p0);
                let p1 = self.camera.world_to_screen(segment.p1);
                surface.line(p0, p1, NodeKind::DoorLine);
                surface.circle(
                    Point::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0),
                    DOOR_MARKER_RADIUS,
                    NodeKind::DoorMarker {
                        selected: self.pending_door
                            == Some(DoorRef {
                                room_id: room.id,
                                door_id: door.id,
                            }),
                        linked: door.is_linked(),
                    },
                );
            }

            for window in &room.openings.windows {
                let Some(segment) = geometry::opening_segment(room, pos, window) else {
                    continue;
                };
                let p0 = self.camera.world_to_screen(segment.p0);
                let p1 = self.camera.world_to_screen(segment.p1);
                surface.line(p0, p1, NodeKind::WindowLine);
                surface.circle(
                    Point::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0),
                    WINDOW_MARKER_RADIUS,
                    NodeKind::WindowMarker,
                );
            }
        }

        for link in &floor.plan2d.links {
            // Stale links render nothing.
            let Some(center_a) = geometry::door_center(floor, link.a) else {
                continue;
            };
            let Some(center_b) = geometry::door_center(floor, link.b) else {
                continue;
            };
            surface.line(
                self.camera.world_to_screen(center_a),
                self.camera.world_to_screen(center_b),
                NodeKind::LinkLine,
            );
        }
    }

    /// Room registry entries, in room order, with the current selection.
    pub fn registry(&self) -> Vec<RegistryEntry> {
        let Some(floor) = self.floor() else {
            return Vec::new();
        };
        let selected = floor.plan2d.selected_room_id;
        floor
            .rooms
            .iter()
            .map(|room| RegistryEntry {
                room_id: room.id,
                name: room.name.clone(),
                area_m2: room.area_m2(),
                selected: selected == Some(room.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Door, Room, Wall};
    use crate::surface::{DrawCmd, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Kitchen 4×3 at (0,0) with an E door (offset 1.0, width 0.9); Hall
    /// 3×3 at (10,10) with a W door (offset 0.5, width 0.9).
    fn sample_data() -> (EditorData, DoorRef, DoorRef) {
        let mut floor = Floor::new("Ground");

        let mut kitchen = Room::new("Kitchen", 4.0, 3.0);
        let kitchen_door = kitchen.add_door(Door::new(Wall::East, 1.0, 0.9));
        let kitchen_id = floor.add_room_at(kitchen, Point::new(0.0, 0.0));

        let mut hall = Room::new("Hall", 3.0, 3.0);
        let hall_door = hall.add_door(Door::new(Wall::West, 0.5, 0.9));
        let hall_id = floor.add_room_at(hall, Point::new(10.0, 10.0));

        let data = EditorData {
            project: Project::new("Sample"),
            floor,
        };
        (
            data,
            DoorRef {
                room_id: kitchen_id,
                door_id: kitchen_door,
            },
            DoorRef {
                room_id: hall_id,
                door_id: hall_door,
            },
        )
    }

    fn editor_with(data: EditorData) -> PlanEditor {
        let mut editor = PlanEditor::default();
        editor.set_data(data);
        editor
    }

    fn change_counter(editor: &mut PlanEditor) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        editor.on_change(move |_floor| {
            *seen.borrow_mut() += 1;
        });
        count
    }

    /// Screen position of a door marker at the editor's current view.
    fn marker_screen(editor: &PlanEditor, door: DoorRef) -> Point {
        let floor = editor.floor().unwrap();
        let center = crate::geometry::door_center(floor, door).unwrap();
        editor.camera().world_to_screen(center)
    }

    fn click(editor: &mut PlanEditor, at: Point, modifiers: Modifiers) -> Response {
        let down = editor.pointer_down(1, at, modifiers);
        let up = editor.pointer_up(1);
        Response {
            redraw: down.redraw || up.redraw,
            rejection: down.rejection.or(up.rejection),
        }
    }

    #[test]
    fn test_click_toggles_selection_without_persisting() {
        let (data, kitchen_door, _) = sample_data();
        let kitchen_id = kitchen_door.room_id;
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        // Center of the kitchen box in screen space.
        let inside = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        click(&mut editor, inside, Modifiers::NONE);
        assert_eq!(editor.selected_room_id(), Some(kitchen_id));

        click(&mut editor, inside, Modifiers::NONE);
        assert_eq!(editor.selected_room_id(), None);

        // Selection is UI state, not a persisted mutation.
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn test_drag_moves_room_and_persists_once() {
        let (data, kitchen_door, _) = sample_data();
        let kitchen_id = kitchen_door.room_id;
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let start = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, start, Modifiers::NONE);
        // 80 px right at zoom 1.0 = 1 m.
        editor.pointer_move(1, Point::new(start.x + 80.0, start.y));
        editor.pointer_up(1);

        let pos = editor.floor().unwrap().room_pos(kitchen_id).unwrap();
        assert!((pos.x - 1.0).abs() < 1e-9);
        assert!(pos.y.abs() < 1e-9);
        assert_eq!(*changes.borrow(), 1);
    }

    #[test]
    fn test_drag_respects_zoom_for_delta_conversion() {
        let (data, kitchen_door, _) = sample_data();
        let kitchen_id = kitchen_door.room_id;
        let mut editor = editor_with(data);
        editor.set_zoom(2.0);

        let start = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, start, Modifiers::NONE);
        editor.pointer_move(1, Point::new(start.x + 80.0, start.y));
        editor.pointer_up(1);

        // 80 px at zoom 2.0 is only half a meter.
        let pos = editor.floor().unwrap().room_pos(kitchen_id).unwrap();
        assert!((pos.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_drag_snaps_to_neighbor_edge() {
        let (data, _, hall_door) = sample_data();
        let mut editor = editor_with(data);

        // Drag the hall from x = 10 to x = 4.1, just right of the
        // kitchen's right edge (x = 4): within the 0.15 m threshold it
        // snaps flush.
        let start = editor.camera().world_to_screen(Point::new(11.5, 11.5));
        editor.pointer_down(1, start, Modifiers::NONE);
        editor.pointer_move(1, Point::new(start.x - 80.0 * 5.9, start.y));
        editor.pointer_up(1);

        let pos = editor
            .floor()
            .unwrap()
            .room_pos(hall_door.room_id)
            .unwrap();
        assert!((pos.x - 4.0).abs() < 1e-9, "x was {}", pos.x);
        assert!((pos.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_can_be_disabled() {
        let (data, _, hall_door) = sample_data();
        let mut editor = editor_with(data);
        editor.set_snap_enabled(false);

        let start = editor.camera().world_to_screen(Point::new(11.5, 11.5));
        editor.pointer_down(1, start, Modifiers::NONE);
        // Land the hall at x = 4.1, y unchanged: without snapping it stays.
        editor.pointer_move(1, Point::new(start.x - 80.0 * 5.9, start.y));
        editor.pointer_up(1);

        let pos = editor
            .floor()
            .unwrap()
            .room_pos(hall_door.room_id)
            .unwrap();
        assert!((pos.x - 4.1).abs() < 1e-9, "x was {}", pos.x);
    }

    #[test]
    fn test_click_without_movement_is_not_persisted() {
        let (data, _, _) = sample_data();
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let inside = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, inside, Modifiers::NONE);
        editor.pointer_up(1);
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn test_second_pointer_is_ignored_while_dragging() {
        let (data, kitchen_door, _) = sample_data();
        let mut editor = editor_with(data);

        let inside = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, inside, Modifiers::NONE);
        // Second pointer lands on the hall; it must not steal the capture
        // or flip selection.
        let hall_inside = editor.camera().world_to_screen(Point::new(11.0, 11.0));
        editor.pointer_down(2, hall_inside, Modifiers::NONE);
        assert_eq!(editor.selected_room_id(), Some(kitchen_door.room_id));

        // Moves from the second pointer are ignored.
        let before = editor
            .floor()
            .unwrap()
            .room_pos(kitchen_door.room_id)
            .unwrap();
        editor.pointer_move(2, Point::new(hall_inside.x + 100.0, hall_inside.y));
        assert_eq!(
            editor
                .floor()
                .unwrap()
                .room_pos(kitchen_door.room_id)
                .unwrap(),
            before
        );
    }

    #[test]
    fn test_pointer_cancel_cleans_up_without_persisting() {
        let (data, _, _) = sample_data();
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let inside = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, inside, Modifiers::NONE);
        editor.pointer_move(1, Point::new(inside.x + 40.0, inside.y));
        editor.pointer_cancel(1);
        assert_eq!(*changes.borrow(), 0);

        // A new capture works afterwards. The cancelled capture left the
        // room selected, so one click deselects before re-arming.
        click(&mut editor, inside, Modifiers::NONE);
        editor.pointer_down(1, inside, Modifiers::NONE);
        editor.pointer_move(1, Point::new(inside.x + 80.0, inside.y));
        editor.pointer_up(1);
        assert_eq!(*changes.borrow(), 1);
    }

    #[test]
    fn test_door_link_click_sequence() {
        let (data, kitchen_door, hall_door) = sample_data();
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        // First click selects the hall door as pending.
        let hall_marker = marker_screen(&editor, hall_door);
        click(&mut editor, hall_marker, Modifiers::NONE);
        assert_eq!(editor.pending_door(), Some(hall_door));
        assert_eq!(*changes.borrow(), 0);

        // Second click on the kitchen door completes the link; the hall
        // (selected first) moves to (4, 0.5).
        let kitchen_marker = marker_screen(&editor, kitchen_door);
        let response = click(&mut editor, kitchen_marker, Modifiers::NONE);
        assert!(response.rejection.is_none());
        assert_eq!(editor.pending_door(), None);
        assert_eq!(*changes.borrow(), 1);

        let floor = editor.floor().unwrap();
        let hall_pos = floor.room_pos(hall_door.room_id).unwrap();
        assert!((hall_pos.x - 4.0).abs() < 1e-9);
        assert!((hall_pos.y - 0.5).abs() < 1e-9);
        assert_eq!(floor.door(kitchen_door).unwrap().linked_door, Some(hall_door));
        assert_eq!(floor.door(hall_door).unwrap().linked_door, Some(kitchen_door));
        assert_eq!(floor.plan2d.links.len(), 1);
    }

    #[test]
    fn test_clicking_pending_door_again_deselects() {
        let (data, _, hall_door) = sample_data();
        let mut editor = editor_with(data);

        let marker = marker_screen(&editor, hall_door);
        click(&mut editor, marker, Modifiers::NONE);
        assert_eq!(editor.pending_door(), Some(hall_door));
        click(&mut editor, marker, Modifiers::NONE);
        assert_eq!(editor.pending_door(), None);
    }

    #[test]
    fn test_non_opposite_walls_rejected_pending_preserved() {
        let (mut data, _, hall_door) = sample_data();
        // Add a north door to the kitchen; N vs W is not a facing pair.
        let kitchen_id = data.floor.rooms[0].id;
        let north_door = data.floor.rooms[0].add_door(Door::new(Wall::North, 0.5, 0.9));
        let north_ref = DoorRef {
            room_id: kitchen_id,
            door_id: north_door,
        };

        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let hall_marker = marker_screen(&editor, hall_door);
        click(&mut editor, hall_marker, Modifiers::NONE);
        assert_eq!(editor.pending_door(), Some(hall_door));

        let north_marker = marker_screen(&editor, north_ref);
        let response = click(&mut editor, north_marker, Modifiers::NONE);
        assert_eq!(
            response.rejection,
            Some(LinkError::WallsNotOpposite {
                a: Wall::West,
                b: Wall::North
            })
        );
        // Pending selection survives the rejection; nothing persisted.
        assert_eq!(editor.pending_door(), Some(hall_door));
        assert!(editor.floor().unwrap().plan2d.links.is_empty());
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn test_alt_click_unlinks() {
        let (data, kitchen_door, hall_door) = sample_data();
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let hall_marker = marker_screen(&editor, hall_door);
        click(&mut editor, hall_marker, Modifiers::NONE);
        let kitchen_marker = marker_screen(&editor, kitchen_door);
        click(&mut editor, kitchen_marker, Modifiers::NONE);
        assert_eq!(*changes.borrow(), 1);

        // Markers moved with the hall; re-resolve before the alt-click.
        let hall_marker = marker_screen(&editor, hall_door);
        click(&mut editor, hall_marker, Modifiers::alt());
        assert_eq!(*changes.borrow(), 2);

        let floor = editor.floor().unwrap();
        assert!(floor.plan2d.links.is_empty());
        assert_eq!(floor.door(kitchen_door).unwrap().linked_door, None);
        assert_eq!(floor.door(hall_door).unwrap().linked_door, None);
    }

    #[test]
    fn test_wheel_zoom_requires_modifier_and_clamps() {
        let (data, _, _) = sample_data();
        let mut editor = editor_with(data);

        editor.wheel(-1.0, Modifiers::NONE);
        assert!((editor.zoom() - 1.0).abs() < 1e-12);

        editor.wheel(-1.0, Modifiers::ctrl());
        assert!((editor.zoom() - 1.1).abs() < 1e-12);

        for _ in 0..100 {
            editor.wheel(-1.0, Modifiers::ctrl());
        }
        assert!((editor.zoom() - crate::camera::MAX_ZOOM).abs() < 1e-12);

        for _ in 0..100 {
            editor.wheel(1.0, Modifiers::ctrl());
        }
        assert!((editor.zoom() - crate::camera::MIN_ZOOM).abs() < 1e-12);
    }

    #[test]
    fn test_space_drag_pans_without_persisting() {
        let (data, kitchen_door, _) = sample_data();
        let mut editor = editor_with(data);
        let changes = change_counter(&mut editor);

        let inside = editor.camera().world_to_screen(Point::new(2.0, 1.5));
        editor.pointer_down(1, inside, Modifiers::space());
        editor.pointer_move(1, Point::new(inside.x + 30.0, inside.y - 10.0));
        editor.pointer_up(1);

        let pan = editor.camera().pan();
        assert!((pan.x - 30.0).abs() < 1e-12);
        assert!((pan.y + 10.0).abs() < 1e-12);
        // The room under the pointer did not move and nothing persisted.
        assert_eq!(
            editor
                .floor()
                .unwrap()
                .room_pos(kitchen_door.room_id)
                .unwrap(),
            Point::ZERO
        );
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn test_view_persistence_is_configurable() {
        let (data, _, _) = sample_data();
        let mut editor = editor_with(data.clone());
        editor.set_zoom(2.0);
        let view = editor.floor().unwrap().plan2d.view.unwrap();
        assert!((view.zoom - 2.0).abs() < 1e-12);

        let mut editor = PlanEditor::new(EditorConfig {
            persist_view: false,
            ..EditorConfig::default()
        });
        editor.set_data(data);
        editor.set_zoom(2.0);
        assert!(editor.floor().unwrap().plan2d.view.is_none());
    }

    #[test]
    fn test_registry_tracks_order_and_selection() {
        let (data, kitchen_door, _) = sample_data();
        let mut editor = editor_with(data);

        let entries = editor.registry();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Kitchen");
        assert_eq!(entries[0].area_m2, 12.0);
        assert_eq!(entries[1].name, "Hall");
        assert!(!entries[0].selected);

        let response = editor.registry_click(kitchen_door.room_id);
        assert!(response.redraw);
        assert!(editor.registry()[0].selected);

        // Registry clicks select without toggling.
        editor.registry_click(kitchen_door.room_id);
        assert_eq!(editor.selected_room_id(), Some(kitchen_door.room_id));
    }

    #[test]
    fn test_render_draws_rooms_doors_and_links() {
        let (data, kitchen_door, hall_door) = sample_data();
        let mut editor = editor_with(data);

        let hall_marker = marker_screen(&editor, hall_door);
        click(&mut editor, hall_marker, Modifiers::NONE);
        let kitchen_marker = marker_screen(&editor, kitchen_door);
        click(&mut editor, kitchen_marker, Modifiers::NONE);
        editor.set_selected_room_id(Some(kitchen_door.room_id));

        let mut surface = RecordingSurface::new();
        editor.render(&mut surface);

        assert_eq!(surface.commands.first(), Some(&DrawCmd::Clear));
        assert_eq!(
            surface.count_kind(|k| matches!(k, NodeKind::RoomBox { .. })),
            2
        );
        assert_eq!(
            surface.count_kind(|k| matches!(k, NodeKind::RoomBox { selected: true })),
            1
        );
        assert_eq!(
            surface.count_kind(|k| matches!(k, NodeKind::DoorMarker { linked: true, .. })),
            2
        );
        assert_eq!(surface.count_kind(|k| k == NodeKind::LinkLine), 1);

        // Render is idempotent: a second pass produces the same commands.
        let commands = surface.commands.clone();
        editor.render(&mut surface);
        assert_eq!(surface.commands, commands);
    }

    #[test]
    fn test_render_skips_rooms_without_positions() {
        let (mut data, _, _) = sample_data();
        data.floor.plan2d.room_pos.clear();
        let editor = editor_with(data);

        let mut surface = RecordingSurface::new();
        editor.render(&mut surface);
        assert_eq!(
            surface.count_kind(|k| matches!(k, NodeKind::RoomBox { .. })),
            0
        );
    }
}
