//! Rendering backends for the pudorys floor-plan editor.
//!
//! The drawing abstraction lives in `pudorys_core::surface`; this crate
//! provides the concrete SVG document backend used headless and by the
//! native shell. The browser adapter builds SVG DOM nodes with the same
//! semantics in `pudorys-web`.

mod svg;

pub use svg::SvgSurface;

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pudorys_core::model::{Door, Floor, Room, Wall};
    use pudorys_core::{EditorData, PlanEditor, Project};

    /// Full pipeline: editor state rendered into SVG markup.
    #[test]
    fn test_editor_renders_floor_to_svg() {
        let mut floor = Floor::new("Ground");

        let mut kitchen = Room::new("Kitchen", 4.0, 3.0);
        kitchen.add_door(Door::new(Wall::East, 1.0, 0.9));
        let kitchen_id = floor.add_room_at(kitchen, Point::new(0.0, 0.0));

        let mut hall = Room::new("Hall", 3.0, 3.0);
        let hall_door = hall.add_door(Door::new(Wall::West, 0.5, 0.9));
        let hall_id = floor.add_room_at(hall, Point::new(5.0, 0.0));

        let kitchen_door = floor.rooms[0].openings.doors[0].id;
        floor.record_link(
            pudorys_core::DoorRef {
                room_id: kitchen_id,
                door_id: kitchen_door,
            },
            pudorys_core::DoorRef {
                room_id: hall_id,
                door_id: hall_door,
            },
        );
        floor.plan2d.selected_room_id = Some(kitchen_id);

        let mut editor = PlanEditor::default();
        editor.set_data(EditorData {
            project: Project::new("Sample"),
            floor,
        });

        let mut surface = SvgSurface::new(800.0, 600.0);
        editor.render(&mut surface);
        let svg = surface.finish();

        // One room box per positioned room, labels, markers, and the
        // connecting link line.
        assert_eq!(svg.matches("<rect class=\"room-box\"").count(), 2);
        assert!(svg.contains(">Kitchen</text>"));
        assert!(svg.contains(">12 m²</text>"));
        assert_eq!(svg.matches("<circle class=\"door-marker\"").count(), 2);
        assert_eq!(svg.matches("<line class=\"link-line\"").count(), 1);
    }
}
