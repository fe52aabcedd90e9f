//! Native shell: builds or loads a survey project, drives the 2D plan
//! editor headlessly, renders the floor to an SVG file, and prints a
//! price estimate.

use std::error::Error;
use std::path::PathBuf;

use kurbo::Point;
use pudorys_core::geometry;
use pudorys_core::model::{Door, Floor, Project, Room, Wall, Window};
use pudorys_core::pricing::{self, Condition, EstimateExport, EstimateInput, Locality, PropertyKind};
use pudorys_core::storage::{FileStore, ProjectStore};
use pudorys_core::{DoorRef, EditorData, Modifiers, PlanEditor, Response};
use pudorys_render::SvgSurface;

const PLAN_SVG_PATH: &str = "pudorys-plan.svg";
const STORE_DIR: &str = "pudorys-data";

fn sample_project() -> Project {
    let mut project = Project::new("Sample survey");
    let mut floor = Floor::new("Ground floor");

    let mut kitchen = Room::new("Kitchen", 4.0, 3.0);
    kitchen.add_door(Door::new(Wall::East, 1.0, 0.9));
    kitchen.add_window(Window::new(Wall::North, 1.5, 1.2));
    floor.add_room_at(kitchen, Point::new(0.0, 0.0));

    let mut hall = Room::new("Hall", 3.0, 3.0);
    hall.add_door(Door::new(Wall::West, 0.5, 0.9));
    floor.add_room_at(hall, Point::new(10.0, 10.0));

    project.floors.push(floor);
    project
}

/// The first door of each of the first two rooms, second room first (the
/// first-selected room is the one the link moves).
fn demo_door_pair(floor: &Floor) -> Option<(DoorRef, DoorRef)> {
    let a = floor.rooms.first()?;
    let b = floor.rooms.get(1)?;
    let door_a = a.openings.doors.first()?;
    let door_b = b.openings.doors.first()?;
    Some((
        DoorRef {
            room_id: b.id,
            door_id: door_b.id,
        },
        DoorRef {
            room_id: a.id,
            door_id: door_a.id,
        },
    ))
}

fn marker_screen(editor: &PlanEditor, door: DoorRef) -> Option<Point> {
    let center = geometry::door_center(editor.floor()?, door)?;
    Some(editor.camera().world_to_screen(center))
}

fn click(editor: &mut PlanEditor, at: Point) -> Response {
    let down = editor.pointer_down(1, at, Modifiers::NONE);
    let up = editor.pointer_up(1);
    Response {
        redraw: down.redraw || up.redraw,
        rejection: down.rejection.or(up.rejection),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut project = match args.next() {
        Some(path) => {
            log::info!("loading project from {path}");
            Project::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => sample_project(),
    };

    let Some(floor) = project.floors.first().cloned() else {
        return Err("project has no floors".into());
    };
    let door_pair = demo_door_pair(&floor);

    let mut editor = PlanEditor::default();
    editor.on_change(|floor| log::info!("floor {:?} changed", floor.name));
    editor.set_data(EditorData {
        project: project.clone(),
        floor,
    });

    // Join the demo doors by clicking their markers, the same path the
    // browser adapter drives.
    if let Some((first, second)) = door_pair {
        if let (Some(marker_a), Some(marker_b)) = (
            marker_screen(&editor, first),
            marker_screen(&editor, second),
        ) {
            click(&mut editor, marker_a);
            let response = click(&mut editor, marker_b);
            match response.rejection {
                Some(rejection) => log::warn!("link attempt rejected: {rejection}"),
                None => log::info!("linked doors; rooms re-aligned"),
            }
        }
    }

    let mut surface = SvgSurface::new(960.0, 640.0);
    editor.render(&mut surface);
    std::fs::write(PLAN_SVG_PATH, surface.finish())?;

    let total_area = editor.floor().map(Floor::total_area_m2).unwrap_or(0.0);
    let input = EstimateInput {
        kind: PropertyKind::Apartment,
        area_m2: total_area,
        locality: Locality::Prague,
        condition: Condition::Good,
    };
    match pricing::estimate(&input) {
        Ok(result) => {
            let export = EstimateExport::new(input, result);
            println!("{}", export.summary);
            println!("{}", export.to_json()?);
        }
        Err(err) => log::warn!("estimate unavailable: {err}"),
    }

    if let Some(data) = editor.into_data() {
        project.put_floor(data.floor);
    }
    let store = FileStore::new(PathBuf::from(STORE_DIR))?;
    let key = project.id.to_string();
    store.save(&key, &project)?;
    println!("Plan written to {PLAN_SVG_PATH}; project saved under {STORE_DIR}/{key}.json");

    Ok(())
}
