//! Hall Building, 8th floor.
//!
//! Two corridors cross in the middle of the floor, with a side loop in the
//! north-west wing. Rooms sit on wall cells next to a corridor.

use campus_planner::geo::GeoPoint;
use campus_planner::grid::{FloorGrid, GridCell};
use campus_planner::indoor::{FloorPlan, Room, RoomKind};
use campus_planner::transform::BuildingCorners;

pub const HALL_8_ROWS: &[&[u8]] = &[
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 3, 4, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 0],
    &[0, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 5, 1, 2, 2, 0],
    &[0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

pub fn hall_8_grid() -> FloorGrid {
    FloorGrid::from_rows(HALL_8_ROWS.iter().map(|row| row.to_vec()).collect())
        .expect("fixture grid is rectangular")
}

pub fn hall_corners() -> BuildingCorners {
    BuildingCorners::new(
        GeoPoint::new(45.4977, -73.5795),
        GeoPoint::new(45.4968, -73.5800),
        GeoPoint::new(45.4964, -73.5787),
        GeoPoint::new(45.4974, -73.5783),
    )
}

fn room(id: &str, name: &str, x: usize, y: usize, kind: RoomKind) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        location: GridCell::new(x, y),
        kind,
    }
}

pub fn hall_8_plan() -> FloorPlan {
    FloorPlan {
        building_id: "H".to_string(),
        floor: "8".to_string(),
        grid: hall_8_grid(),
        corners: hall_corners(),
        rooms: vec![
            room("main-entrance", "Main escalators", 9, 18, RoomKind::Start),
            room("west-entrance", "West stairwell", 1, 9, RoomKind::Start),
            room("H-837", "Computer lab", 18, 10, RoomKind::Room),
            room("H-811", "Seminar room", 4, 6, RoomKind::Room),
            room("H-860", "Study lounge", 16, 16, RoomKind::Room),
            room("H-899", "Mechanical room", 14, 4, RoomKind::Room),
        ],
    }
}
