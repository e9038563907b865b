//! Indoor wayfinding over floor grids.
//!
//! Search runs on the authored grid with 8-way moves, then the cell path is
//! projected onto the building footprint for display.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CampusError, Result};
use crate::geo::GeoPoint;
use crate::grid::{FloorGrid, GridCell};
use crate::polyline::Polyline;
use crate::transform::{self, BuildingCorners};

const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy)]
struct OpenNode {
    f: f64,
    g: f64,
    index: usize,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Reversed so the BinaryHeap pops the lowest f first. Ties prefer the
    // node furthest along.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Octile distance, admissible for unit/√2 step costs.
fn octile(a: GridCell, b: GridCell) -> f64 {
    let dx = a.x.abs_diff(b.x) as f64;
    let dy = a.y.abs_diff(b.y) as f64;
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    hi + (DIAGONAL_COST - 1.0) * lo
}

/// Path cost with unit orthogonal and √2 diagonal steps.
pub fn path_cost(path: &[GridCell]) -> f64 {
    path.windows(2).map(|w| octile(w[0], w[1])).sum()
}

/// Shortest walkable path from `start` to `end`, both included.
///
/// Corridors and points of interest are walkable, walls and void are not.
/// The two endpoints are always treated as walkable since doors and room
/// markers are often drawn on wall cells. A diagonal step is not allowed to
/// squeeze between two blocked cells. Returns an empty path when the end is
/// unreachable or either endpoint is outside the grid.
pub fn find_path(grid: &FloorGrid, start: GridCell, end: GridCell) -> Vec<GridCell> {
    if !grid.contains(start) || !grid.contains(end) {
        warn!(?start, ?end, width = grid.width(), height = grid.height(), "path endpoint outside floor grid");
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }

    let width = grid.width();
    let height = grid.height();
    let total = width * height;
    let to_index = |c: GridCell| c.y * width + c.x;
    let to_cell = |i: usize| GridCell::new(i % width, i / width);
    let walkable = |c: GridCell| c == start || c == end || grid.is_walkable(c);
    let step = |c: GridCell, dx: isize, dy: isize| -> Option<GridCell> {
        let x = c.x.checked_add_signed(dx)?;
        let y = c.y.checked_add_signed(dy)?;
        let next = GridCell::new(x, y);
        grid.contains(next).then_some(next)
    };

    let start_index = to_index(start);
    let end_index = to_index(end);
    let mut best_g = vec![f64::INFINITY; total];
    let mut parent: Vec<Option<usize>> = vec![None; total];
    let mut closed = vec![false; total];
    let mut open = BinaryHeap::new();

    best_g[start_index] = 0.0;
    open.push(OpenNode {
        f: octile(start, end),
        g: 0.0,
        index: start_index,
    });

    let mut expansions = 0usize;
    while let Some(OpenNode { g, index, .. }) = open.pop() {
        if closed[index] {
            continue;
        }
        if index == end_index {
            let mut path = vec![end];
            let mut current = index;
            while let Some(prev) = parent[current] {
                path.push(to_cell(prev));
                current = prev;
            }
            path.reverse();
            debug!(expansions, steps = path.len(), cost = g, "indoor path found");
            return path;
        }
        // Each cell is closed at most once, so there are at most
        // width * height expansions.
        closed[index] = true;
        expansions += 1;

        let cell = to_cell(index);
        for (dx, dy) in DIRECTIONS {
            let Some(next) = step(cell, dx, dy) else {
                continue;
            };
            if !walkable(next) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal {
                let side_a = step(cell, dx, 0).is_some_and(walkable);
                let side_b = step(cell, 0, dy).is_some_and(walkable);
                if !side_a && !side_b {
                    continue;
                }
            }

            let next_index = to_index(next);
            if closed[next_index] {
                continue;
            }
            let tentative = g + if diagonal { DIAGONAL_COST } else { 1.0 };
            if tentative < best_g[next_index] {
                best_g[next_index] = tentative;
                parent[next_index] = Some(index);
                open.push(OpenNode {
                    f: tentative + octile(next, end),
                    g: tentative,
                    index: next_index,
                });
            }
        }
    }

    debug!(expansions, ?start, ?end, "no indoor path");
    Vec::new()
}

/// Project a cell path onto the building footprint.
pub fn path_to_geo(
    path: &[GridCell],
    corners: &BuildingCorners,
    width: usize,
    height: usize,
) -> Vec<GeoPoint> {
    path.iter()
        .map(|cell| transform::cell_to_geo(*cell, corners, width, height))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    #[default]
    Room,
    /// Building entrance where indoor routes begin.
    Start,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub location: GridCell,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
}

/// One floor of one building: the grid, its footprint and its rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub building_id: String,
    pub floor: String,
    pub grid: FloorGrid,
    pub corners: BuildingCorners,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

/// An indoor journey in both grid and map form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndoorRoute {
    pub start_id: String,
    pub room_id: String,
    pub cells: Vec<GridCell>,
    pub polyline: Polyline,
    pub length_meters: f64,
}

impl IndoorRoute {
    /// No walkable connection between the entrance and the room.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FloorPlan {
    /// Check the corners and that every room sits on the grid.
    pub fn validate(&self) -> Result<()> {
        self.corners.validate()?;
        for room in &self.rooms {
            if !self.grid.contains(room.location) {
                return Err(CampusError::RoomOutOfBounds {
                    room: room.id.clone(),
                    x: room.location.x,
                    y: room.location.y,
                    width: self.grid.width(),
                    height: self.grid.height(),
                });
            }
        }
        Ok(())
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn starts(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.kind == RoomKind::Start)
    }

    pub fn find_path(&self, start: GridCell, end: GridCell) -> Vec<GridCell> {
        find_path(&self.grid, start, end)
    }

    pub fn path_to_geo(&self, path: &[GridCell]) -> Vec<GeoPoint> {
        path_to_geo(path, &self.corners, self.grid.width(), self.grid.height())
    }

    /// Route from an entrance to a room.
    ///
    /// With `start_id` the named entrance is used; otherwise every entrance
    /// is tried and the cheapest path wins. An unreachable room yields an
    /// empty route rather than an error.
    pub fn route_to_room(&self, room_id: &str, start_id: Option<&str>) -> Result<IndoorRoute> {
        let room = self
            .room(room_id)
            .ok_or_else(|| CampusError::UnknownRoom(room_id.to_string()))?;

        let candidates: Vec<&Room> = match start_id {
            Some(id) => vec![self.room(id).ok_or_else(|| CampusError::UnknownRoom(id.to_string()))?],
            None => self.starts().collect(),
        };
        let Some(first) = candidates.first() else {
            return Err(CampusError::NoStartLocation {
                building_id: self.building_id.clone(),
                floor: self.floor.clone(),
            });
        };

        let mut best: Option<(&Room, Vec<GridCell>, f64)> = None;
        for &start in &candidates {
            let cells = self.find_path(start.location, room.location);
            if cells.is_empty() {
                continue;
            }
            let cost = path_cost(&cells);
            if best.as_ref().is_none_or(|(_, _, best_cost)| cost < *best_cost) {
                best = Some((start, cells, cost));
            }
        }

        let (start, cells) = match best {
            Some((start, cells, _)) => (start, cells),
            None => {
                warn!(building = %self.building_id, floor = %self.floor, room = room_id, "room unreachable from every entrance");
                (*first, Vec::new())
            }
        };

        let polyline = Polyline::new(self.path_to_geo(&cells));
        Ok(IndoorRoute {
            start_id: start.id.clone(),
            room_id: room.id.clone(),
            length_meters: polyline.length_meters(),
            cells,
            polyline,
        })
    }
}
