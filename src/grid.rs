//! Floor occupancy grids.
//!
//! Grids are authored by hand, one per building floor, as rows of small
//! terrain codes. They are stored row-major and never mutated after load;
//! orientation helpers return new grids.

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, Result};

/// Column/row position inside a floor grid, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

impl GridCell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Decoded terrain code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    /// 0: outside the floor.
    Void,
    /// 1: hallway.
    Corridor,
    /// 2: wall or other obstacle.
    Wall,
    /// 3 and up: elevators, stairs, washrooms. Walkable.
    PointOfInterest(u8),
}

impl Terrain {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Terrain::Void,
            1 => Terrain::Corridor,
            2 => Terrain::Wall,
            other => Terrain::PointOfInterest(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Terrain::Void => 0,
            Terrain::Corridor => 1,
            Terrain::Wall => 2,
            Terrain::PointOfInterest(code) => code,
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Terrain::Corridor | Terrain::PointOfInterest(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct FloorGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl TryFrom<Vec<Vec<u8>>> for FloorGrid {
    type Error = CampusError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        FloorGrid::from_rows(rows)
    }
}

impl From<FloorGrid> for Vec<Vec<u8>> {
    fn from(grid: FloorGrid) -> Self {
        grid.rows()
    }
}

impl FloorGrid {
    /// Build from authored rows. Rejects empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(CampusError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(CampusError::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn code(&self, cell: GridCell) -> Option<u8> {
        self.contains(cell)
            .then(|| self.cells[cell.y * self.width + cell.x])
    }

    pub fn terrain(&self, cell: GridCell) -> Option<Terrain> {
        self.code(cell).map(Terrain::from_code)
    }

    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.terrain(cell).is_some_and(Terrain::is_walkable)
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.width).map(<[u8]>::to_vec).collect()
    }

    /// New grid of size `width` x `height` where each target cell copies
    /// `self` at `source(x, y)`.
    fn remap(&self, width: usize, height: usize, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = source(x, y);
                cells.push(self.cells[sy * self.width + sx]);
            }
        }
        Self { width, height, cells }
    }

    /// Mirror left to right.
    pub fn flip_horizontal(&self) -> Self {
        let w = self.width;
        self.remap(self.width, self.height, |x, y| (w - 1 - x, y))
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&self) -> Self {
        let h = self.height;
        self.remap(self.width, self.height, |x, y| (x, h - 1 - y))
    }

    pub fn transpose(&self) -> Self {
        self.remap(self.height, self.width, |x, y| (y, x))
    }

    /// Quarter turn clockwise. Width and height swap.
    pub fn rotate_clockwise(&self) -> Self {
        let h = self.height;
        self.remap(self.height, self.width, |x, y| (y, h - 1 - x))
    }

    /// Quarter turn counter-clockwise. Width and height swap.
    pub fn rotate_counter_clockwise(&self) -> Self {
        let w = self.width;
        self.remap(self.height, self.width, |x, y| (w - 1 - y, x))
    }
}
