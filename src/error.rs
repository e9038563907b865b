//! Crate error type.
//!
//! Only reference-data loading and lookups are fallible. Search and
//! optimization return empty results instead of errors when nothing is
//! reachable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CampusError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("floor grid has no cells")]
    EmptyGrid,

    #[error("floor grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("building corners do not form a simple quadrilateral: {0}")]
    DegenerateCorners(&'static str),

    #[error("building {0} not found")]
    UnknownBuilding(String),

    #[error("duplicate building id {0}")]
    DuplicateBuilding(String),

    #[error("room {0} not found")]
    UnknownRoom(String),

    #[error("floor plan {building_id}/{floor} has no start locations")]
    NoStartLocation { building_id: String, floor: String },

    #[error("room {room} at ({x}, {y}) lies outside the {width}x{height} grid")]
    RoomOutOfBounds {
        room: String,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CampusError>;
