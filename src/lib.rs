//! campus-planner core
//!
//! Errand sequencing across campus buildings and indoor wayfinding over
//! geo-referenced floor grids.

pub mod error;
pub mod geo;
pub mod campus;
pub mod weather;
pub mod traits;
pub mod haversine;
pub mod matrix;
pub mod solver;
pub mod grid;
pub mod transform;
pub mod indoor;
pub mod polyline;
pub mod config;

pub use error::{CampusError, Result};
pub use geo::GeoPoint;
