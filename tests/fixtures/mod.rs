//! Test fixtures for campus-planner.
//!
//! Provides realistic test data including:
//! - Concordia SGW and Loyola building reference points
//! - A hand-authored Hall Building floor grid with its footprint corners

pub mod concordia_locations;
pub mod hall_floor;

pub use concordia_locations::*;
pub use hall_floor::*;
