//! Polyline representation for route geometries.
//!
//! Indoor routes leave this crate as decoded coordinate sequences. Encoding
//! for a map widget happens in the caller.

use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint};

/// A route geometry as an ordered list of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of haversine distances between consecutive points.
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| geo::distance(w[0], w[1]))
            .sum()
    }
}
