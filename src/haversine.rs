//! Haversine distance matrix provider.
//!
//! Straight-line walking distance between stops. Campus legs are short enough
//! that the great-circle distance is a fair stand-in for the walked one.

use rayon::prelude::*;

use crate::geo::{self, GeoPoint};
use crate::traits::DistanceMatrixProvider;

/// Below this many locations rows are computed on the calling thread.
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Minimum location count before rows are spread across the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl HaversineMatrix {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    fn row(from_index: usize, from: GeoPoint, locations: &[GeoPoint]) -> Vec<f64> {
        locations
            .iter()
            .enumerate()
            .map(|(j, to)| if from_index == j { 0.0 } else { geo::distance(from, *to) })
            .collect()
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[GeoPoint]) -> Vec<Vec<f64>> {
        if locations.len() >= self.parallel_threshold {
            locations
                .par_iter()
                .enumerate()
                .map(|(i, from)| Self::row(i, *from, locations))
                .collect()
        } else {
            locations
                .iter()
                .enumerate()
                .map(|(i, from)| Self::row(i, *from, locations))
                .collect()
        }
    }
}
