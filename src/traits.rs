//! Seams between the optimizer and its inputs.

use crate::geo::GeoPoint;

/// Provides an all-pairs cost matrix for a set of locations.
///
/// The matrix is indexed by the provided location order. Costs are in meters
/// (or meter-equivalents once penalties are applied).
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[GeoPoint]) -> Vec<Vec<f64>>;
}

/// Anything that can be placed on the campus map.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}
