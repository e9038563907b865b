//! Cost matrix construction and weather penalties.

use tracing::debug;

use crate::campus::Campus;
use crate::geo::GeoPoint;
use crate::haversine::HaversineMatrix;
use crate::traits::{DistanceMatrixProvider, Located};

/// Square cost matrix. Index 0 is the starting location by convention.
pub type DistanceMatrix = Vec<Vec<f64>>;

/// Multiplier applied to legs without an indoor connection in bad weather.
pub const DEFAULT_OUTDOOR_PENALTY: f64 = 1.5;

/// Pairwise haversine distances in meters.
pub fn build_matrix<L: Located>(items: &[L]) -> DistanceMatrix {
    let points: Vec<GeoPoint> = items.iter().map(Located::location).collect();
    HaversineMatrix::default().matrix_for(&points)
}

/// Scale every leg whose endpoint buildings are not indoor-connected.
///
/// Entries are visited per ordered pair, so the result is only symmetric if
/// the input was. Callers apply this only when the weather is adverse.
pub fn apply_weather_penalty(
    mut matrix: DistanceMatrix,
    points: &[GeoPoint],
    campus: &Campus,
    outdoor_penalty: f64,
) -> DistanceMatrix {
    let nearest: Vec<_> = points.iter().map(|p| campus.nearest_building(*p)).collect();
    let mut penalized = 0usize;

    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, cost) in row.iter_mut().enumerate() {
            if i == j {
                continue;
            }
            let connected = match (nearest.get(i).copied().flatten(), nearest.get(j).copied().flatten()) {
                (Some(a), Some(b)) => campus.indoor_connected(a, b),
                _ => false,
            };
            if !connected {
                *cost *= outdoor_penalty;
                penalized += 1;
            }
        }
    }

    debug!(penalized, outdoor_penalty, "applied weather penalty");
    matrix
}

/// True when `m[i][j] == m[j][i]` for every pair.
pub fn is_symmetric(matrix: &[Vec<f64>]) -> bool {
    matrix.iter().enumerate().all(|(i, row)| {
        row.iter()
            .enumerate()
            .all(|(j, cost)| matrix.get(j).and_then(|r| r.get(i)) == Some(cost))
    })
}
