//! Errand sequencing: nearest-neighbor construction plus 2-opt refinement.
//!
//! Tours are Hamiltonian paths anchored at the start index. There is no
//! return leg.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::campus::{Building, Campus};
use crate::geo::GeoPoint;
use crate::haversine::HaversineMatrix;
use crate::matrix::{self, DEFAULT_OUTDOOR_PENALTY};
use crate::traits::{DistanceMatrixProvider, Located};
use crate::weather::{DEFAULT_COLD_THRESHOLD_C, WeatherContext};

/// Label used for the starting stop.
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Improvement must beat this to count, so float noise cannot cause cycling.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolveOptions {
    /// Multiplier for non-connected legs in adverse weather.
    pub outdoor_penalty: f64,
    /// Base walking speed in meters per second.
    pub walking_speed_mps: f64,
    /// Temperatures below this count as cold.
    pub cold_threshold_c: f64,
    /// Overrides the campus indoor-connection distance for this solve.
    /// `None` keeps the campus value (50 m unless the data says otherwise).
    pub indoor_connection_threshold_m: Option<f64>,
    /// Cap on full 2-opt sweeps. `None` means n².
    pub max_two_opt_passes: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            outdoor_penalty: DEFAULT_OUTDOOR_PENALTY,
            walking_speed_mps: 1.4,
            cold_threshold_c: DEFAULT_COLD_THRESHOLD_C,
            indoor_connection_threshold_m: None,
            max_two_opt_passes: None,
        }
    }
}

/// A user errand already matched to a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLocation {
    pub building: Building,
    pub task_description: String,
}

impl TaskLocation {
    pub fn new(building: Building, task_description: impl Into<String>) -> Self {
        Self {
            building,
            task_description: task_description.into(),
        }
    }
}

impl Located for TaskLocation {
    fn location(&self) -> GeoPoint {
        self.building.location
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub label: String,
    pub location: GeoPoint,
    pub building_id: Option<String>,
    pub task: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: String,
    pub to: String,
    pub distance_meters: u32,
    /// Estimated share of the leg walked indoors, 0..=100.
    pub indoor_percentage: u8,
    pub time_estimate_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Stops in visiting order, starting with the current location.
    pub path: Vec<RouteStop>,
    pub segments: Vec<RouteSegment>,
    pub total_distance: u32,
    pub total_indoor_percentage: u8,
    pub total_time_minutes: u32,
}

/// Greedy tour: always step to the cheapest unvisited index from the
/// current one.
///
/// Non-finite costs count as unreachable. If nothing unvisited is reachable
/// the tour stops early.
pub fn nearest_neighbor_tour(matrix: &[Vec<f64>], start: usize) -> Vec<usize> {
    let n = matrix.len();
    if start >= n {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    tour.push(current);

    while tour.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (j, &cost) in matrix[current].iter().enumerate() {
            if visited[j] || !cost.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((j, cost));
            }
        }

        let Some((next, _)) = best else {
            warn!(visited = tour.len(), total = n, "nearest-neighbor tour ran out of reachable stops");
            break;
        };
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

/// Directional cost of walking the tour in order.
pub fn tour_cost(matrix: &[Vec<f64>], tour: &[usize]) -> f64 {
    tour.windows(2).map(|w| matrix[w[0]][w[1]]).sum()
}

/// Cost of `tour[from..=to]` walked forwards, and walked backwards.
fn segment_costs(matrix: &[Vec<f64>], tour: &[usize], from: usize, to: usize) -> (f64, f64) {
    let mut forward = 0.0;
    let mut backward = 0.0;
    for k in from..to {
        forward += matrix[tour[k]][tour[k + 1]];
        backward += matrix[tour[k + 1]][tour[k]];
    }
    (forward, backward)
}

/// One sweep over all segment reversals. Returns true if the tour changed.
fn two_opt_pass(matrix: &[Vec<f64>], tour: &mut [usize]) -> bool {
    let n = tour.len();
    let mut improved = false;

    // Reversing tour[i+1..=j] replaces edges (i, i+1) and (j, j+1) with
    // (i, j) and (i+1, j+1). The first stop never moves.
    for i in 0..n.saturating_sub(2) {
        for j in i + 2..n {
            let a = tour[i];
            let b = tour[i + 1];
            let c = tour[j];
            let tail = tour.get(j + 1).copied();

            let mut before = matrix[a][b];
            let mut after = matrix[a][c];
            if let Some(d) = tail {
                before += matrix[c][d];
                after += matrix[b][d];
            }
            // Inner edges flip direction, which only matters for
            // asymmetric costs.
            let (forward, backward) = segment_costs(matrix, tour, i + 1, j);
            before += forward;
            after += backward;

            if after < before - IMPROVEMENT_EPSILON {
                tour[i + 1..=j].reverse();
                improved = true;
            }
        }
    }

    improved
}

/// 2-opt local search over an open path.
///
/// Only strictly improving reversals are applied and sweeps stop after
/// `max_passes` (n² if `None`), so the result is never worse than the
/// input and the loop always terminates.
pub fn two_opt_improve(matrix: &[Vec<f64>], tour: Vec<usize>, max_passes: Option<usize>) -> Vec<usize> {
    let mut tour = tour;
    let n = tour.len();
    if n < 3 {
        return tour;
    }

    let max_passes = max_passes.unwrap_or(n * n).max(1);
    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        if !two_opt_pass(matrix, &mut tour) {
            debug!(passes, cost = tour_cost(matrix, &tour), "2-opt converged");
            return tour;
        }
    }

    warn!(max_passes, "2-opt pass budget exhausted, returning current tour");
    tour
}

/// Indoor share for a leg between two points.
fn indoor_percentage(
    from: GeoPoint,
    to: GeoPoint,
    campus: &Campus,
    weather: &WeatherContext,
    options: &SolveOptions,
) -> u8 {
    let from_building = campus.nearest_building(from);
    let to_building = campus.nearest_building(to);

    let pct = match (from_building, to_building) {
        (Some(a), Some(b)) if a.id == b.id => 100,
        (Some(a), Some(b)) if campus.indoor_connected(a, b) => 90,
        _ => weather.baseline_indoor_percentage(options.cold_threshold_c),
    };
    pct.min(100)
}

/// Walking time for a leg. More indoor exposure is treated as a more direct
/// walk.
fn time_estimate_seconds(distance_m: f64, indoor_pct: u8, options: &SolveOptions) -> f64 {
    let speed = options.walking_speed_mps * (f64::from(indoor_pct) / 100.0 + 0.5);
    if speed <= 0.0 { 0.0 } else { distance_m / speed }
}

/// Order the errands into one walking route from `current_location`.
pub fn solve(
    tasks: &[TaskLocation],
    current_location: GeoPoint,
    weather: &WeatherContext,
    campus: &Campus,
    options: &SolveOptions,
) -> RoutePlan {
    solve_with(tasks, current_location, weather, campus, &HaversineMatrix::default(), options)
}

/// `solve` with a caller-supplied distance source.
pub fn solve_with<M: DistanceMatrixProvider>(
    tasks: &[TaskLocation],
    current_location: GeoPoint,
    weather: &WeatherContext,
    campus: &Campus,
    matrix_provider: &M,
    options: &SolveOptions,
) -> RoutePlan {
    let mut stops = Vec::with_capacity(tasks.len() + 1);
    stops.push(RouteStop {
        label: CURRENT_LOCATION_LABEL.to_string(),
        location: current_location,
        building_id: None,
        task: None,
    });
    stops.extend(tasks.iter().map(|task| RouteStop {
        label: task.building.name.clone(),
        location: task.location(),
        building_id: Some(task.building.id.clone()),
        task: Some(task.task_description.clone()),
    }));

    if tasks.is_empty() {
        warn!("solve called without tasks");
        return RoutePlan {
            path: stops,
            segments: Vec::new(),
            total_distance: 0,
            total_indoor_percentage: 0,
            total_time_minutes: 0,
        };
    }

    let campus = match options.indoor_connection_threshold_m {
        Some(meters) if meters != campus.connection_threshold() => {
            debug!(meters, "overriding indoor connection threshold");
            Cow::Owned(campus.clone().with_connection_threshold(meters))
        }
        _ => Cow::Borrowed(campus),
    };

    let points: Vec<GeoPoint> = stops.iter().map(|s| s.location).collect();
    let mut distances = matrix_provider.matrix_for(&points);
    if distances.len() != points.len() || distances.iter().any(|row| row.len() != points.len()) {
        warn!(expected = points.len(), "distance provider returned a malformed matrix, using haversine");
        distances = HaversineMatrix::default().matrix_for(&points);
    }
    let costs = if weather.is_adverse(options.cold_threshold_c) {
        matrix::apply_weather_penalty(distances.clone(), &points, &campus, options.outdoor_penalty)
    } else {
        distances.clone()
    };

    let initial = nearest_neighbor_tour(&costs, 0);
    let initial_cost = tour_cost(&costs, &initial);
    let tour = two_opt_improve(&costs, initial, options.max_two_opt_passes);
    debug!(
        stops = points.len(),
        initial_cost,
        final_cost = tour_cost(&costs, &tour),
        "optimized errand order"
    );

    let mut segments = Vec::with_capacity(tour.len().saturating_sub(1));
    let mut total_seconds = 0.0;
    for leg in tour.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let distance = distances[from][to];
        let pct = indoor_percentage(points[from], points[to], &campus, weather, options);
        let seconds = time_estimate_seconds(distance, pct, options);
        total_seconds += seconds;

        segments.push(RouteSegment {
            from: stops[from].label.clone(),
            to: stops[to].label.clone(),
            distance_meters: distance.round() as u32,
            indoor_percentage: pct,
            // Rounded up so a non-zero leg never reports zero seconds.
            time_estimate_seconds: seconds.ceil() as u32,
        });
    }

    let total_distance = segments.iter().map(|s| s.distance_meters).sum();
    let total_indoor_percentage = if segments.is_empty() {
        0
    } else {
        let sum: u32 = segments.iter().map(|s| u32::from(s.indoor_percentage)).sum();
        (f64::from(sum) / segments.len() as f64).round() as u8
    };

    let path = tour.iter().map(|&i| stops[i].clone()).collect();

    RoutePlan {
        path,
        segments,
        total_distance,
        total_indoor_percentage,
        total_time_minutes: (total_seconds / 60.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_matrix(positions: &[f64]) -> Vec<Vec<f64>> {
        positions
            .iter()
            .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    #[test]
    fn test_nearest_neighbor_visits_all() {
        let matrix = line_matrix(&[0.0, 5.0, 1.0, 3.0]);
        let tour = nearest_neighbor_tour(&matrix, 0);
        assert_eq!(tour, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_nearest_neighbor_skips_unreachable() {
        let inf = f64::INFINITY;
        let matrix = vec![
            vec![0.0, 1.0, inf],
            vec![1.0, 0.0, inf],
            vec![inf, inf, 0.0],
        ];
        assert_eq!(nearest_neighbor_tour(&matrix, 0), vec![0, 1]);
    }

    #[test]
    fn test_nearest_neighbor_bad_start() {
        assert!(nearest_neighbor_tour(&line_matrix(&[0.0, 1.0]), 5).is_empty());
    }

    #[test]
    fn test_two_opt_untangles_crossing() {
        // Path along a line visited out of order.
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let tangled = vec![0, 3, 2, 1, 4];
        let before = tour_cost(&matrix, &tangled);
        let improved = two_opt_improve(&matrix, tangled, None);
        assert_eq!(improved, vec![0, 1, 2, 3, 4]);
        assert!(tour_cost(&matrix, &improved) < before);
    }

    #[test]
    fn test_two_opt_keeps_start() {
        let matrix = line_matrix(&[2.0, 0.0, 4.0, 1.0, 3.0]);
        let tour = two_opt_improve(&matrix, vec![0, 1, 2, 3, 4], None);
        assert_eq!(tour[0], 0);
        let mut sorted = tour.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_two_opt_asymmetric_never_worse() {
        let matrix = vec![
            vec![0.0, 1.0, 9.0, 4.0],
            vec![7.0, 0.0, 1.0, 8.0],
            vec![2.0, 6.0, 0.0, 1.0],
            vec![1.0, 2.0, 9.0, 0.0],
        ];
        let start = vec![0, 3, 2, 1];
        let before = tour_cost(&matrix, &start);
        let tour = two_opt_improve(&matrix, start, None);
        assert!(tour_cost(&matrix, &tour) < before);
        assert_eq!(tour[0], 0);
        assert_eq!(tour.len(), 4);
    }

    #[test]
    fn test_two_opt_respects_pass_budget() {
        let matrix = line_matrix(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let tangled = vec![0, 5, 4, 3, 2, 1];
        let tour = two_opt_improve(&matrix, tangled.clone(), Some(1));
        assert!(tour_cost(&matrix, &tour) <= tour_cost(&matrix, &tangled));
    }

    #[test]
    fn test_time_estimate_scales_with_indoor_share() {
        let options = SolveOptions::default();
        let outdoor = time_estimate_seconds(140.0, 0, &options);
        let indoor = time_estimate_seconds(140.0, 100, &options);
        assert!((outdoor - 200.0).abs() < 1e-9);
        assert!(indoor < outdoor);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SolveOptions = serde_json::from_str(r#"{"outdoor_penalty": 2.0}"#).unwrap();
        assert_eq!(options.outdoor_penalty, 2.0);
        assert_eq!(options.walking_speed_mps, 1.4);
        assert!(options.max_two_opt_passes.is_none());
        assert!(options.indoor_connection_threshold_m.is_none());
    }

    #[test]
    fn test_options_reject_unknown_fields() {
        let result = serde_json::from_str::<SolveOptions>(r#"{"indoor_threshold": 100.0}"#);
        assert!(result.is_err());
    }
}
