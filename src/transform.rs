//! Geo-referencing of floor grids.
//!
//! A floor grid is stretched over the building footprint given by four
//! corner points. Grid (0, 0) sits on the north corner, the top row runs to
//! the east corner, the left column runs to the west corner and the last
//! cell lands on the south corner. Positions in between are bilinearly
//! interpolated, which assumes the footprint is a reasonable quadrilateral.

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, Result};
use crate::geo::GeoPoint;
use crate::grid::GridCell;

const NEWTON_ITERATIONS: usize = 25;
const NEWTON_TOLERANCE: f64 = 1e-12;
/// Slack on the unit square when inverting, in normalized units.
const FOOTPRINT_SLACK: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingCorners {
    pub north: GeoPoint,
    pub west: GeoPoint,
    pub south: GeoPoint,
    pub east: GeoPoint,
}

/// Planar (lng, lat) vector used for the interpolation math.
#[derive(Debug, Clone, Copy)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl From<GeoPoint> for Vec2 {
    fn from(p: GeoPoint) -> Self {
        Self { x: p.longitude, y: p.latitude }
    }
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

impl BuildingCorners {
    pub fn new(north: GeoPoint, west: GeoPoint, south: GeoPoint, east: GeoPoint) -> Self {
        Self { north, west, south, east }
    }

    /// Corners in winding order.
    pub fn ring(&self) -> [GeoPoint; 4] {
        [self.north, self.west, self.south, self.east]
    }

    /// Reject corner sets that cannot carry a bilinear mapping: invalid or
    /// coincident points, zero area, or crossing edges.
    pub fn validate(&self) -> Result<()> {
        let ring = self.ring();
        if ring.iter().any(|p| !p.is_valid()) {
            return Err(CampusError::DegenerateCorners("corner outside coordinate range"));
        }
        for i in 0..4 {
            for j in i + 1..4 {
                if ring[i] == ring[j] {
                    return Err(CampusError::DegenerateCorners("coincident corners"));
                }
            }
        }

        let [n, w, s, e] = ring.map(Vec2::from);
        let doubled_area = cross(n, w, s) + cross(n, s, e);
        if doubled_area.abs() < f64::EPSILON {
            return Err(CampusError::DegenerateCorners("zero area"));
        }
        if segments_intersect(n, w, s, e) || segments_intersect(w, s, e, n) {
            return Err(CampusError::DegenerateCorners("self-intersecting edges"));
        }
        Ok(())
    }

    /// Bilinear blend of the corners at normalized (u, v).
    fn interpolate(&self, u: f64, v: f64) -> Vec2 {
        let [n, w, s, e] = self.ring().map(Vec2::from);
        let blend = |a: f64, b: f64, c: f64, d: f64| {
            a * (1.0 - u) * (1.0 - v) + b * u * (1.0 - v) + c * (1.0 - u) * v + d * u * v
        };
        Vec2 {
            x: blend(n.x, e.x, w.x, s.x),
            y: blend(n.y, e.y, w.y, s.y),
        }
    }

    /// Partial derivatives of `interpolate` with respect to u and v.
    fn jacobian(&self, u: f64, v: f64) -> (Vec2, Vec2) {
        let [n, w, s, e] = self.ring().map(Vec2::from);
        let du = Vec2 {
            x: (e.x - n.x) * (1.0 - v) + (s.x - w.x) * v,
            y: (e.y - n.y) * (1.0 - v) + (s.y - w.y) * v,
        };
        let dv = Vec2 {
            x: (w.x - n.x) * (1.0 - u) + (s.x - e.x) * u,
            y: (w.y - n.y) * (1.0 - u) + (s.y - e.y) * u,
        };
        (du, dv)
    }
}

fn normalize(index: usize, extent: usize) -> f64 {
    if extent > 1 {
        index as f64 / (extent - 1) as f64
    } else {
        0.0
    }
}

/// Geographic position of a grid cell.
///
/// Corners follow the N→W→S→E winding: (0,0) is north, (W−1,0) east,
/// (0,H−1) west and (W−1,H−1) south.
pub fn cell_to_geo(cell: GridCell, corners: &BuildingCorners, width: usize, height: usize) -> GeoPoint {
    let p = corners.interpolate(normalize(cell.x, width), normalize(cell.y, height));
    GeoPoint::new(p.y, p.x)
}

/// Inverse of [`cell_to_geo`]: nearest grid cell for a point inside the
/// footprint, or `None` outside it.
pub fn geo_to_cell(
    point: GeoPoint,
    corners: &BuildingCorners,
    width: usize,
    height: usize,
) -> Option<GridCell> {
    if width == 0 || height == 0 || !point.is_valid() {
        return None;
    }

    let target = Vec2::from(point);
    let (mut u, mut v) = (0.5, 0.5);
    for _ in 0..NEWTON_ITERATIONS {
        let p = corners.interpolate(u, v);
        let (fx, fy) = (p.x - target.x, p.y - target.y);
        if fx.abs() < NEWTON_TOLERANCE && fy.abs() < NEWTON_TOLERANCE {
            break;
        }
        let (du, dv) = corners.jacobian(u, v);
        let det = du.x * dv.y - dv.x * du.y;
        if det.abs() < f64::MIN_POSITIVE {
            return None;
        }
        u -= (fx * dv.y - dv.x * fy) / det;
        v -= (du.x * fy - fx * du.y) / det;
    }

    let in_range = |t: f64| t.is_finite() && (-FOOTPRINT_SLACK..=1.0 + FOOTPRINT_SLACK).contains(&t);
    if !in_range(u) || !in_range(v) {
        return None;
    }

    let to_index = |t: f64, extent: usize| {
        let max = extent.saturating_sub(1);
        ((t.clamp(0.0, 1.0) * max as f64).round() as usize).min(max)
    };
    Some(GridCell::new(to_index(u, width), to_index(v, height)))
}
