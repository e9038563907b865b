//! Building registry and the indoor-connectivity heuristic.
//!
//! There is no tunnel or skybridge data. Two buildings count as
//! indoor-connected when their reference points are closer than a fixed
//! threshold.

use serde::{Deserialize, Serialize};

use crate::geo::{self, Bounds, GeoPoint};
use crate::traits::Located;

/// Default proximity below which two buildings are treated as connected.
pub const DEFAULT_INDOOR_CONNECTION_M: f64 = 50.0;

/// Building footprint. Reference data comes in two shapes: a flat ring, or
/// an outer ring with courtyard holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Boundary {
    Simple(Vec<GeoPoint>),
    WithHoles {
        outer: Vec<GeoPoint>,
        #[serde(default)]
        inner: Vec<Vec<GeoPoint>>,
    },
}

impl Boundary {
    pub fn outer(&self) -> &[GeoPoint] {
        match self {
            Boundary::Simple(ring) => ring,
            Boundary::WithHoles { outer, .. } => outer,
        }
    }

    pub fn holes(&self) -> &[Vec<GeoPoint>] {
        match self {
            Boundary::Simple(_) => &[],
            Boundary::WithHoles { inner, .. } => inner,
        }
    }

    pub fn bounds(&self) -> Bounds {
        geo::polygon_bounds(self.outer())
    }

    pub fn center(&self) -> GeoPoint {
        geo::polygon_center(self.outer())
    }

    /// Inside the outer ring and outside every hole.
    pub fn contains(&self, point: GeoPoint) -> bool {
        geo::point_in_polygon(point, self.outer())
            && !self
                .holes()
                .iter()
                .any(|hole| geo::point_in_polygon(point, hole))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub boundary: Option<Boundary>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

impl Building {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            boundary: None,
            purpose: None,
            facilities: Vec::new(),
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }
}

impl Located for Building {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Nearest building by straight-line distance to its reference point.
///
/// Ties keep the first building in input order. Returns `None` for an empty
/// list or a malformed point.
pub fn nearest_building(point: GeoPoint, buildings: &[Building]) -> Option<&Building> {
    if !point.is_valid() {
        return None;
    }

    let mut best: Option<(&Building, f64)> = None;
    for building in buildings {
        let d = geo::distance(point, building.location);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((building, d));
        }
    }
    best.map(|(building, _)| building)
}

/// Proximity test between two distinct buildings.
pub fn indoor_connected(a: &Building, b: &Building, threshold_m: f64) -> bool {
    a.id != b.id && geo::distance(a.location, b.location) < threshold_m
}

/// Immutable set of campus buildings, loaded once and shared by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campus {
    buildings: Vec<Building>,
    #[serde(default = "default_connection_threshold")]
    indoor_connection_m: f64,
}

fn default_connection_threshold() -> f64 {
    DEFAULT_INDOOR_CONNECTION_M
}

impl Campus {
    pub fn new(buildings: Vec<Building>) -> Self {
        Self {
            buildings,
            indoor_connection_m: DEFAULT_INDOOR_CONNECTION_M,
        }
    }

    pub fn with_connection_threshold(mut self, meters: f64) -> Self {
        self.indoor_connection_m = meters;
        self
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn connection_threshold(&self) -> f64 {
        self.indoor_connection_m
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn nearest_building(&self, point: GeoPoint) -> Option<&Building> {
        nearest_building(point, &self.buildings)
    }

    pub fn indoor_connected(&self, a: &Building, b: &Building) -> bool {
        indoor_connected(a, b, self.indoor_connection_m)
    }

    /// First building whose footprint contains the point.
    pub fn building_containing(&self, point: GeoPoint) -> Option<&Building> {
        self.buildings.iter().find(|b| {
            b.boundary
                .as_ref()
                .is_some_and(|boundary| boundary.contains(point))
        })
    }
}
