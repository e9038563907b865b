//! Concordia University building reference points.
//!
//! Coordinates are building entrances, rounded to four decimals.

use campus_planner::campus::{Boundary, Building, Campus};
use campus_planner::geo::GeoPoint;
use campus_planner::solver::TaskLocation;

/// A named building with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn building(&self) -> Building {
        Building::new(self.id, self.name, self.point())
    }
}

// ============================================================================
// Sir George Williams campus (downtown)
// ============================================================================

pub const HALL: Location = Location::new("H", "Hall Building", 45.4971, -73.5790);
pub const JMSB: Location = Location::new("MB", "John Molson Building", 45.4954, -73.5791);
pub const LIBRARY: Location = Location::new("LB", "Webster Library", 45.4970, -73.5781);

pub const SGW_BUILDINGS: &[Location] = &[
    HALL,
    JMSB,
    LIBRARY,
    Location::new("EV", "Engineering, Computer Science and Visual Arts", 45.4955, -73.5778),
    Location::new("GM", "Guy-De Maisonneuve Building", 45.4960, -73.5786),
    Location::new("FG", "Faubourg Building", 45.4941, -73.5783),
    Location::new("GN", "Grey Nuns Building", 45.4935, -73.5770),
    Location::new("VA", "Visual Arts Building", 45.4960, -73.5735),
    Location::new("FB", "Faubourg Ste-Catherine Building", 45.4946, -73.5776),
];

// ============================================================================
// Loyola campus
// ============================================================================

pub const LOYOLA_BUILDINGS: &[Location] = &[
    Location::new("CC", "Central Building", 45.4582, -73.6405),
    Location::new("SP", "Richard J. Renaud Science Complex", 45.4577, -73.6414),
    Location::new("AD", "Administration Building", 45.4580, -73.6396),
    Location::new("VL", "Vanier Library", 45.4589, -73.6385),
];

/// Hall footprint as a simple ring around its reference point.
pub fn hall_boundary() -> Boundary {
    Boundary::Simple(vec![
        GeoPoint::new(45.4977, -73.5795),
        GeoPoint::new(45.4968, -73.5800),
        GeoPoint::new(45.4964, -73.5787),
        GeoPoint::new(45.4974, -73.5783),
    ])
}

/// Every building on both campuses.
pub fn all_buildings() -> Vec<Building> {
    SGW_BUILDINGS
        .iter()
        .chain(LOYOLA_BUILDINGS)
        .map(|loc| {
            let building = loc.building();
            if loc.id == HALL.id {
                building.with_boundary(hall_boundary())
            } else {
                building
            }
        })
        .collect()
}

pub fn campus() -> Campus {
    Campus::new(all_buildings())
}

/// Tasks for the given building ids, in order.
pub fn tasks(entries: &[(&str, &str)]) -> Vec<TaskLocation> {
    let campus = campus();
    entries
        .iter()
        .map(|(id, description)| {
            let building = campus
                .building(id)
                .unwrap_or_else(|| panic!("fixture building {} missing", id))
                .clone();
            TaskLocation::new(building, *description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_ids_unique() {
        let buildings = all_buildings();
        let mut ids: Vec<_> = buildings.iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), buildings.len());
    }

    #[test]
    fn test_coordinates_in_montreal() {
        for b in all_buildings() {
            assert!(b.location.latitude > 45.4 && b.location.latitude < 45.6, "{} lat out of range", b.name);
            assert!(b.location.longitude > -73.7 && b.location.longitude < -73.5, "{} lng out of range", b.name);
        }
    }
}
