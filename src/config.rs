//! Static campus reference data.
//!
//! Buildings, floor plans and solver settings are authored offline as one
//! JSON document, loaded once at startup and then shared read-only.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::campus::{Building, Campus};
use crate::error::{CampusError, Result};
use crate::indoor::FloorPlan;
use crate::solver::SolveOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusData {
    pub campus: Campus,
    #[serde(default)]
    pub floors: Vec<FloorPlan>,
    #[serde(default)]
    pub options: SolveOptions,
}

impl CampusData {
    pub fn new(buildings: Vec<Building>, floors: Vec<FloorPlan>) -> Result<Self> {
        let data = Self {
            campus: Campus::new(buildings),
            floors,
            options: SolveOptions::default(),
        };
        data.validate()?;
        Ok(data)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        debug!(
            buildings = data.campus.buildings().len(),
            floors = data.floors.len(),
            "loaded campus data"
        );
        Ok(data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Building ids must be unique, coordinates valid, and every floor plan
    /// must belong to a known building and pass its own checks.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for building in self.campus.buildings() {
            if !building.location.is_valid() {
                return Err(CampusError::InvalidCoordinate {
                    latitude: building.location.latitude,
                    longitude: building.location.longitude,
                });
            }
            if !seen.insert(building.id.as_str()) {
                return Err(CampusError::DuplicateBuilding(building.id.clone()));
            }
        }

        for floor in &self.floors {
            if !seen.contains(floor.building_id.as_str()) {
                return Err(CampusError::UnknownBuilding(floor.building_id.clone()));
            }
            floor.validate()?;
        }
        Ok(())
    }

    pub fn floor(&self, building_id: &str, floor: &str) -> Option<&FloorPlan> {
        self.floors
            .iter()
            .find(|f| f.building_id == building_id && f.floor == floor)
    }

    pub fn floors_of<'a>(&'a self, building_id: &'a str) -> impl Iterator<Item = &'a FloorPlan> {
        self.floors.iter().filter(move |f| f.building_id == building_id)
    }
}
