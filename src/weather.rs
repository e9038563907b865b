//! Weather context supplied by the caller.

use serde::{Deserialize, Serialize};

/// Below this temperature (°C) walking outside counts as adverse.
pub const DEFAULT_COLD_THRESHOLD_C: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    /// Degrees Celsius.
    pub temperature: f64,
    pub precipitation: bool,
}

impl Default for WeatherContext {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            precipitation: false,
        }
    }
}

impl WeatherContext {
    pub fn new(temperature: f64, precipitation: bool) -> Self {
        Self {
            temperature,
            precipitation,
        }
    }

    pub fn is_cold(&self, cold_threshold_c: f64) -> bool {
        self.temperature < cold_threshold_c
    }

    /// Rain or cold, the conditions under which outdoor legs are penalized.
    pub fn is_adverse(&self, cold_threshold_c: f64) -> bool {
        self.precipitation || self.is_cold(cold_threshold_c)
    }

    /// Indoor share assumed for a leg between unconnected buildings.
    ///
    /// People cut through lobbies more when it is wet or cold out.
    pub fn baseline_indoor_percentage(&self, cold_threshold_c: f64) -> u8 {
        let mut pct = if self.precipitation { 35 } else { 20 };
        if self.is_cold(cold_threshold_c) {
            pct += 10;
        }
        pct
    }
}
