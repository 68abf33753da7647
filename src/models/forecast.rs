//! Normalized forecast samples and the rated, per-time feed built from them

use serde::{Deserialize, Serialize};

use super::beach::{Beach, GeoPosition};

/// One complete hourly marine-weather sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// ISO-8601 timestamp exactly as reported by the provider
    pub time: String,
    /// Swell direction in degrees (0-360)
    pub swell_direction: f64,
    /// Swell height in meters
    pub swell_height: f64,
    /// Swell period in seconds
    pub swell_period: f64,
    /// Wave direction in degrees (0-360)
    pub wave_direction: f64,
    /// Wave height in meters
    pub wave_height: f64,
    /// Wind direction in degrees (0-360)
    pub wind_direction: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

/// A forecast point attached to the beach it was fetched for, with its rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeachForecastPoint {
    #[serde(flatten)]
    pub point: ForecastPoint,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub position: GeoPosition,
    /// Surf rating, 1 (flat) to 5 (epic)
    pub rating: u8,
}

impl BeachForecastPoint {
    #[must_use]
    pub fn new(beach: &Beach, point: ForecastPoint, rating: u8) -> Self {
        Self {
            point,
            lat: beach.lat,
            lng: beach.lng,
            name: beach.name.clone(),
            position: beach.position,
            rating,
        }
    }

    #[must_use]
    pub fn time(&self) -> &str {
        &self.point.time
    }
}

/// All beaches' rated points sharing one timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeForecast {
    pub time: String,
    pub forecast: Vec<BeachForecastPoint>,
}
