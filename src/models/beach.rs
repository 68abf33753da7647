//! Beach model and compass orientation buckets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass bucket a bearing falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoPosition {
    N,
    E,
    S,
    W,
}

impl GeoPosition {
    /// The bucket on the other side of the compass
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            GeoPosition::N => GeoPosition::S,
            GeoPosition::S => GeoPosition::N,
            GeoPosition::E => GeoPosition::W,
            GeoPosition::W => GeoPosition::E,
        }
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoPosition::N => write!(f, "N"),
            GeoPosition::E => write!(f, "E"),
            GeoPosition::S => write!(f, "S"),
            GeoPosition::W => write!(f, "W"),
        }
    }
}

/// A beach registered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Display name
    pub name: String,
    /// Direction the beach faces
    pub position: GeoPosition,
    /// Id of the user owning this beach
    #[serde(alias = "user")]
    pub owner: String,
}

impl Beach {
    #[must_use]
    pub fn new(lat: f64, lng: f64, name: impl Into<String>, position: GeoPosition, owner: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
            position,
            owner: owner.into(),
        }
    }
}
