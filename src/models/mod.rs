//! Data models for the surf forecast pipeline
//!
//! - Beach: a user's beach and the direction it faces
//! - Forecast: normalized provider samples and the rated, per-time feed

pub mod beach;
pub mod forecast;

pub use beach::{Beach, GeoPosition};
pub use forecast::{BeachForecastPoint, ForecastPoint, TimeForecast};
