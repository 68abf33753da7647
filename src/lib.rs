//! `surfcast` - rated surf forecasts for a list of beaches
//!
//! This library fetches marine-weather samples from StormGlass, normalizes and
//! caches them, rates every hour against each beach's orientation and merges
//! all beaches into one chronological forecast feed.

pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod rating;
pub mod weather;

// Re-export core types for public API
pub use cache::{ForecastCache, InMemoryCache, PersistentCache};
pub use config::SurfcastConfig;
pub use error::{ClientError, ForecastProcessingInternalError, SurfcastError};
pub use forecast::ForecastAggregator;
pub use models::{Beach, BeachForecastPoint, ForecastPoint, GeoPosition, TimeForecast};
pub use rating::RatingEngine;
pub use weather::{HttpRequest, StormGlass, WeatherClient};

/// Result type for configuration and storage operations
pub type Result<T> = std::result::Result<T, SurfcastError>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
