//! Marine-weather providers
//!
//! Each provider fetches raw samples for a coordinate pair and normalizes them
//! into complete [`ForecastPoint`]s.

use crate::error::ClientError;
use crate::models::ForecastPoint;

pub mod request;
pub mod stormglass;

pub use request::{HttpRequest, Request, RequestError};
pub use stormglass::StormGlass;

/// Source of normalized forecast points for a coordinate pair
pub trait WeatherClient {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, ClientError>;
}

impl<W: WeatherClient + ?Sized> WeatherClient for &W {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, ClientError> {
        W::fetch_points(*self, lat, lng).await
    }
}
