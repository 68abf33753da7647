//! StormGlass marine-weather client
//!
//! Fetches hourly samples for one coordinate pair, keeps only the hours where
//! every metric is reported by the configured source, and caches the result.

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::cache::ForecastCache;
use crate::config::StormGlassConfig;
use crate::error::ClientError;
use crate::models::ForecastPoint;

use super::WeatherClient;
use super::request::{Request, RequestError};

/// Name used in client error messages
pub const SERVICE_NAME: &str = "StormGlass";

const PARAMS: &str =
    "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed";

#[derive(Debug, Deserialize)]
struct StormGlassForecastResponse {
    /// Hours stay untyped so one malformed hour is skipped instead of failing the response
    hours: Vec<Value>,
}

pub struct StormGlass<R, C> {
    request: R,
    cache: C,
    config: StormGlassConfig,
}

impl<R: Request, C: ForecastCache> StormGlass<R, C> {
    pub fn new(request: R, cache: C, config: StormGlassConfig) -> Self {
        Self {
            request,
            cache,
            config,
        }
    }

    /// Deterministic cache key for a coordinate pair
    #[must_use]
    pub fn cache_key(lat: f64, lng: f64) -> String {
        format!("forecast_points_{lat}_{lng}")
    }

    async fn fetch_from_provider(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, ClientError> {
        let url = self.forecast_url(lat, lng);
        let headers: Vec<(&str, &str)> = self
            .config
            .api_token
            .as_deref()
            .map(|token| vec![("Authorization", token)])
            .unwrap_or_default();

        let raw = self
            .request
            .get(&url, &headers)
            .await
            .map_err(|e| {
                let err = Self::client_error(e);
                error!("{}", err);
                err
            })?;

        let response: StormGlassForecastResponse = serde_json::from_value(raw).map_err(|e| {
            let err = ClientError::communication(SERVICE_NAME, e.to_string());
            error!("{}", err);
            err
        })?;

        let total_hours = response.hours.len();
        let points = self.normalize_response(response);
        info!(
            "Fetched {} complete forecast points ({} incomplete hours skipped)",
            points.len(),
            total_hours - points.len()
        );

        Ok(points)
    }

    fn forecast_url(&self, lat: f64, lng: f64) -> String {
        let end = (Utc::now() + Duration::days(i64::from(self.config.forecast_days))).timestamp();
        format!(
            "{}/weather/point?lat={}&lng={}&params={}&source={}&end={}",
            self.config.api_url.trim_end_matches('/'),
            lat,
            lng,
            PARAMS,
            urlencoding::encode(&self.config.source),
            end
        )
    }

    fn client_error(error: RequestError) -> ClientError {
        match error {
            RequestError::Transport { message } => ClientError::communication(SERVICE_NAME, message),
            RequestError::Response { status, data } => {
                ClientError::service_response(SERVICE_NAME, status, data)
            }
        }
    }

    fn normalize_response(&self, response: StormGlassForecastResponse) -> Vec<ForecastPoint> {
        response
            .hours
            .into_iter()
            .filter_map(|hour| self.normalize_point(&hour))
            .collect()
    }

    /// `None` unless every metric has a numeric value for the configured source
    fn normalize_point(&self, hour: &Value) -> Option<ForecastPoint> {
        let source = self.config.source.as_str();
        let value = |metric: &str| hour.get(metric)?.get(source)?.as_f64();

        Some(ForecastPoint {
            time: hour.get("time")?.as_str()?.to_string(),
            swell_direction: value("swellDirection")?,
            swell_height: value("swellHeight")?,
            swell_period: value("swellPeriod")?,
            wave_direction: value("waveDirection")?,
            wave_height: value("waveHeight")?,
            wind_direction: value("windDirection")?,
            wind_speed: value("windSpeed")?,
        })
    }
}

impl<R: Request, C: ForecastCache> WeatherClient for StormGlass<R, C> {
    /// Normalized forecast points for the coordinates, served from cache when present
    #[instrument(skip(self))]
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, ClientError> {
        let key = Self::cache_key(lat, lng);

        match self.cache.get::<Vec<ForecastPoint>>(&key).await {
            Ok(Some(points)) => {
                debug!("Returning {} forecast points from cache", points.len());
                return Ok(points);
            }
            Ok(None) => debug!("No cached forecast points for {}", key),
            Err(e) => warn!("Failed to read forecast cache, fetching from provider: {:#}", e),
        }

        let points = self.fetch_from_provider(lat, lng).await?;

        if let Err(e) = self.cache.put(&key, &points).await {
            warn!("Failed to cache forecast points for {}: {:#}", key, e);
        }

        Ok(points)
    }
}
