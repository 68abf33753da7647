//! Surf Forecast Aggregation Module
//!
//! Fetches forecast points for every beach, rates them against each beach's
//! orientation and merges everything into one chronological feed where each
//! timestamp lists the beaches from best to worst rating.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, error, info, instrument};

use crate::error::ForecastProcessingInternalError;
use crate::models::{Beach, BeachForecastPoint, ForecastPoint, TimeForecast};
use crate::rating::RatingEngine;
use crate::weather::WeatherClient;

/// Surf forecast service
pub struct ForecastAggregator<W> {
    client: W,
}

impl<W: WeatherClient> ForecastAggregator<W> {
    pub fn new(client: W) -> Self {
        Self { client }
    }

    /// Generate the rated, time-ordered forecast feed for the given beaches.
    ///
    /// All fetches run concurrently and are awaited before anything is merged;
    /// one failed fetch fails the whole call.
    #[instrument(skip_all, fields(beaches = beaches.len()))]
    pub async fn process_forecast_for_beaches(
        &self,
        beaches: &[Beach],
    ) -> Result<Vec<TimeForecast>, ForecastProcessingInternalError> {
        if beaches.is_empty() {
            debug!("No beaches to process");
            return Ok(Vec::new());
        }

        let fetches = beaches
            .iter()
            .map(|beach| self.client.fetch_points(beach.lat, beach.lng));
        let results = join_all(fetches).await;

        let mut rated_beaches = Vec::with_capacity(beaches.len());
        for (beach, result) in beaches.iter().zip(results) {
            let points = result.map_err(|e| {
                error!("Failed to fetch forecast for beach {}: {}", beach.name, e);
                ForecastProcessingInternalError::new(e.to_string())
            })?;
            rated_beaches.push(Self::enrich_beach_points(beach, points));
        }

        let feed = Self::map_forecast_by_time(rated_beaches);
        info!(
            "Generated forecast for {} beaches across {} timestamps",
            beaches.len(),
            feed.len()
        );

        Ok(feed)
    }

    /// Attach beach data and a rating from this beach's own engine
    fn enrich_beach_points(beach: &Beach, points: Vec<ForecastPoint>) -> Vec<BeachForecastPoint> {
        let engine = RatingEngine::new(beach);
        points
            .into_iter()
            .map(|point| {
                let rating = engine.rate(&point);
                BeachForecastPoint::new(beach, point, rating)
            })
            .collect()
    }

    /// Group by exact `time` string in first-seen order, best rating first.
    ///
    /// Equal ratings keep beach input order.
    fn map_forecast_by_time(rated_beaches: Vec<Vec<BeachForecastPoint>>) -> Vec<TimeForecast> {
        let mut feed: Vec<TimeForecast> = Vec::new();
        let mut bucket_index: HashMap<String, usize> = HashMap::new();

        for point in rated_beaches.into_iter().flatten() {
            let existing = bucket_index.get(point.time()).copied();
            match existing {
                Some(index) => feed[index].forecast.push(point),
                None => {
                    bucket_index.insert(point.time().to_string(), feed.len());
                    feed.push(TimeForecast {
                        time: point.time().to_string(),
                        forecast: vec![point],
                    });
                }
            }
        }

        for bucket in &mut feed {
            // sort_by is stable
            bucket.forecast.sort_by(|a, b| b.rating.cmp(&a.rating));
        }

        feed
    }
}
