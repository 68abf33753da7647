//! End-to-end tests for the StormGlass client feeding the forecast aggregator

use std::sync::Mutex;

use serde_json::{Value, json};
use surfcast::config::StormGlassConfig;
use surfcast::weather::{Request, RequestError};
use surfcast::{Beach, ForecastAggregator, ForecastCache, ForecastPoint, GeoPosition, InMemoryCache, StormGlass};

const WEATHER_FIXTURE: &str = include_str!("fixtures/stormglass_weather_3_hours.json");

/// Answers every request with the same canned result
struct CannedRequest {
    response: Result<Value, RequestError>,
    calls: Mutex<usize>,
}

impl CannedRequest {
    fn new(response: Result<Value, RequestError>) -> Self {
        Self {
            response,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Request for CannedRequest {
    async fn get(&self, _url: &str, headers: &[(&str, &str)]) -> Result<Value, RequestError> {
        assert!(headers.contains(&("Authorization", "fake-token")));
        *self.calls.lock().unwrap() += 1;
        self.response.clone()
    }
}

fn stormglass_config() -> StormGlassConfig {
    StormGlassConfig {
        api_token: Some("fake-token".to_string()),
        ..StormGlassConfig::default()
    }
}

fn manly() -> Beach {
    Beach::new(-33.792726, 151.289824, "Manly", GeoPosition::E, "fake-id")
}

#[tokio::test]
async fn test_forecast_for_one_beach() {
    let raw: Value = serde_json::from_str(WEATHER_FIXTURE).unwrap();
    let request = CannedRequest::new(Ok(raw));
    let client = StormGlass::new(&request, InMemoryCache::new(), stormglass_config());
    let aggregator = ForecastAggregator::new(client);

    let feed = aggregator.process_forecast_for_beaches(&[manly()]).await.unwrap();

    let expected = json!([
        {
            "time": "2020-04-26T00:00:00+00:00",
            "forecast": [{
                "lat": -33.792726, "lng": 151.289824, "name": "Manly", "position": "E", "rating": 2,
                "swellDirection": 64.26, "swellHeight": 0.15, "swellPeriod": 3.89,
                "time": "2020-04-26T00:00:00+00:00",
                "waveDirection": 231.38, "waveHeight": 0.47, "windDirection": 299.45, "windSpeed": 100.0
            }]
        },
        {
            "time": "2020-04-26T01:00:00+00:00",
            "forecast": [{
                "lat": -33.792726, "lng": 151.289824, "name": "Manly", "position": "E", "rating": 2,
                "swellDirection": 123.41, "swellHeight": 0.21, "swellPeriod": 3.67,
                "time": "2020-04-26T01:00:00+00:00",
                "waveDirection": 232.12, "waveHeight": 0.46, "windDirection": 310.48, "windSpeed": 100.0
            }]
        },
        {
            "time": "2020-04-26T02:00:00+00:00",
            "forecast": [{
                "lat": -33.792726, "lng": 151.289824, "name": "Manly", "position": "E", "rating": 2,
                "swellDirection": 182.56, "swellHeight": 0.28, "swellPeriod": 3.44,
                "time": "2020-04-26T02:00:00+00:00",
                "waveDirection": 232.86, "waveHeight": 0.46, "windDirection": 321.5, "windSpeed": 100.0
            }]
        }
    ]);
    assert_eq!(serde_json::to_value(&feed).unwrap(), expected);
}

#[tokio::test]
async fn test_warm_cache_serves_forecast_when_provider_is_down() {
    let cache = InMemoryCache::new();
    let cached = vec![ForecastPoint {
        time: "2020-04-26T00:00:00+00:00".to_string(),
        swell_direction: 90.0,
        swell_height: 2.2,
        swell_period: 15.0,
        wave_direction: 90.0,
        wave_height: 2.4,
        wind_direction: 270.0,
        wind_speed: 5.0,
    }];
    cache
        .put(
            &StormGlass::<CannedRequest, InMemoryCache>::cache_key(-33.792726, 151.289824),
            &cached,
        )
        .await
        .unwrap();
    let request = CannedRequest::new(Err(RequestError::transport("Network Error")));
    let aggregator = ForecastAggregator::new(StormGlass::new(&request, cache, stormglass_config()));

    let feed = aggregator.process_forecast_for_beaches(&[manly()]).await.unwrap();

    assert_eq!(request.calls(), 0);
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].forecast[0].rating, 5);
}

#[tokio::test]
async fn test_provider_rate_limit_fails_the_forecast() {
    let request = CannedRequest::new(Err(RequestError::Response {
        status: 429,
        data: json!({ "errors": ["Rate Limit reached"] }),
    }));
    let aggregator = ForecastAggregator::new(StormGlass::new(&request, InMemoryCache::new(), stormglass_config()));

    let err = aggregator
        .process_forecast_for_beaches(&[manly()])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"Unexpected error during the forecast processing: Unexpected error returned by the StormGlass service: Error: {"errors":["Rate Limit reached"]} Code: 429"#
    );
}

#[tokio::test]
async fn test_same_coordinates_share_one_provider_call_once_cached() {
    let raw: Value = serde_json::from_str(WEATHER_FIXTURE).unwrap();
    let request = CannedRequest::new(Ok(raw));
    let cache = InMemoryCache::new();
    let aggregator = ForecastAggregator::new(StormGlass::new(&request, &cache, stormglass_config()));

    aggregator.process_forecast_for_beaches(&[manly()]).await.unwrap();
    let feed = aggregator.process_forecast_for_beaches(&[manly()]).await.unwrap();

    assert_eq!(request.calls(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(feed.len(), 3);
}
