//! Surf rating engine
//!
//! Scores a forecast point from 1 (flat) to 5 (epic) for one beach, combining
//! how swell and wind line up with the beach orientation, the swell period and
//! the swell height.

use crate::models::{Beach, ForecastPoint, GeoPosition};

/// Swell height buckets in meters
const ANKLE_TO_KNEE_MIN: f64 = 0.3;
const WAIST_HIGH_MIN: f64 = 1.0;
const HEAD_HIGH_MIN: f64 = 2.0;

/// Rating bound to a single beach orientation.
///
/// Cheap to build; create one per beach per aggregation and never share it.
#[derive(Debug, Clone, Copy)]
pub struct RatingEngine {
    position: GeoPosition,
}

impl RatingEngine {
    #[must_use]
    pub fn new(beach: &Beach) -> Self {
        Self {
            position: beach.position,
        }
    }

    /// Compass bucket for a bearing in degrees.
    ///
    /// Anything at or above 310 is N; negative bearings and NaN fall back to E.
    #[must_use]
    pub fn position_from_degrees(angle: f64) -> GeoPosition {
        match angle {
            a if a >= 310.0 || (0.0..50.0).contains(&a) => GeoPosition::N,
            a if (50.0..120.0).contains(&a) => GeoPosition::E,
            a if (120.0..220.0).contains(&a) => GeoPosition::S,
            a if (220.0..310.0).contains(&a) => GeoPosition::W,
            _ => GeoPosition::E,
        }
    }

    /// 1 when wind and swell come from the same side, 5 for offshore wind, 3 otherwise
    #[must_use]
    pub fn wind_and_wave_rating(&self, wave_position: GeoPosition, wind_position: GeoPosition) -> u8 {
        if wave_position == wind_position {
            1
        } else if self.is_wind_offshore(wave_position, wind_position) {
            5
        } else {
            3
        }
    }

    #[must_use]
    pub fn swell_period_rating(period: f64) -> u8 {
        match period {
            p if p >= 14.0 => 5,
            p if p >= 10.0 => 4,
            p if p >= 7.0 => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn swell_height_rating(height: f64) -> u8 {
        match height {
            h if h >= HEAD_HIGH_MIN => 5,
            h if h >= WAIST_HIGH_MIN => 3,
            h if h >= ANKLE_TO_KNEE_MIN => 2,
            _ => 1,
        }
    }

    /// Final rating: rounded mean of the three sub-ratings
    #[must_use]
    pub fn rate(&self, point: &ForecastPoint) -> u8 {
        let swell_position = Self::position_from_degrees(point.swell_direction);
        let wind_position = Self::position_from_degrees(point.wind_direction);

        let wind_and_wave = self.wind_and_wave_rating(swell_position, wind_position);
        let period = Self::swell_period_rating(point.swell_period);
        let height = Self::swell_height_rating(point.swell_height);

        let mean = f64::from(wind_and_wave + period + height) / 3.0;
        mean.round() as u8
    }

    /// Swell arrives on the beach's face while wind blows from the opposite side
    fn is_wind_offshore(&self, wave_position: GeoPosition, wind_position: GeoPosition) -> bool {
        wave_position == self.position && wind_position == self.position.opposite()
    }
}
