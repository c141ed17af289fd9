//! Core data models for citycast
//!
//! This module contains the data types shared between the geocoder, the
//! forecast fetcher, the derived-metrics helpers and the presentation layer.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod forecast;
pub mod geocoding;
pub mod metrics;
pub mod weather_codes;

pub use forecast::{FetchError, ForecastClient};
pub use geocoding::{GeocodeError, GeocodingClient};
pub use metrics::{
    day_cards, derive_current_metrics, format_clock, hourly_for_day, hourly_rows, or_unavailable,
    sun_times, CurrentMetrics, DayCard, HourlyPoint, SunTimes, UNAVAILABLE,
};
pub use weather_codes::{weather_icon, WeatherCodeEntry};

use serde::{Deserialize, Serialize};

/// A resolved place, taken from the first geocoding match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// Human-readable name, formatted as "<name>, <country>"
    pub display_name: String,
}

/// Weather conditions reported for "now" by the forecast provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
    /// WMO weather code, when the provider reports one
    pub weather_code: Option<i32>,
    /// Provider timestamp, kept verbatim (e.g. "2024-01-01T01:00")
    pub timestamp: String,
}

/// Hourly forecast as parallel sequences sharing one `time` axis.
///
/// Index `i` of every sequence describes the same hour. The fetcher rejects
/// payloads where the lengths disagree. Individual values are `None` where the
/// provider reported `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    /// Temperature in Celsius
    pub temperature: Vec<Option<f64>>,
    /// Apparent ("feels like") temperature in Celsius
    pub apparent_temperature: Vec<Option<f64>>,
    /// Relative humidity percentage (0-100)
    pub relative_humidity: Vec<Option<f64>>,
    /// Wind speed in km/h
    pub wind_speed: Vec<Option<f64>>,
    /// Wind direction in degrees
    pub wind_direction: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Number of hours in the series
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Whether every value sequence is aligned with `time`
    pub fn is_aligned(&self) -> bool {
        let len = self.time.len();
        self.temperature.len() == len
            && self.apparent_temperature.len() == len
            && self.relative_humidity.len() == len
            && self.wind_speed.len() == len
            && self.wind_direction.len() == len
    }
}

/// Daily forecast as parallel sequences sharing one `time` axis of calendar days.
///
/// The series may be shorter than requested, empty, or ragged; readers look
/// entries up by index and fall back when one is missing or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// Calendar dates ("YYYY-MM-DD")
    pub time: Vec<String>,
    /// Maximum temperature in Celsius
    pub temperature_max: Vec<Option<f64>>,
    /// Minimum temperature in Celsius
    pub temperature_min: Vec<Option<f64>>,
    /// WMO weather code for the day
    pub weather_code: Vec<Option<i32>>,
    /// Sunrise timestamps ("YYYY-MM-DDTHH:MM")
    pub sunrise: Vec<Option<String>>,
    /// Sunset timestamps ("YYYY-MM-DDTHH:MM")
    pub sunset: Vec<Option<String>>,
}

impl DailySeries {
    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Everything one forecast request returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// Display units. Data is always stored metric; conversion happens when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// °C and km/h
    #[default]
    Metric,
    /// °F and mph
    Imperial,
}

impl Units {
    /// Parses a units name as accepted on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Some(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Some(Units::Imperial),
            _ => None,
        }
    }

    /// Converts a Celsius value into this unit system
    pub fn temperature(self, celsius: f64) -> f64 {
        match self {
            Units::Metric => celsius,
            Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Converts a km/h value into this unit system
    pub fn speed(self, kmh: f64) -> f64 {
        match self {
            Units::Metric => kmh,
            Units::Imperial => kmh / 1.609_344,
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }

    /// Formats a Celsius value, e.g. "21.5 °C" or "70.7 °F"
    pub fn format_temperature(self, celsius: f64) -> String {
        format!("{:.1} {}", self.temperature(celsius), self.temperature_label())
    }

    /// Formats a km/h value, e.g. "12.0 km/h"
    pub fn format_speed(self, kmh: f64) -> String {
        format!("{:.1} {}", self.speed(kmh), self.speed_label())
    }

    /// The other unit system
    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }
}
