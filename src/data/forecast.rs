//! Open-Meteo forecast client
//!
//! This module fetches current, hourly and 7-day daily forecast data from the
//! Open-Meteo API in a single request and parses it into a [`ForecastBundle`].

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{CurrentWeather, DailySeries, ForecastBundle, HourlySeries};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

/// Hourly variables requested, comma-joined
const HOURLY_VARIABLES: &str =
    "temperature_2m,apparent_temperature,relativehumidity_2m,winddirection_10m,windspeed_10m";

/// Daily variables requested, comma-joined
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,weathercode,sunrise,sunset";

/// Number of forecast days requested
pub const FORECAST_DAYS: usize = 7;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed, timed out, or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Hourly series in the response have inconsistent lengths
    #[error("Malformed forecast: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Message shown to the user for any fetch failure
    pub const USER_MESSAGE: &'static str = "Failed to fetch weather data. Try again.";
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    /// Create a new ForecastClient against the public API
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_BASE_URL)
    }

    /// Create a new ForecastClient against a different host (e.g. a mock server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the forecast bundle for the given coordinates
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    /// * `timezone` - IANA timezone name, or "auto" to use the location's zone
    ///
    /// # Returns
    /// * `Ok(ForecastBundle)` - Current, hourly and daily data
    /// * `Err(FetchError)` - If the request, the status, or parsing fails
    pub async fn fetch(
        &self,
        lat: f64,
        lon: f64,
        timezone: &str,
    ) -> Result<ForecastBundle, FetchError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let forecast_days = FORECAST_DAYS.to_string();
        let lat = lat.to_string();
        let lon = lon.to_string();

        debug!(%url, lat = %lat, lon = %lon, timezone, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_VARIABLES),
                ("daily", DAILY_VARIABLES),
                ("timezone", timezone),
                ("forecast_days", forecast_days.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&text)?;

        parse_response(api_response)
    }
}

/// Convert the wire response into a bundle.
///
/// Only the hourly series must be aligned, since the current-hour lookup reads
/// every variable at one index. A short, empty or ragged daily series is kept
/// as-is and the derived values fall back when entries are missing.
fn parse_response(response: OpenMeteoResponse) -> Result<ForecastBundle, FetchError> {
    let current = response.current_weather;
    let hourly = response.hourly;
    let daily = response.daily;

    let hourly = HourlySeries {
        time: hourly.time,
        temperature: hourly.temperature_2m,
        apparent_temperature: hourly.apparent_temperature,
        relative_humidity: hourly.relativehumidity_2m,
        wind_speed: hourly.windspeed_10m,
        wind_direction: hourly.winddirection_10m,
    };
    if !hourly.is_aligned() {
        return Err(FetchError::Malformed(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let daily = DailySeries {
        time: daily.time,
        temperature_max: daily.temperature_2m_max,
        temperature_min: daily.temperature_2m_min,
        weather_code: daily.weathercode,
        sunrise: daily.sunrise,
        sunset: daily.sunset,
    };
    if daily.len() != FORECAST_DAYS {
        warn!(
            days = daily.len(),
            expected = FORECAST_DAYS,
            "Daily forecast has an unexpected number of days"
        );
    }

    Ok(ForecastBundle {
        current: CurrentWeather {
            temperature: current.temperature,
            wind_speed: current.windspeed,
            wind_direction: current.winddirection,
            weather_code: current.weathercode,
            timestamp: current.time,
        },
        hourly,
        daily,
    })
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: CurrentWeatherPayload,
    hourly: HourlyPayload,
    #[serde(default)]
    daily: DailyPayload,
}

/// `current_weather` object from Open-Meteo
#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    time: String,
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    #[serde(default)]
    weathercode: Option<i32>,
}

/// Hourly weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    apparent_temperature: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
    winddirection_10m: Vec<Option<f64>>,
}

/// Daily weather data from Open-Meteo; every field may be absent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyPayload {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
}
