//! Derived metrics computed from a forecast bundle
//!
//! Nothing in here fails: missing or malformed data falls back to a defined
//! value so the dashboard can always render.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::weather_codes::{weather_icon, WeatherCodeEntry};
use super::{CurrentWeather, DailySeries, HourlySeries};

/// Marker displayed in place of a value that is not available
pub const UNAVAILABLE: &str = "-";

/// Metrics for "now" that the provider only reports hourly
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentMetrics {
    /// Apparent temperature in Celsius, or the raw temperature when the
    /// current hour is not in the hourly series
    pub feels_like: f64,
    /// Relative humidity percentage, `None` when the current hour is not in
    /// the hourly series
    pub humidity: Option<f64>,
}

impl CurrentMetrics {
    /// Humidity as display text, e.g. "82%" or "-"
    pub fn humidity_display(&self) -> String {
        match self.humidity {
            Some(h) => format!("{:.0}%", h),
            None => UNAVAILABLE.to_string(),
        }
    }
}

/// Today's sunrise and sunset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

/// One card of the 7-day forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub date: NaiveDate,
    /// Short label, e.g. "Mon 01 Jan"
    pub label: String,
    pub weather: WeatherCodeEntry,
    /// Maximum temperature in Celsius, if reported
    pub temperature_max: Option<f64>,
    /// Minimum temperature in Celsius, if reported
    pub temperature_min: Option<f64>,
}

/// One hour of the hourly series, as a row. Values the provider left null
/// are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// Computes feels-like temperature and humidity for the current hour.
///
/// The current hour is the index whose `hourly.time` entry is exactly equal to
/// `current.timestamp`. When no entry matches, or the matched value is null,
/// `feels_like` falls back to the current temperature and `humidity` is `None`.
pub fn derive_current_metrics(current: &CurrentWeather, hourly: &HourlySeries) -> CurrentMetrics {
    let index = hourly.time.iter().position(|t| *t == current.timestamp);

    let feels_like = index
        .and_then(|i| hourly.apparent_temperature.get(i).copied().flatten())
        .unwrap_or(current.temperature);
    let humidity = index.and_then(|i| hourly.relative_humidity.get(i).copied().flatten());

    CurrentMetrics {
        feels_like,
        humidity,
    }
}

/// Reads today's sunrise and sunset from the first daily entry.
///
/// Returns `None` when either entry is missing or cannot be parsed; the two
/// values are shown or hidden together.
pub fn sun_times(daily: &DailySeries) -> Option<SunTimes> {
    let sunrise = parse_timestamp(daily.sunrise.first()?.as_deref()?)?;
    let sunset = parse_timestamp(daily.sunset.first()?.as_deref()?)?;
    Some(SunTimes {
        sunrise: sunrise.time(),
        sunset: sunset.time(),
    })
}

/// Formats `value`, or returns [`UNAVAILABLE`] when it is `None`
pub fn or_unavailable(value: Option<f64>, format: impl FnOnce(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Formats a time as 24-hour "HH:MM"
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Builds one card per day of the daily series.
///
/// Days whose date cannot be parsed are skipped. A missing weather code maps to
/// the unknown entry and a missing temperature stays `None`.
pub fn day_cards(daily: &DailySeries) -> Vec<DayCard> {
    daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, day)| {
            let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") else {
                tracing::warn!(day = %day, "Skipping day with unparsable date");
                return None;
            };
            Some(DayCard {
                date,
                label: date.format("%a %d %b").to_string(),
                weather: weather_icon(daily.weather_code.get(i).copied().flatten().unwrap_or(-1)),
                temperature_max: daily.temperature_max.get(i).copied().flatten(),
                temperature_min: daily.temperature_min.get(i).copied().flatten(),
            })
        })
        .collect()
}

/// Returns the hours of `hourly` that fall on `date`, in order
pub fn hourly_for_day(hourly: &HourlySeries, date: NaiveDate) -> Vec<HourlyPoint> {
    (0..hourly.len())
        .filter_map(|i| point_at(hourly, i))
        .filter(|point| point.time.date() == date)
        .collect()
}

/// Returns up to `limit` rows from the start of the hourly series
pub fn hourly_rows(hourly: &HourlySeries, limit: usize) -> Vec<HourlyPoint> {
    (0..hourly.len())
        .filter_map(|i| point_at(hourly, i))
        .take(limit)
        .collect()
}

/// Row for hour `i`; only the timestamp is required
fn point_at(hourly: &HourlySeries, i: usize) -> Option<HourlyPoint> {
    let value = |series: &[Option<f64>]| series.get(i).copied().flatten();
    Some(HourlyPoint {
        time: parse_timestamp(hourly.time.get(i)?)?,
        temperature: value(&hourly.temperature),
        apparent_temperature: value(&hourly.apparent_temperature),
        relative_humidity: value(&hourly.relative_humidity),
        wind_speed: value(&hourly.wind_speed),
    })
}

/// Parses a provider timestamp ("2024-07-15T05:30", seconds optional)
pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
