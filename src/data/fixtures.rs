//! Forecast data shared by unit tests

use super::{CurrentWeather, DailySeries, ForecastBundle, HourlySeries, Location};

pub(crate) fn lahore() -> Location {
    Location {
        latitude: 31.5,
        longitude: 74.3,
        display_name: "Lahore, Pakistan".to_string(),
    }
}

/// A forecast starting 2024-03-01 with 24 hours per day.
///
/// The current timestamp matches the hourly entry for 10:00 on the first day.
pub(crate) fn bundle(days: usize) -> ForecastBundle {
    let hours = days * 24;
    ForecastBundle {
        current: CurrentWeather {
            temperature: 20.0,
            wind_speed: 5.0,
            wind_direction: 90.0,
            weather_code: Some(0),
            timestamp: "2024-03-01T10:00".to_string(),
        },
        hourly: HourlySeries {
            time: (0..hours)
                .map(|h| format!("2024-03-{:02}T{:02}:00", 1 + h / 24, h % 24))
                .collect(),
            temperature: (0..hours).map(|h| Some(15.0 + (h % 24) as f64 / 2.0)).collect(),
            apparent_temperature: vec![Some(19.0); hours],
            relative_humidity: vec![Some(40.0); hours],
            wind_speed: vec![Some(5.0); hours],
            wind_direction: vec![Some(90.0); hours],
        },
        daily: DailySeries {
            time: (0..days).map(|d| format!("2024-03-{:02}", 1 + d)).collect(),
            temperature_max: vec![Some(25.0); days],
            temperature_min: vec![Some(15.0); days],
            weather_code: vec![Some(2); days],
            sunrise: (0..days).map(|d| Some(format!("2024-03-{:02}T06:30", 1 + d))).collect(),
            sunset: (0..days).map(|d| Some(format!("2024-03-{:02}T18:10", 1 + d))).collect(),
        },
    }
}
