//! WMO weather code lookup
//!
//! Maps the integer codes Open-Meteo reports to an icon and a short label.

use serde::Serialize;

/// Icon and label for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub icon: &'static str,
    pub label: &'static str,
}

/// Returned for codes missing from the table
pub const UNKNOWN_WEATHER: WeatherCodeEntry = WeatherCodeEntry {
    icon: "🌈",
    label: "Unknown",
};

const fn entry(icon: &'static str, label: &'static str) -> WeatherCodeEntry {
    WeatherCodeEntry { icon, label }
}

/// Known codes, in ascending order
static WEATHER_CODES: [(i32, WeatherCodeEntry); 16] = [
    (0, entry("☀️", "Clear")),
    (1, entry("🌤️", "Mainly clear")),
    (2, entry("⛅", "Partly cloudy")),
    (3, entry("☁️", "Overcast")),
    (45, entry("🌫️", "Fog")),
    (48, entry("🌫️", "Depositing rime fog")),
    (51, entry("🌦️", "Light drizzle")),
    (53, entry("🌧️", "Moderate drizzle")),
    (55, entry("🌧️", "Dense drizzle")),
    (61, entry("🌧️", "Slight rain")),
    (63, entry("🌧️", "Moderate rain")),
    (65, entry("🌧️", "Heavy rain")),
    (71, entry("❄️", "Light snow")),
    (73, entry("❄️", "Moderate snow")),
    (80, entry("🌧️", "Rain showers")),
    (95, entry("⛈️", "Thunderstorm")),
];

/// Looks up the icon and label for a WMO weather code.
///
/// Codes not in the table map to [`UNKNOWN_WEATHER`].
pub fn weather_icon(code: i32) -> WeatherCodeEntry {
    WEATHER_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| WEATHER_CODES[idx].1)
        .unwrap_or(UNKNOWN_WEATHER)
}
