//! Text summaries of the active forecast
//!
//! [`kpis`] feeds both the dashboard's KPI row and the `--print` output, so the
//! two always show the same numbers.

use std::fmt::Write;

use crate::data::{format_clock, or_unavailable, weather_icon, UNAVAILABLE};
use crate::session::Session;

/// One headline figure, e.g. temperature or sunrise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
    /// Secondary line shown under the value
    pub detail: Option<String>,
}

impl Kpi {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Sixteen-point compass name for a bearing in degrees
pub fn compass_point(degrees: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let index = (degrees.rem_euclid(360.0) / 22.5).round() as usize % POINTS.len();
    POINTS[index]
}

/// Headline figures for the active forecast; empty when nothing is loaded
pub fn kpis(session: &Session) -> Vec<Kpi> {
    let (Some(bundle), Some(metrics)) = (session.forecast(), session.current_metrics()) else {
        return Vec::new();
    };
    let units = session.units;
    let current = &bundle.current;
    let sun = session.sun_times();

    vec![
        Kpi::new("Temperature", units.format_temperature(current.temperature))
            .with_detail(format!("Feels {}", units.format_temperature(metrics.feels_like))),
        Kpi::new("Wind", units.format_speed(current.wind_speed)),
        Kpi::new("Wind dir", format!("{:.0}°", current.wind_direction))
            .with_detail(compass_point(current.wind_direction).to_string()),
        Kpi::new("Humidity", metrics.humidity_display()),
        Kpi::new(
            "Sunrise",
            sun.map(|s| format_clock(s.sunrise))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        ),
        Kpi::new(
            "Sunset",
            sun.map(|s| format_clock(s.sunset))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        ),
    ]
}

/// Current conditions text, e.g. "☀️ Clear"; `None` when the provider sent no code
pub fn current_conditions(session: &Session) -> Option<String> {
    let code = session.forecast()?.current.weather_code?;
    let entry = weather_icon(code);
    Some(format!("{} {}", entry.icon, entry.label))
}

/// Plain-text report of the active forecast for `--print`
pub fn render_text(session: &Session) -> String {
    let Some(location) = session.location() else {
        return "No city loaded.\n".to_string();
    };
    let units = session.units;
    let mut out = String::new();

    let _ = write!(out, "Location: {}", location.display_name);
    if let Some(conditions) = current_conditions(session) {
        let _ = write!(out, "  {}", conditions);
    }
    out.push('\n');

    for kpi in kpis(session) {
        let _ = write!(out, "  {:<12} {}", kpi.label, kpi.value);
        if let Some(detail) = kpi.detail {
            let _ = write!(out, " ({})", detail);
        }
        out.push('\n');
    }

    out.push_str("\n7-Day Forecast\n");
    for card in session.day_cards() {
        let _ = writeln!(
            out,
            "  {}  {} {:<20} Max {} | Min {}",
            card.label,
            card.weather.icon,
            card.weather.label,
            or_unavailable(card.temperature_max, |t| units.format_temperature(t)),
            or_unavailable(card.temperature_min, |t| units.format_temperature(t)),
        );
    }
    out
}
