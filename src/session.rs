//! Per-user session state and the handlers that mutate it
//!
//! A `Session` owns everything one dashboard user sees: the active location and
//! forecast, the favorites list, display preferences, and the two lookup
//! caches. Handlers either complete fully or fail without touching the
//! displayed data.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::data::{
    day_cards, derive_current_metrics, hourly_for_day, sun_times, CurrentMetrics, DayCard,
    FetchError, ForecastBundle, ForecastClient, GeocodeError, GeocodingClient, HourlyPoint,
    Location, SunTimes, Units,
};

/// How long a resolved city stays cached
pub const DEFAULT_GEOCODE_TTL: Duration = Duration::from_secs(600);

/// How long a fetched forecast stays cached
pub const DEFAULT_FORECAST_TTL: Duration = Duration::from_secs(300);

/// Timezone passed to the forecast API unless configured otherwise
pub const DEFAULT_TIMEZONE: &str = "auto";

/// Favorites a new session starts with
pub const DEFAULT_FAVORITES: [&str; 4] = ["Pakpattan", "Lahore", "Karachi", "Islamabad"];

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Why a search did not update the dashboard
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    NotFound(#[from] GeocodeError),

    #[error("{}", FetchError::USER_MESSAGE)]
    Fetch(#[from] FetchError),
}

/// Forecast cache key. Coordinates are compared bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    latitude_bits: u64,
    longitude_bits: u64,
    timezone: String,
}

impl ForecastKey {
    pub fn new(latitude: f64, longitude: f64, timezone: &str) -> Self {
        Self {
            latitude_bits: latitude.to_bits(),
            longitude_bits: longitude.to_bits(),
            timezone: timezone.to_string(),
        }
    }
}

/// Settings a session is created with
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Timezone passed to the forecast API
    pub timezone: String,
    pub geocode_ttl: Duration,
    pub forecast_ttl: Duration,
    /// Initial favorites, in display order
    pub favorites: Vec<String>,
    pub units: Units,
    pub theme: Theme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            geocode_ttl: DEFAULT_GEOCODE_TTL,
            forecast_ttl: DEFAULT_FORECAST_TTL,
            favorites: DEFAULT_FAVORITES.iter().map(|s| s.to_string()).collect(),
            units: Units::default(),
            theme: Theme::default(),
        }
    }
}

/// The location being displayed and its forecast; always replaced together
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveForecast {
    pub location: Location,
    pub bundle: ForecastBundle,
}

/// State and handlers for one dashboard user
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    geocoder: GeocodingClient,
    forecaster: ForecastClient,
    geocode_cache: TtlCache<String, Location>,
    forecast_cache: TtlCache<ForecastKey, ForecastBundle>,
    active: Option<ActiveForecast>,
    favorites: Vec<String>,
    selected_day: usize,
    pub units: Units,
    pub theme: Theme,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Creates a session talking to the public Open-Meteo endpoints
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clients(config, GeocodingClient::new(), ForecastClient::new())
    }

    /// Creates a session with custom clients (e.g. pointed at a mock server)
    pub fn with_clients(
        config: SessionConfig,
        geocoder: GeocodingClient,
        forecaster: ForecastClient,
    ) -> Self {
        let mut favorites: Vec<String> = Vec::with_capacity(config.favorites.len());
        for name in &config.favorites {
            let name = name.trim();
            if !name.is_empty() && !favorites.iter().any(|f| f == name) {
                favorites.push(name.to_string());
            }
        }

        Self {
            units: config.units,
            theme: config.theme,
            geocoder,
            forecaster,
            geocode_cache: TtlCache::new(),
            forecast_cache: TtlCache::new(),
            active: None,
            favorites,
            selected_day: 0,
            config,
        }
    }

    /// Resolves `city` and loads its forecast.
    ///
    /// On failure the previously displayed location and forecast stay as they were.
    pub async fn search(&mut self, city: &str) -> Result<(), SearchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(GeocodeError::NotFound.into());
        }

        let geocoder = &self.geocoder;
        let location = self
            .geocode_cache
            .get_or_compute(city.to_string(), self.config.geocode_ttl, move || {
                geocoder.resolve(city)
            })
            .await
            .map_err(|e| {
                warn!(city, "City not found");
                e
            })?;

        self.load_location(location).await
    }

    /// Loads the forecast for an already resolved location.
    ///
    /// On failure the previously displayed location and forecast stay as they were.
    pub async fn load_location(&mut self, location: Location) -> Result<(), SearchError> {
        let timezone = self.config.timezone.as_str();
        let key = ForecastKey::new(location.latitude, location.longitude, timezone);
        let forecaster = &self.forecaster;
        let (lat, lon) = (location.latitude, location.longitude);

        let bundle = self
            .forecast_cache
            .get_or_compute(key, self.config.forecast_ttl, move || {
                forecaster.fetch(lat, lon, timezone)
            })
            .await
            .map_err(|e| {
                warn!(location = %location.display_name, error = %e, "Forecast fetch failed");
                e
            })?;

        info!(
            location = %location.display_name,
            hours = bundle.hourly.len(),
            days = bundle.daily.len(),
            "Loaded forecast"
        );
        self.show(location, bundle);
        Ok(())
    }

    /// Makes `location` and its forecast the displayed pair and selects the first day
    pub fn show(&mut self, location: Location, bundle: ForecastBundle) {
        self.active = Some(ActiveForecast { location, bundle });
        self.selected_day = 0;
    }

    /// Candidate locations for a partially typed city; empty on any failure
    pub async fn suggest(&self, text: &str) -> Vec<Location> {
        self.geocoder.suggest(text).await
    }

    /// Drops the active location and forecast. Favorites, preferences and caches are kept.
    pub fn clear(&mut self) {
        debug!("Clearing active forecast");
        self.active = None;
        self.selected_day = 0;
    }

    /// Appends a favorite. Blank names and duplicates are ignored.
    ///
    /// Returns `true` if the list changed.
    pub fn add_favorite(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.favorites.iter().any(|f| f == name) {
            return false;
        }
        self.favorites.push(name.to_string());
        true
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn active(&self) -> Option<&ActiveForecast> {
        self.active.as_ref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.active.as_ref().map(|a| &a.location)
    }

    pub fn forecast(&self) -> Option<&ForecastBundle> {
        self.active.as_ref().map(|a| &a.bundle)
    }

    pub fn timezone(&self) -> &str {
        &self.config.timezone
    }

    /// Feels-like and humidity for the current hour
    pub fn current_metrics(&self) -> Option<CurrentMetrics> {
        self.forecast()
            .map(|b| derive_current_metrics(&b.current, &b.hourly))
    }

    /// Today's sunrise and sunset, `None` when unavailable
    pub fn sun_times(&self) -> Option<SunTimes> {
        self.forecast().and_then(|b| sun_times(&b.daily))
    }

    /// One card per forecast day
    pub fn day_cards(&self) -> Vec<DayCard> {
        self.forecast().map(|b| day_cards(&b.daily)).unwrap_or_default()
    }

    /// Index of the day the hourly chart shows
    pub fn selected_day(&self) -> usize {
        self.selected_day
    }

    /// Date of the selected day, if a forecast is loaded and the date parses
    pub fn selected_date(&self) -> Option<NaiveDate> {
        let date = self.forecast()?.daily.time.get(self.selected_day)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Selects a day of the daily series; out-of-range indices are clamped
    pub fn select_day(&mut self, index: usize) {
        let days = self.forecast().map(|b| b.daily.len()).unwrap_or(0);
        self.selected_day = index.min(days.saturating_sub(1));
    }

    /// Moves the selection to the next day, wrapping to the first
    pub fn next_day(&mut self) {
        let days = self.forecast().map(|b| b.daily.len()).unwrap_or(0);
        if days == 0 {
            return;
        }
        self.selected_day = (self.selected_day + 1) % days;
    }

    /// Moves the selection to the previous day, wrapping to the last
    pub fn previous_day(&mut self) {
        let days = self.forecast().map(|b| b.daily.len()).unwrap_or(0);
        if days == 0 {
            return;
        }
        self.selected_day = if self.selected_day == 0 {
            days - 1
        } else {
            self.selected_day - 1
        };
    }

    /// Hourly points for the selected day
    pub fn selected_day_hours(&self) -> Vec<HourlyPoint> {
        match (self.forecast(), self.selected_date()) {
            (Some(bundle), Some(date)) => hourly_for_day(&bundle.hourly, date),
            _ => Vec::new(),
        }
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
