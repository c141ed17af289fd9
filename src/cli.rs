//! Command-line interface parsing for citycast
//!
//! This module handles parsing of CLI arguments using clap and converts them
//! into a typed [`StartupConfig`]. Most options can also be set through
//! `CITYCAST_*` environment variables.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::Units;
use crate::session::{SessionConfig, Theme, DEFAULT_FAVORITES, DEFAULT_TIMEZONE};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified units name is not recognized
    #[error("Invalid units: '{0}'. Valid units: metric, imperial")]
    InvalidUnits(String),

    /// The timezone is blank
    #[error("Timezone must not be empty (use 'auto' for the location's own zone)")]
    EmptyTimezone,
}

/// citycast - search a city and view its weather
#[derive(Parser, Debug)]
#[command(name = "citycast")]
#[command(about = "Terminal weather dashboard: current conditions and a 7-day forecast for any city")]
#[command(version)]
pub struct Cli {
    /// City to search at startup
    ///
    /// Examples:
    ///   citycast --city Lahore
    ///   citycast --city "New York" --units imperial
    #[arg(long, env = "CITYCAST_CITY", value_name = "NAME")]
    pub city: Option<String>,

    /// Timezone for forecast timestamps ("auto" uses the location's zone)
    #[arg(long, env = "CITYCAST_TIMEZONE", value_name = "TZ", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Display units: metric or imperial
    #[arg(long, env = "CITYCAST_UNITS", value_name = "UNITS", default_value = "metric")]
    pub units: String,

    /// Start with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Favorite city; repeat to build the list (replaces the built-in favorites)
    #[arg(long = "favorite", value_name = "NAME")]
    pub favorites: Vec<String>,

    /// Seconds a resolved city stays cached
    #[arg(long, value_name = "SECS", default_value_t = 600)]
    pub geocode_ttl: u64,

    /// Seconds a fetched forecast stays cached
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub forecast_ttl: u64,

    /// Print the forecast for --city to stdout and exit instead of opening the dashboard
    #[arg(long, requires = "city")]
    pub print: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Settings for the session
    pub session: SessionConfig,
    /// City to search before the first render
    pub initial_city: Option<String>,
    /// Whether to print and exit instead of running the dashboard
    pub print: bool,
}

/// Parses a units string argument into a Units value.
///
/// # Returns
/// * `Ok(Units)` if the string names a unit system
/// * `Err(CliError::InvalidUnits)` otherwise
pub fn parse_units_arg(s: &str) -> Result<Units, CliError> {
    Units::from_str(s).ok_or_else(|| CliError::InvalidUnits(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a value is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let units = parse_units_arg(&cli.units)?;

        let timezone = cli.timezone.trim();
        if timezone.is_empty() {
            return Err(CliError::EmptyTimezone);
        }

        let favorites = if cli.favorites.is_empty() {
            DEFAULT_FAVORITES.iter().map(|s| s.to_string()).collect()
        } else {
            cli.favorites.clone()
        };

        let initial_city = cli
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            session: SessionConfig {
                timezone: timezone.to_string(),
                geocode_ttl: Duration::from_secs(cli.geocode_ttl),
                forecast_ttl: Duration::from_secs(cli.forecast_ttl),
                favorites,
                units,
                theme: if cli.dark { Theme::Dark } else { Theme::Light },
            },
            initial_city,
            print: cli.print,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units_arg_aliases() {
        assert_eq!(parse_units_arg("metric").unwrap(), Units::Metric);
        assert_eq!(parse_units_arg("celsius").unwrap(), Units::Metric);
        assert_eq!(parse_units_arg("imperial").unwrap(), Units::Imperial);
        assert_eq!(parse_units_arg("F").unwrap(), Units::Imperial);
    }

    #[test]
    fn test_parse_units_arg_invalid() {
        let err = parse_units_arg("kelvin").unwrap_err();
        assert!(err.to_string().contains("Invalid units"));
        assert!(err.to_string().contains("kelvin"));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["citycast"]).unwrap();
        assert!(cli.city.is_none() || std::env::var("CITYCAST_CITY").is_ok());
        assert!(!cli.dark);
        assert!(!cli.print);
        assert!(cli.favorites.is_empty());
        assert_eq!(cli.geocode_ttl, 600);
        assert_eq!(cli.forecast_ttl, 300);
    }

    #[test]
    fn test_cli_parse_repeated_favorites() {
        let cli = Cli::parse_from(["citycast", "--favorite", "Oslo", "--favorite", "Lima"]);
        assert_eq!(cli.favorites, vec!["Oslo", "Lima"]);
    }

    #[test]
    fn test_cli_print_requires_city() {
        if std::env::var("CITYCAST_CITY").is_ok() {
            return;
        }
        assert!(Cli::try_parse_from(["citycast", "--print"]).is_err());
        assert!(Cli::try_parse_from(["citycast", "--print", "--city", "Lahore"]).is_ok());
    }

    #[test]
    fn test_startup_config_defaults() {
        let cli = Cli::parse_from(["citycast", "--timezone", "auto", "--units", "metric"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.session.timezone, "auto");
        assert_eq!(config.session.units, Units::Metric);
        assert_eq!(config.session.theme, Theme::Light);
        assert_eq!(config.session.geocode_ttl, Duration::from_secs(600));
        assert_eq!(config.session.forecast_ttl, Duration::from_secs(300));
        assert_eq!(config.session.favorites, DEFAULT_FAVORITES.to_vec());
    }

    #[test]
    fn test_startup_config_full() {
        let cli = Cli::parse_from([
            "citycast",
            "--city",
            "  Lahore ",
            "--timezone",
            "Asia/Karachi",
            "--units",
            "imperial",
            "--dark",
            "--favorite",
            "Multan",
            "--geocode-ttl",
            "60",
            "--forecast-ttl",
            "30",
            "--print",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_city.as_deref(), Some("Lahore"));
        assert_eq!(config.session.timezone, "Asia/Karachi");
        assert_eq!(config.session.units, Units::Imperial);
        assert_eq!(config.session.theme, Theme::Dark);
        assert_eq!(config.session.favorites, vec!["Multan"]);
        assert_eq!(config.session.geocode_ttl, Duration::from_secs(60));
        assert_eq!(config.session.forecast_ttl, Duration::from_secs(30));
        assert!(config.print);
    }

    #[test]
    fn test_startup_config_invalid_units() {
        let cli = Cli::parse_from(["citycast", "--units", "kelvin"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidUnits(_))
        ));
    }

    #[test]
    fn test_startup_config_blank_timezone() {
        let cli = Cli::parse_from(["citycast", "--timezone", "  ", "--units", "metric"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::EmptyTimezone)
        ));
    }

    #[test]
    fn test_startup_config_blank_city_is_ignored() {
        let cli = Cli::parse_from(["citycast", "--city", "   ", "--units", "metric"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_city.is_none());
    }
}
