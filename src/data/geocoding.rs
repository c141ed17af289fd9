//! Open-Meteo geocoding client
//!
//! Resolves free-text city names to coordinates. Every failure mode of the
//! lookup folds into a single [`GeocodeError::NotFound`]; the underlying cause
//! is only logged.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::Location;

/// Base URL for the Open-Meteo geocoding API
const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

/// Candidates requested when resolving a search
const RESOLVE_COUNT: u8 = 5;

/// Candidates requested for the suggestion list
const SUGGEST_COUNT: u8 = 6;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// The only error the geocoder reports to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("City not found. Try another name or check spelling.")]
    NotFound,
}

/// Search response; `results` is absent when nothing matches.
///
/// Entries are kept as raw JSON so one malformed candidate does not sink the
/// whole list.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

impl SearchResponse {
    /// Well-formed candidates, in the provider's ranking order
    fn locations(self) -> Vec<Location> {
        self.results
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<SearchResult>(entry) {
                Ok(result) => Some(Location::from(result)),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed geocoding result");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
    name: String,
    country: Option<String>,
}

impl From<SearchResult> for Location {
    fn from(result: SearchResult) -> Self {
        let display_name = match result.country {
            Some(country) if !country.is_empty() => format!("{}, {}", result.name, country),
            _ => result.name,
        };
        Location {
            latitude: result.latitude,
            longitude: result.longitude,
            display_name,
        }
    }
}

/// Client for the Open-Meteo geocoding search endpoint
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_GEOCODING_URL)
    }

    /// Creates a client against a different host (e.g. a mock server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a city name to the provider's top-ranked match.
    ///
    /// Blank input returns `NotFound` without touching the network.
    pub async fn resolve(&self, city: &str) -> Result<Location, GeocodeError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(GeocodeError::NotFound);
        }

        match self.search(city, RESOLVE_COUNT).await {
            Ok(mut locations) if !locations.is_empty() => Ok(locations.swap_remove(0)),
            Ok(_) => {
                debug!(city, "No geocoding results");
                Err(GeocodeError::NotFound)
            }
            Err(e) => {
                debug!(city, error = %e, "Geocoding failed");
                Err(GeocodeError::NotFound)
            }
        }
    }

    /// Returns up to six candidate locations for a partial city name.
    ///
    /// Any failure degrades to an empty list.
    pub async fn suggest(&self, text: &str) -> Vec<Location> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        match self.search(text, SUGGEST_COUNT).await {
            Ok(locations) => locations,
            Err(e) => {
                warn!(text, error = %e, "Fetching suggestions failed");
                Vec::new()
            }
        }
    }

    async fn search(&self, name: &str, count: u8) -> Result<Vec<Location>, reqwest::Error> {
        let url = format!("{}/v1/search", self.base_url);
        let count = count.to_string();

        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[("name", name), ("count", count.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.locations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LAHORE_RESPONSE: &str = r#"{
        "results": [
            {
                "id": 1172451,
                "name": "Lahore",
                "latitude": 31.558,
                "longitude": 74.35071,
                "country_code": "PK",
                "timezone": "Asia/Karachi",
                "country": "Pakistan",
                "admin1": "Punjab"
            },
            {
                "id": 4705710,
                "name": "Lahore",
                "latitude": 30.6,
                "longitude": -98.0,
                "country": "United States"
            }
        ],
        "generationtime_ms": 0.5
    }"#;

    #[test]
    fn test_parse_search_response() {
        let response: SearchResponse = serde_json::from_str(LAHORE_RESPONSE).expect("parse");
        let locations = response.locations();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].display_name, "Lahore, Pakistan");
        assert!((locations[0].latitude - 31.558).abs() < 0.001);
    }

    #[test]
    fn test_parse_response_without_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.2}"#).expect("parse");
        assert!(response.locations().is_empty());
    }

    #[test]
    fn test_malformed_candidates_are_skipped() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "results": [
                    { "name": "Lahore", "latitude": 31.558, "longitude": 74.35071, "country": "Pakistan" },
                    { "name": "Lahore", "longitude": -98.0 },
                    { "name": "Lahore", "latitude": "north", "longitude": 1.0 }
                ]
            }"#,
        )
        .expect("parse");
        let locations = response.locations();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].display_name, "Lahore, Pakistan");
    }

    #[test]
    fn test_display_name_without_country() {
        let result = SearchResult {
            latitude: 0.0,
            longitude: 0.0,
            name: "Null Island".to_string(),
            country: None,
        };
        assert_eq!(Location::from(result).display_name, "Null Island");
    }

    #[tokio::test]
    async fn test_resolve_picks_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Lahore"))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LAHORE_RESPONSE))
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        let location = client.resolve("  Lahore ").await.expect("resolve");

        assert_eq!(location.display_name, "Lahore, Pakistan");
        assert!((location.longitude - 74.35071).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_resolve_skips_malformed_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Lahore"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "results": [
                        { "id": 1, "name": "Lahore", "country": "Pakistan" },
                        { "name": "Lahore", "latitude": 30.6, "longitude": -98.0, "country": "United States" }
                    ]
                }"#,
            ))
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        let location = client.resolve("Lahore").await.expect("resolve");

        assert_eq!(location.display_name, "Lahore, United States");
        assert!((location.latitude - 30.6).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_resolve_with_only_malformed_results_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{ "results": [ { "name": "Lahore" } ] }"#),
            )
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        assert_eq!(client.resolve("Lahore").await, Err(GeocodeError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_blank_input_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LAHORE_RESPONSE))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        assert_eq!(client.resolve("").await, Err(GeocodeError::NotFound));
        assert_eq!(client.resolve("   \t").await, Err(GeocodeError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_failures_collapse_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "Atlantis"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("name", "Broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("name", "Garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        assert_eq!(client.resolve("Atlantis").await, Err(GeocodeError::NotFound));
        assert_eq!(client.resolve("Broken").await, Err(GeocodeError::NotFound));
        assert_eq!(client.resolve("Garbled").await, Err(GeocodeError::NotFound));
    }

    #[tokio::test]
    async fn test_suggest_requests_six_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("count", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LAHORE_RESPONSE))
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        let suggestions = client.suggest("Lah").await;

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].display_name, "Lahore, United States");
    }

    #[tokio::test]
    async fn test_suggest_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = GeocodingClient::with_base_url(server.uri());
        assert!(client.suggest("Lah").await.is_empty());
        assert!(client.suggest("").await.is_empty());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            GeocodeError::NotFound.to_string(),
            "City not found. Try another name or check spelling."
        );
    }
}
