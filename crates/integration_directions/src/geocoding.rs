//! Nominatim geocoding client
//!
//! Place search, reverse geocoding and country resolution using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Implements rate limiting (max 1 request/second per Nominatim usage policy)
//! and search result caching to minimize API calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::models::Place;

/// Minimum spacing between two Nominatim requests
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Comma-separated ISO country codes to restrict searches (empty for worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Preferred result language (`accept-language`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Skip the per-request delay (tests against a local mock only)
    #[serde(default)]
    pub disable_rate_limit: bool,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
            language: default_language(),
            disable_rate_limit: false,
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            disable_rate_limit: true,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }

        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query was empty or otherwise unusable
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::RateLimitExceeded | Self::Timeout
        )
    }
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places by free text, best match first
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodingError>;

    /// Convert coordinates to a place; `None` when nothing is there
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<Option<Place>, GeocodingError>;

    /// Country of the best match for a place name
    async fn country_for_place(&self, place_name: &str) -> Result<Option<String>, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Cache<String, Vec<Place>>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("tripweaver/0.1 (https://github.com/twohreichel/tripweaver)")
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.cache_ttl_hours > 0 {
            Duration::from_secs(config.cache_ttl_hours * 3600)
        } else {
            Duration::from_secs(1) // Minimal TTL when "disabled"
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(
                Instant::now()
                    .checked_sub(MIN_REQUEST_INTERVAL)
                    .unwrap_or_else(Instant::now),
            )),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        if self.config.disable_rate_limit {
            return;
        }
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            let wait = MIN_REQUEST_INTERVAL.saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::InvalidQuery(
                "Query must not be empty".to_string(),
            ));
        }

        let cache_key = format!("{}|{limit}", query.to_lowercase());
        if let Some(places) = self.cache.get(&cache_key).await {
            debug!(%query, "Geocoding cache hit");
            return Ok(places);
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("limit", limit.max(1).to_string()),
            ("accept-language", self.config.language.clone()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Searching places");
        let results: Vec<NominatimResult> = self.get_json("search", &params).await?;

        let places: Vec<Place> = results
            .into_iter()
            .filter_map(NominatimResult::into_place)
            .collect();

        self.cache.insert(cache_key, places.clone()).await;
        debug!(count = places.len(), "Places found");
        Ok(places)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<Option<Place>, GeocodingError> {
        let params = [
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("zoom", "10".to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        debug!("Reverse geocoding");
        let result: NominatimReverse = self.get_json("reverse", &params).await?;

        if let Some(error) = result.error {
            debug!(%error, "Nothing found at location");
            return Ok(None);
        }

        Ok(result.place.into_place())
    }

    #[instrument(skip(self))]
    async fn country_for_place(&self, place_name: &str) -> Result<Option<String>, GeocodingError> {
        let places = self.search(place_name, 1).await?;
        Ok(places
            .into_iter()
            .next()
            .map(|place| place.country)
            .filter(|country| !country.is_empty()))
    }
}

/// Raw Nominatim search/reverse result
#[derive(Debug, Deserialize)]
struct NominatimResult {
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

impl NominatimResult {
    fn into_place(self) -> Option<Place> {
        let latitude = self.lat.as_deref()?.parse().ok()?;
        let longitude = self.lon.as_deref()?.parse().ok()?;
        let location = GeoLocation::new(latitude, longitude).ok()?;

        let display_name = self.display_name.unwrap_or_default();
        let address = self.address.unwrap_or_default();
        let name = address
            .locality()
            .or_else(|| self.name.filter(|n| !n.is_empty()))
            .or_else(|| {
                display_name
                    .split(',')
                    .next()
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(ToString::to_string)
            })?;

        Some(Place {
            name,
            display_name,
            country: address.country.unwrap_or_default(),
            location,
        })
    }
}

/// Raw reverse response: either a place or `{"error": "..."}`
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    place: NominatimResult,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    town: Option<String>,
    #[serde(default)]
    village: Option<String>,
    #[serde(default)]
    municipality: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl NominatimAddress {
    fn locality(&self) -> Option<String> {
        [&self.city, &self.town, &self.village, &self.municipality]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .cloned()
    }
}
