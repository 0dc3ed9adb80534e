//! External service configurations: Mapbox directions and Nominatim geocoding.

use integration_directions::{DirectionsConfig, NominatimConfig};
use serde::{Deserialize, Serialize};

// ==============================
// Directions Configuration
// ==============================

/// Mapbox Directions API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectionsAppConfig {
    /// Base URL of the Mapbox API (default: https://api.mapbox.com)
    #[serde(default = "default_directions_base_url")]
    pub base_url: String,

    /// Public access token; land legs become gaps when unset
    #[serde(default)]
    pub access_token: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_directions_timeout")]
    pub timeout_secs: u64,

    /// Route cache TTL in minutes, 0 disables (default: 30)
    #[serde(default = "default_directions_cache_ttl")]
    pub cache_ttl_minutes: u32,
}

impl std::fmt::Debug for DirectionsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &if self.access_token.is_empty() { "<unset>" } else { "[REDACTED]" },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

fn default_directions_base_url() -> String {
    "https://api.mapbox.com".to_string()
}

const fn default_directions_timeout() -> u64 {
    10
}

const fn default_directions_cache_ttl() -> u32 {
    30
}

impl Default for DirectionsAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_directions_base_url(),
            access_token: String::new(),
            timeout_secs: default_directions_timeout(),
            cache_ttl_minutes: default_directions_cache_ttl(),
        }
    }
}

impl DirectionsAppConfig {
    /// Convert to the integration client configuration
    #[must_use]
    pub fn to_client_config(&self) -> DirectionsConfig {
        DirectionsConfig {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_minutes: self.cache_ttl_minutes,
        }
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.to_client_config().validate()
    }
}

// ==============================
// Geocoding Configuration
// ==============================

/// Nominatim geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Base URL of the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Search cache TTL in hours, 0 disables (default: 24)
    #[serde(default = "default_geocoding_cache_ttl")]
    pub cache_ttl_hours: u64,

    /// ISO country codes to restrict searches to (empty for worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Preferred result language (default: en)
    #[serde(default = "default_geocoding_language")]
    pub language: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout() -> u64 {
    5
}

const fn default_geocoding_cache_ttl() -> u64 {
    24
}

fn default_geocoding_language() -> String {
    "en".to_string()
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            cache_ttl_hours: default_geocoding_cache_ttl(),
            country_filter: String::new(),
            language: default_geocoding_language(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to the integration client configuration
    #[must_use]
    pub fn to_client_config(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_hours: self.cache_ttl_hours,
            country_filter: self.country_filter.clone(),
            language: self.language.clone(),
            disable_rate_limit: false,
        }
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.to_client_config().validate()
    }
}
