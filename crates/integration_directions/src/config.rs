//! Directions service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Mapbox Directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL of the Mapbox API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public access token
    #[serde(default)]
    pub access_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

impl std::fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.mapbox.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_cache_ttl_minutes() -> u32 {
    30
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl DirectionsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            access_token: "test-token".to_string(),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Check if an access token is configured
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.access_token.trim().is_empty()
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

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectionsConfig::default();
        assert_eq!(config.base_url, "https://api.mapbox.com");
        assert!(config.access_token.is_empty());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cache_ttl_minutes, 30);
        assert!(!config.has_token());
    }

    #[test]
    fn test_testing_config() {
        let config = DirectionsConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.has_token());
        assert!(!config.caching_enabled());
    }

    #[test]
    fn test_validation_success() {
        assert!(DirectionsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = DirectionsConfig {
            base_url: "api.mapbox.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DirectionsConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = DirectionsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DirectionsConfig {
            access_token: "pk.secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("pk.secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: DirectionsConfig = serde_json::from_str(r#"{"access_token": "pk.x"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.mapbox.com");
        assert_eq!(config.access_token, "pk.x");
        assert_eq!(config.cache_ttl_minutes, 30);
    }
}
