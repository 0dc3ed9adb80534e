//! Mapbox directions client
//!
//! Fetches road geometry between two coordinates using the
//! [Mapbox Directions API](https://docs.mapbox.com/api/navigation/directions/).

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::DirectionsError;
use crate::models::{DirectionsRoute, RawDirectionsResponse};

/// Mapbox routing profile used for every request
const PROFILE: &str = "driving";

/// Trait for directions service clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Fetch a driving route between two points
    ///
    /// Returns `Ok(None)` when the provider has no route for the pair.
    async fn get_route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Option<DirectionsRoute>, DirectionsError>;

    /// Check if the directions service is usable
    async fn is_healthy(&self) -> bool;
}

/// Directions client for the Mapbox API
#[derive(Debug)]
pub struct MapboxDirectionsClient {
    client: Client,
    config: DirectionsConfig,
    cache: Option<Cache<String, DirectionsRoute>>,
}

impl MapboxDirectionsClient {
    /// Create a new Mapbox directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("tripweaver/0.1")
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(u64::from(config.cache_ttl_minutes) * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Cache key: coordinates rounded to ~1 m
    fn cache_key(from: &GeoLocation, to: &GeoLocation) -> String {
        format!(
            "{:.5},{:.5};{:.5},{:.5}",
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }

    fn route_url(&self, from: &GeoLocation, to: &GeoLocation) -> String {
        format!(
            "{}/directions/v5/mapbox/{PROFILE}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }

    /// Parse a response body into an optional route
    fn parse_route_response(body: &str) -> Result<Option<DirectionsRoute>, DirectionsError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        if raw.is_no_route() {
            return Ok(None);
        }

        Ok(raw.into_first_route())
    }
}

#[async_trait]
impl DirectionsClient for MapboxDirectionsClient {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn get_route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Option<DirectionsRoute>, DirectionsError> {
        if !self.config.has_token() {
            return Err(DirectionsError::ConfigurationError(
                "access_token is not set".to_string(),
            ));
        }

        let cache_key = Self::cache_key(from, to);
        if let Some(cache) = &self.cache
            && let Some(route) = cache.get(&cache_key).await
        {
            debug!("Directions cache hit");
            return Ok(Some(route));
        }

        let url = self.route_url(from, to);
        let params = [
            ("geometries", "geojson"),
            ("overview", "full"),
            ("access_token", self.config.access_token.as_str()),
        ];

        debug!(profile = PROFILE, "Requesting directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectionsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DirectionsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        if !status.is_success() {
            // Mapbox reports unroutable pairs as 422 with a NoSegment/NoRoute code
            if let Ok(raw) = serde_json::from_str::<RawDirectionsResponse>(&body)
                && raw.is_no_route()
            {
                debug!(code = ?raw.code, "No route between points");
                return Ok(None);
            }
            return Err(DirectionsError::RequestFailed(format!("HTTP {status}")));
        }

        let route = Self::parse_route_response(&body)?;

        match &route {
            Some(route) => {
                debug!(points = route.point_count(), distance_km = ?route.distance_km, "Route found");
                if let Some(cache) = &self.cache {
                    cache.insert(cache_key, route.clone()).await;
                }
            },
            None => warn!("Directions response contained no route"),
        }

        Ok(route)
    }

    async fn is_healthy(&self) -> bool {
        self.config.has_token()
    }
}
