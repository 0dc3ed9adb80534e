//! Geocoding port
//!
//! Reverse geocoding, place-to-country resolution and free-text place
//! search. Used when the traveler adds a city by clicking the map or by
//! searching; the routing pipeline itself never calls it.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Result of a reverse geocode lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseGeocodeResult {
    /// Short place name (city, town, village)
    pub name: String,
    /// Full formatted address
    pub address: String,
}

/// Country a place belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCountry {
    /// Country display name
    pub country_name: String,
}

/// A place found by free-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Place name
    pub name: String,
    /// Country display name (empty when unknown)
    pub country: String,
    /// Place coordinates
    pub location: GeoLocation,
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Convert coordinates to a place name and address
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<ReverseGeocodeResult>, ApplicationError>;

    /// Resolve the country of a named place
    async fn country_for_place(
        &self,
        place_name: &str,
    ) -> Result<Option<PlaceCountry>, ApplicationError>;

    /// Search places by free text
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodedPlace>, ApplicationError>;
}
