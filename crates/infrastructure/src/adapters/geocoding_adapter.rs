//! Geocoding adapter - Implements GeocodingPort using integration_directions

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{GeocodedPlace, GeocodingPort, PlaceCountry, ReverseGeocodeResult};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_directions::{GeocodingClient, GeocodingError};
use tracing::instrument;

/// Adapter for place lookups from a geocoding client
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"<GeocodingClient>")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new geocoding adapter
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn map_error(error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
            GeocodingError::InvalidQuery(msg) => ApplicationError::InvalidInput(msg),
            other => ApplicationError::ExternalService(format!("Geocoding failed: {other}")),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<ReverseGeocodeResult>, ApplicationError> {
        let place = self
            .client
            .reverse_geocode(location)
            .await
            .map_err(Self::map_error)?;

        Ok(place.map(|place| ReverseGeocodeResult {
            name: place.name,
            address: place.display_name,
        }))
    }

    #[instrument(skip(self))]
    async fn country_for_place(
        &self,
        place_name: &str,
    ) -> Result<Option<PlaceCountry>, ApplicationError> {
        let country = self
            .client
            .country_for_place(place_name)
            .await
            .map_err(Self::map_error)?;

        Ok(country.map(|country_name| PlaceCountry { country_name }))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeocodedPlace>, ApplicationError> {
        let places = self
            .client
            .search(query, limit)
            .await
            .map_err(Self::map_error)?;

        Ok(places
            .into_iter()
            .map(|place| GeocodedPlace {
                name: place.name,
                country: place.country,
                location: place.location,
            })
            .collect())
    }
}
