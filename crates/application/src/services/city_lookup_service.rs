//! City lookup service
//!
//! Turns a map click or a free-text search into new trip cities. New cities
//! get a temporary id; the caller assigns the final id when it persists them.

use std::sync::Arc;

use domain::entities::City;
use domain::value_objects::{CityId, GeoLocation};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// Maximum number of search results callers may ask for
pub const MAX_SEARCH_LIMIT: u8 = 20;

/// Creates cities from geocoding lookups
#[derive(Clone)]
pub struct CityLookupService {
    geocoding: Arc<dyn GeocodingPort>,
}

impl std::fmt::Debug for CityLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityLookupService")
            .field("geocoding", &"<GeocodingPort>")
            .finish()
    }
}

impl CityLookupService {
    /// Create a new lookup service
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoding }
    }

    /// Build a city for a clicked map location
    ///
    /// Lookup failures never fail the click: the city is named after its
    /// coordinates and its country is left empty.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn city_from_map_click(&self, location: GeoLocation, order: i32) -> City {
        let place = match self.geocoding.reverse_geocode(&location).await {
            Ok(place) => place.filter(|p| !p.name.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                None
            },
        };

        let (name, country) = match place {
            Some(place) => {
                let country = self.country_of(&place.name).await;
                (place.name, country)
            },
            None => (location.to_string(), String::new()),
        };

        debug!(%name, %country, "Resolved clicked location");
        City::new(CityId::temporary(), name, country)
            .with_coords(location.latitude(), location.longitude())
            .with_order(order)
    }

    /// Search places and return them as unsaved cities
    ///
    /// Results are ordered by relevance; their `order` follows that ranking.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query or a zero limit, and
    /// propagates geocoding failures.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<City>, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApplicationError::InvalidInput("search query is empty".into()));
        }
        if limit == 0 {
            return Err(ApplicationError::InvalidInput("search limit must be positive".into()));
        }

        let places = self
            .geocoding
            .search(query, limit.min(MAX_SEARCH_LIMIT))
            .await?;

        debug!(results = places.len(), "Place search finished");
        Ok(places
            .into_iter()
            .zip(0..)
            .map(|(place, order)| {
                City::new(CityId::temporary(), place.name, place.country)
                    .with_coords(place.location.latitude(), place.location.longitude())
                    .with_order(order)
            })
            .collect())
    }

    async fn country_of(&self, place_name: &str) -> String {
        match self.geocoding.country_for_place(place_name).await {
            Ok(country) => country.map(|c| c.country_name).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, place_name, "Country lookup failed");
                String::new()
            },
        }
    }
}
