//! Directions adapter - Implements DirectionsPort using integration_directions

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{DirectionsPort, RouteDirections};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_directions::{DirectionsClient, DirectionsError};
use tracing::{debug, instrument};

/// Adapter for road directions from a directions client
pub struct DirectionsAdapter {
    client: Arc<dyn DirectionsClient>,
}

impl std::fmt::Debug for DirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsAdapter")
            .field("client", &"<DirectionsClient>")
            .finish()
    }
}

impl DirectionsAdapter {
    /// Create a new directions adapter
    #[must_use]
    pub fn new(client: Arc<dyn DirectionsClient>) -> Self {
        Self { client }
    }

    fn map_error(error: DirectionsError) -> ApplicationError {
        match error {
            DirectionsError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            DirectionsError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(format!("Directions lookup failed: {other}")),
        }
    }
}

#[async_trait]
impl DirectionsPort for DirectionsAdapter {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    async fn get_route_directions(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Option<RouteDirections>, ApplicationError> {
        let route = self
            .client
            .get_route(from, to)
            .await
            .map_err(Self::map_error)?;

        debug!(found = route.is_some(), "Directions lookup finished");
        Ok(route.map(|route| RouteDirections {
            geometry: route.geometry,
            distance_km: route.distance_km,
        }))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
