//! Offline directions - a DirectionsPort that never finds a route
//!
//! Used when road lookups are disabled or no network is wanted: every land
//! leg resolves to a gap while flight and ferry legs still draw.

use application::error::ApplicationError;
use application::ports::{DirectionsPort, RouteDirections};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;

/// Directions port that reports "no route" for every request
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDirections;

#[async_trait]
impl DirectionsPort for OfflineDirections {
    async fn get_route_directions(
        &self,
        _from: &GeoLocation,
        _to: &GeoLocation,
    ) -> Result<Option<RouteDirections>, ApplicationError> {
        Ok(None)
    }

    async fn is_available(&self) -> bool {
        false
    }
}
