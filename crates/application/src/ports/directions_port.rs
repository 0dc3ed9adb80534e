//! Directions provider port
//!
//! Defines the interface for fetching road-following route geometry between
//! two points. Adapters in the infrastructure layer implement this port
//! using a routing API.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use geo_types::LineString;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A route returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDirections {
    /// Route geometry in (lon, lat) order
    pub geometry: LineString<f64>,
    /// Route length in kilometers, when the provider reports one
    pub distance_km: Option<f64>,
}

impl RouteDirections {
    /// Whether the geometry has enough points to draw a line
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.geometry.0.len() >= 2
    }
}

/// Port for route directions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Fetch a driving route between two points
    ///
    /// `Ok(None)` means the provider answered but found no route.
    async fn get_route_directions(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Option<RouteDirections>, ApplicationError>;

    /// Check if the directions service can be queried at all
    ///
    /// `false` means every lookup would fail (e.g. missing credentials).
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use geo_types::coord;

    use super::*;

    fn _assert_object_safe(_: &dyn DirectionsPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DirectionsPort>();
    }

    #[test]
    fn single_point_route_is_not_drawable() {
        let route = RouteDirections {
            geometry: LineString::new(vec![coord! { x: 0.0, y: 0.0 }]),
            distance_km: Some(1.0),
        };
        assert!(!route.is_drawable());

        let route = RouteDirections {
            geometry: LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]),
            distance_km: None,
        };
        assert!(route.is_drawable());
    }
}
