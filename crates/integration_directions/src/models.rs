//! Directions and geocoding data models
//!
//! Typed routes and places plus the raw Mapbox response shapes they are
//! parsed from.

use domain::value_objects::GeoLocation;
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// A road route between two points
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    /// Route polyline in (lon, lat) order
    pub geometry: LineString<f64>,
    /// Route length in kilometers, when reported
    pub distance_km: Option<f64>,
}

impl DirectionsRoute {
    /// Number of points in the polyline
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.geometry.0.len()
    }
}

/// A place returned by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Short name (city, town, village or first address part)
    pub name: String,
    /// Full formatted address
    pub display_name: String,
    /// Country name, empty when unknown
    pub country: String,
    /// Coordinates
    pub location: GeoLocation,
}

/// Raw Mapbox directions response
#[derive(Debug, Deserialize)]
pub(crate) struct RawDirectionsResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

impl RawDirectionsResponse {
    /// Codes that mean "no drivable route" rather than a failure
    pub fn is_no_route(&self) -> bool {
        matches!(self.code.as_deref(), Some("NoRoute" | "NoSegment"))
    }

    /// Convert the first route into a typed route
    pub fn into_first_route(self) -> Option<DirectionsRoute> {
        self.routes.into_iter().next().map(RawRoute::into_route)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    /// Meters
    #[serde(default)]
    pub distance: Option<f64>,
}

impl RawRoute {
    fn into_route(self) -> DirectionsRoute {
        let coords = self
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|position| match position.as_slice() {
                [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                    Some(Coord { x: *lon, y: *lat })
                },
                _ => None,
            })
            .collect::<Vec<_>>();

        DirectionsRoute {
            geometry: LineString::new(coords),
            distance_km: self.distance.map(|meters| meters / 1000.0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {"type": "LineString", "coordinates": [[2.35, 48.85], [3.0, 49.5], [4.35, 50.85]]},
                "distance": 264321.5,
                "duration": 10800.0
            }]
        }"#;
        let raw: RawDirectionsResponse = serde_json::from_str(json).unwrap();
        assert!(!raw.is_no_route());

        let route = raw.into_first_route().unwrap();
        assert_eq!(route.point_count(), 3);
        assert!((route.geometry.0[0].x - 2.35).abs() < f64::EPSILON);
        assert!((route.geometry.0[0].y - 48.85).abs() < f64::EPSILON);
        assert!((route.distance_km.unwrap() - 264.3215).abs() < 1e-9);
    }

    #[test]
    fn test_parse_no_route() {
        let raw: RawDirectionsResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert!(raw.is_no_route());
        assert!(raw.into_first_route().is_none());
    }

    #[test]
    fn test_malformed_positions_are_dropped() {
        let json = r#"{
            "code": "Ok",
            "routes": [{"geometry": {"coordinates": [[1.0], [2.0, 3.0, 120.0], []]}}]
        }"#;
        let raw: RawDirectionsResponse = serde_json::from_str(json).unwrap();
        let route = raw.into_first_route().unwrap();
        assert_eq!(route.point_count(), 1);
        assert!(route.distance_km.is_none());
    }
}
