//! Traveler home location

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// The traveler's origin and return point
///
/// Absent when location permission was denied or unavailable; in that case
/// the trip simply has no Home legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl HomeLocation {
    /// Create a home location
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The home location as a validated point
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

impl From<GeoLocation> for HomeLocation {
    fn from(location: GeoLocation) -> Self {
        Self::new(location.latitude(), location.longitude())
    }
}
