//! City waypoint entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{CityId, GeoLocation, TransportMode, deserialize_explicit_mode};

/// A waypoint in the trip
///
/// Coordinates are optional: a city without a valid latitude/longitude pair
/// still belongs to the trip but is excluded from every leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Stable identifier (temporary until persisted)
    pub id: CityId,
    /// Display name
    pub name: String,
    /// Display country
    #[serde(default)]
    pub country: String,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Position in the trip; ties keep insertion order
    #[serde(default)]
    pub order: i32,
    /// Explicit mode for the leg arriving at this city
    #[serde(
        default,
        deserialize_with = "deserialize_explicit_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub transport_mode: Option<TransportMode>,
    /// First day at this city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day at this city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl City {
    /// Create a city without coordinates at order 0
    #[must_use]
    pub fn new(id: CityId, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            latitude: None,
            longitude: None,
            order: 0,
            transport_mode: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Set coordinates
    #[must_use]
    pub const fn with_coords(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the trip position
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the explicit mode for the incoming leg
    #[must_use]
    pub const fn with_transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = Some(mode);
        self
    }

    /// Set the stay dates
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// The city's location, if it has a valid coordinate pair
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        GeoLocation::from_optional(self.latitude, self.longitude)
    }

    /// Whether the city can take part in routing
    #[must_use]
    pub fn has_location(&self) -> bool {
        self.location().is_some()
    }
}
