//! Trip legs
//!
//! A leg is a derived, in-memory view: it is rebuilt from the city list and
//! home location on every change and never persisted.

use std::fmt;

use geo_types::LineString;
use serde::{Serialize, Serializer};

use crate::value_objects::{CityId, GeoLocation, TransportMode};

/// Distance above which a failed land route is presented as "open water"
pub const DEFAULT_SEA_LIKE_THRESHOLD_KM: f64 = 20.0;

/// One end of a leg
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegEndpoint {
    /// The traveler's home location
    Home {
        /// Home coordinates
        location: GeoLocation,
    },
    /// A city waypoint
    City {
        /// City identifier
        id: CityId,
        /// City display name
        name: String,
        /// City coordinates
        location: GeoLocation,
    },
}

impl LegEndpoint {
    /// Coordinates of this endpoint
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        match self {
            Self::Home { location } | Self::City { location, .. } => *location,
        }
    }

    /// Semantic label ("Home" or the city name)
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Home { .. } => "Home",
            Self::City { name, .. } => name,
        }
    }

    /// Identifier used in leg keys
    #[must_use]
    pub fn key_part(&self) -> &str {
        match self {
            Self::Home { .. } => "home",
            Self::City { id, .. } => id.as_str(),
        }
    }

    /// Whether this endpoint is the home location
    #[must_use]
    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home { .. })
    }
}

/// Ordered pair of endpoint identifiers, e.g. `"c1-c2"` or `"home-c1"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LegKey(String);

impl LegKey {
    /// Build the key for a leg between two endpoints
    #[must_use]
    pub fn between(from: &LegEndpoint, to: &LegEndpoint) -> Self {
        Self(format!("{}-{}", from.key_part(), to.key_part()))
    }

    /// Borrow the key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for LegKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A directed leg before its mode and geometry are known
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedLeg {
    /// Start of the leg
    pub from: LegEndpoint,
    /// End of the leg
    pub to: LegEndpoint,
    /// Mode the traveler chose for this leg (taken from the destination city)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_mode: Option<TransportMode>,
}

impl PlannedLeg {
    /// Create a planned leg
    #[must_use]
    pub const fn new(
        from: LegEndpoint,
        to: LegEndpoint,
        explicit_mode: Option<TransportMode>,
    ) -> Self {
        Self {
            from,
            to,
            explicit_mode,
        }
    }

    /// Key identifying this leg
    #[must_use]
    pub fn key(&self) -> LegKey {
        LegKey::between(&self.from, &self.to)
    }

    /// Great-circle distance between the endpoints
    #[must_use]
    pub fn haversine_km(&self) -> f64 {
        self.from.location().distance_km(&self.to.location())
    }

    /// Straight two-point segment between the endpoints (lon, lat order)
    #[must_use]
    pub fn straight_line(&self) -> LineString<f64> {
        LineString::from(vec![self.from.location().to_coord(), self.to.location().to_coord()])
    }
}

/// A leg with its effective mode, distance and geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLeg {
    /// Start of the leg
    pub from: LegEndpoint,
    /// End of the leg
    pub to: LegEndpoint,
    /// Effective transport mode
    pub mode: TransportMode,
    /// True when the mode came from distance inference rather than the user
    pub was_inferred: bool,
    /// Provider-reported or haversine-estimated distance
    pub distance_km: f64,
    /// True when no real route geometry could be obtained
    pub used_fallback: bool,
    /// Route geometry; `None` renders as a gap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<LineString<f64>>,
}

impl ResolvedLeg {
    /// Key identifying this leg
    #[must_use]
    pub fn key(&self) -> LegKey {
        LegKey::between(&self.from, &self.to)
    }

    /// Whether this leg has something to draw
    #[must_use]
    pub const fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Heuristic "this leg probably crosses water" flag
    ///
    /// Purely routing-failure driven: a provider with no data for a remote
    /// road produces the same signal as an actual sea crossing.
    #[must_use]
    pub fn looks_like_open_water(&self, threshold_km: f64) -> bool {
        self.used_fallback && self.distance_km > threshold_km
    }

    /// Modes the UI should offer for this leg
    #[must_use]
    pub fn allowed_modes(&self, threshold_km: f64) -> &'static [TransportMode] {
        if self.looks_like_open_water(threshold_km) {
            &TransportMode::OVER_WATER
        } else {
            &TransportMode::ALL
        }
    }
}
