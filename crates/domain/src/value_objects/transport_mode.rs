//! Transport mode classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;

/// How a traveler covers a single leg of the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Plane
    Flight,
    /// Rail
    Train,
    /// Private car
    Car,
    /// Bus / coach
    Bus,
    /// Boat
    Ferry,
    /// On foot
    Walking,
    /// Generic land fallback when nothing more specific is known
    Driving,
}

impl TransportMode {
    /// Every mode, in the order the UI lists them
    pub const ALL: [Self; 7] = [
        Self::Flight,
        Self::Train,
        Self::Car,
        Self::Bus,
        Self::Ferry,
        Self::Walking,
        Self::Driving,
    ];

    /// Modes offered for a leg that looks like it crosses open water
    pub const OVER_WATER: [Self; 2] = [Self::Flight, Self::Ferry];

    /// Whether this mode is drawn as a straight segment without asking a
    /// directions provider
    #[must_use]
    pub const fn is_straight_line(&self) -> bool {
        matches!(self, Self::Flight | Self::Ferry)
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Car => "car",
            Self::Bus => "bus",
            Self::Ferry => "ferry",
            Self::Walking => "walking",
            Self::Driving => "driving",
        }
    }

    /// Emoji representation for summaries
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Flight => "✈️",
            Self::Train => "🚆",
            Self::Car | Self::Driving => "🚗",
            Self::Bus => "🚌",
            Self::Ferry => "⛴️",
            Self::Walking => "🚶",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::Train => "Train",
            Self::Car => "Car",
            Self::Bus => "Bus",
            Self::Ferry => "Ferry",
            Self::Walking => "Walk",
            Self::Driving => "Drive",
        }
    }

    /// Parse an explicit mode as stored on a city
    ///
    /// Empty or whitespace-only input means "no explicit mode".
    ///
    /// # Errors
    /// Returns an error for a non-empty string that names no known mode
    pub fn parse_explicit(s: &str) -> Result<Option<Self>, DomainError> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flight" | "plane" | "fly" => Ok(Self::Flight),
            "train" | "rail" => Ok(Self::Train),
            "car" => Ok(Self::Car),
            "bus" | "coach" => Ok(Self::Bus),
            "ferry" | "boat" => Ok(Self::Ferry),
            "walking" | "walk" => Ok(Self::Walking),
            "driving" | "drive" => Ok(Self::Driving),
            _ => Err(DomainError::InvalidTransportMode(s.to_string())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional explicit mode, mapping `null` and `""` to `None`
///
/// For use with `#[serde(deserialize_with = ...)]` on nullable mode fields.
pub fn deserialize_explicit_mode<'de, D>(deserializer: D) -> Result<Option<TransportMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => TransportMode::parse_explicit(&s).map_err(serde::de::Error::custom),
    }
}
