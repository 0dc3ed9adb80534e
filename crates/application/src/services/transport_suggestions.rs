//! Default distance-band transport ranking

use domain::value_objects::TransportMode;

use crate::ports::TransportSuggestionPort;

/// Upper bound of the walking band in kilometers
const WALKING_MAX_KM: f64 = 2.0;
/// Upper bound of the short road band in kilometers
const SHORT_MAX_KM: f64 = 100.0;
/// Upper bound of the medium (rail/bus) band in kilometers
const MEDIUM_MAX_KM: f64 = 700.0;

/// Ranks modes by which distance band a leg falls into
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceBandSuggestions;

impl DistanceBandSuggestions {
    /// Create the default ranking
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TransportSuggestionPort for DistanceBandSuggestions {
    fn suggest(&self, distance_km: f64) -> Vec<TransportMode> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Vec::new();
        }

        if distance_km < WALKING_MAX_KM {
            vec![TransportMode::Walking, TransportMode::Car]
        } else if distance_km < SHORT_MAX_KM {
            vec![TransportMode::Car, TransportMode::Bus, TransportMode::Train]
        } else if distance_km < MEDIUM_MAX_KM {
            vec![
                TransportMode::Train,
                TransportMode::Bus,
                TransportMode::Car,
                TransportMode::Flight,
            ]
        } else {
            vec![TransportMode::Flight, TransportMode::Train, TransportMode::Car]
        }
    }
}
