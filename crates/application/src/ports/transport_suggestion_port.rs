//! Transport suggestion port
//!
//! Maps a distance to a ranked list of plausible transport modes.

use domain::value_objects::TransportMode;
#[cfg(test)]
use mockall::automock;

/// Port for distance-based transport suggestions
#[cfg_attr(test, automock)]
pub trait TransportSuggestionPort: Send + Sync {
    /// Ranked plausible modes for a leg of the given length, best first
    fn suggest(&self, distance_km: f64) -> Vec<TransportMode>;
}
