//! Domain entities - Trip waypoints and the legs derived from them

mod city;
mod home_location;
mod leg;

pub use city::City;
pub use home_location::HomeLocation;
pub use leg::{LegEndpoint, LegKey, PlannedLeg, ResolvedLeg, DEFAULT_SEA_LIKE_THRESHOLD_KM};
