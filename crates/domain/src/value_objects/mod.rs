//! Value Objects - Immutable, identity-less domain primitives

mod city_id;
mod geo_location;
mod transport_mode;

pub use city_id::CityId;
pub use geo_location::{EARTH_RADIUS_KM, GeoLocation};
pub use transport_mode::{TransportMode, deserialize_explicit_mode};
