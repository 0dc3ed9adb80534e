//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod directions_port;
mod geocoding_port;
mod transport_suggestion_port;

#[cfg(test)]
pub use directions_port::MockDirectionsPort;
pub use directions_port::{DirectionsPort, RouteDirections};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodedPlace, GeocodingPort, PlaceCountry, ReverseGeocodeResult};
#[cfg(test)]
pub use transport_suggestion_port::MockTransportSuggestionPort;
pub use transport_suggestion_port::TransportSuggestionPort;
