//! Road directions and geocoding integration for tripweaver
//!
//! Provides driving route geometry via the
//! [Mapbox Directions API](https://docs.mapbox.com/api/navigation/directions/)
//! and place lookup via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! [`DirectionsClient`] defines the route lookup interface, implemented by
//! [`MapboxDirectionsClient`]. [`GeocodingClient`] covers place search,
//! reverse geocoding and country resolution, implemented by
//! [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::value_objects::GeoLocation;
//! use integration_directions::{DirectionsClient, DirectionsConfig, MapboxDirectionsClient};
//!
//! let config = DirectionsConfig {
//!     access_token: "pk.your-token".into(),
//!     ..DirectionsConfig::default()
//! };
//! let client = MapboxDirectionsClient::new(&config)?;
//!
//! let paris = GeoLocation::new(48.8566, 2.3522)?;
//! let brussels = GeoLocation::new(50.8503, 4.3517)?;
//! let route = client.get_route(&paris, &brussels).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{DirectionsClient, MapboxDirectionsClient};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use models::{DirectionsRoute, Place};
