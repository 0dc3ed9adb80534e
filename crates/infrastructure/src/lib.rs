//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the directions and geocoding adapters, layered configuration
//! and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DirectionsAppConfig, GeocodingAppConfig, PlannerAppConfig, TelemetryAppConfig,
};
pub use telemetry::{TelemetryError, init_tracing};
