//! Domain layer for tripweaver
//!
//! Contains the trip waypoints, legs, transport modes and the geographic
//! primitives the routing pipeline is built on. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
