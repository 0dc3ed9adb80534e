//! Application layer - Use cases and orchestration
//!
//! Contains the trip routing pipeline (leg building, mode resolution,
//! geometry fetching, aggregation) and the port definitions it talks to.
//! Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
