//! Tracing subscriber setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! human-readable or JSON output on stderr, keeping stdout free for command
//! results.

mod subscriber;

pub use subscriber::{TelemetryError, build_filter, init_tracing};
