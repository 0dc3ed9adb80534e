//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: Mapbox directions and Nominatim geocoding
//! - `planner`: Route planner behaviour
//! - `telemetry`: Log filtering and output format
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TRIPWEAVER_*` environment variables (nested keys separated by `__`,
//! e.g. `TRIPWEAVER_DIRECTIONS__ACCESS_TOKEN`).

mod integrations;
mod planner;
mod telemetry;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{DirectionsAppConfig, GeocodingAppConfig};
pub use planner::PlannerAppConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRIPWEAVER";

/// Config file looked up in the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "config";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directions provider configuration
    #[serde(default)]
    pub directions: DirectionsAppConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Route planner configuration
    #[serde(default)]
    pub planner: PlannerAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or the default
    /// lookup, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, a source cannot be
    /// parsed, or a value has the wrong type.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn build(path: Option<&Path>, env: config::Environment) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        debug!(config = ?app_config, "Configuration loaded");
        Ok(app_config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns all problems found, each prefixed with its section name.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let problems: Vec<String> = [
            ("directions", self.directions.validate()),
            ("geocoding", self.geocoding.validate()),
            ("planner", self.planner.validate()),
            ("telemetry", self.telemetry.validate()),
        ]
        .into_iter()
        .filter_map(|(section, result)| result.err().map(|e| format!("{section}: {e}")))
        .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
