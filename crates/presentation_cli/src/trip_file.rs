//! Trip file persistence
//!
//! A trip is stored as JSON: `{ "cities": [...], "home": {...} | null }`.

use std::path::Path;

use anyhow::Context;
use domain::entities::{City, HomeLocation};
use serde::{Deserialize, Serialize};

/// A trip as read from disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripFile {
    /// Waypoints in any order; `order` decides the sequence
    #[serde(default)]
    pub cities: Vec<City>,
    /// Traveler home, if known
    #[serde(default)]
    pub home: Option<HomeLocation>,
}

impl TripFile {
    /// Read and parse a trip file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read trip file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid trip file {}", path.display()))
    }

    /// Write the trip back as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write trip file {}", path.display()))
    }

    /// Order value for a city appended at the end
    #[must_use]
    pub fn next_order(&self) -> i32 {
        self.cities
            .iter()
            .map(|city| city.order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }
}
