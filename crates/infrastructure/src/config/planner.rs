//! Route planner configuration

use domain::entities::DEFAULT_SEA_LIKE_THRESHOLD_KM;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Route planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerAppConfig {
    /// Gap legs longer than this are presented as probable water crossings
    #[serde(default = "default_sea_like_threshold")]
    pub sea_like_threshold_km: f64,

    /// Query the directions provider for land legs (default: true)
    ///
    /// When disabled every land leg becomes a gap.
    #[serde(default = "default_true")]
    pub allow_directions: bool,
}

const fn default_sea_like_threshold() -> f64 {
    DEFAULT_SEA_LIKE_THRESHOLD_KM
}

impl Default for PlannerAppConfig {
    fn default() -> Self {
        Self {
            sea_like_threshold_km: default_sea_like_threshold(),
            allow_directions: true,
        }
    }
}

impl PlannerAppConfig {
    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.sea_like_threshold_km.is_finite() || self.sea_like_threshold_km < 0.0 {
            return Err("sea_like_threshold_km must be a non-negative number".to_string());
        }
        Ok(())
    }
}
