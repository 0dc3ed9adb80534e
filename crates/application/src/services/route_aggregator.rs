//! Route aggregator
//!
//! Folds resolved legs into the drawable feature collection plus per-leg and
//! total distances. Distances stay unrounded here; rounding happens only when
//! a value is formatted for display.

use std::collections::HashMap;

use domain::entities::{LegKey, ResolvedLeg};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

/// Below this many kilometers a distance is shown with one decimal
const DISPLAY_DECIMAL_BELOW_KM: f64 = 10.0;

/// Aggregated result of one routing pass
#[derive(Debug, Clone, Serialize)]
pub struct TripRoute {
    /// Resolved legs in trip order, gaps included
    pub legs: Vec<ResolvedLeg>,
    /// One LineString feature per leg with geometry
    pub features: FeatureCollection,
    /// Distance per leg key, gaps included
    pub per_leg_distance_km: HashMap<LegKey, f64>,
    /// Sum of all per-leg distances
    pub total_distance_km: f64,
}

impl Default for TripRoute {
    fn default() -> Self {
        aggregate(&[])
    }
}

impl TripRoute {
    /// Distance recorded for a leg
    #[must_use]
    pub fn distance_for(&self, key: &LegKey) -> Option<f64> {
        self.per_leg_distance_km.get(key).copied()
    }

    /// Number of legs that could not be drawn
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.legs.iter().filter(|leg| !leg.has_geometry()).count()
    }

    /// Legs flagged as probable water crossings
    pub fn open_water_legs(&self, threshold_km: f64) -> impl Iterator<Item = &ResolvedLeg> {
        self.legs
            .iter()
            .filter(move |leg| leg.looks_like_open_water(threshold_km))
    }

    /// Total distance formatted for display
    #[must_use]
    pub fn total_display(&self) -> String {
        format_distance_km(self.total_distance_km)
    }
}

/// Aggregate resolved legs into a trip route
#[must_use]
pub fn aggregate(legs: &[ResolvedLeg]) -> TripRoute {
    let mut per_leg_distance_km: HashMap<LegKey, f64> = HashMap::with_capacity(legs.len());
    let mut features = Vec::with_capacity(legs.len());

    for (index, leg) in legs.iter().enumerate() {
        *per_leg_distance_km.entry(leg.key()).or_insert(0.0) += usable_distance(leg.distance_km);

        if let Some(feature) = leg_feature(index, leg) {
            features.push(feature);
        }
    }

    // Leg order, not map order: the total must be identical between runs
    let total_distance_km = legs.iter().map(|leg| usable_distance(leg.distance_km)).sum();

    TripRoute {
        legs: legs.to_vec(),
        features: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        per_leg_distance_km,
        total_distance_km,
    }
}

/// Format a distance for display
///
/// One decimal below 10 km, whole kilometers above.
#[must_use]
pub fn format_distance_km(distance_km: f64) -> String {
    let distance_km = usable_distance(distance_km);
    if distance_km < DISPLAY_DECIMAL_BELOW_KM {
        format!("{distance_km:.1} km")
    } else {
        format!("{distance_km:.0} km")
    }
}

fn usable_distance(distance_km: f64) -> f64 {
    if distance_km.is_finite() && distance_km >= 0.0 {
        distance_km
    } else {
        0.0
    }
}

fn leg_feature(index: usize, leg: &ResolvedLeg) -> Option<Feature> {
    let line = leg.geometry.as_ref()?;

    let mut properties = JsonObject::new();
    properties.insert("mode".into(), json!(leg.mode));
    properties.insert("leg_key".into(), json!(leg.key()));
    properties.insert("leg_index".into(), json!(index));
    properties.insert("distance_km".into(), json!(usable_distance(leg.distance_km)));
    properties.insert("from".into(), json!(leg.from.label()));
    properties.insert("to".into(), json!(leg.to.label()));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}
