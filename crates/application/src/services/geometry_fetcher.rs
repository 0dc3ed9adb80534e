//! Geometry fetcher
//!
//! Obtains the drawable geometry and distance of each leg. Flight and ferry
//! legs are straight segments and never reach the directions provider. Land
//! legs ask the provider for a driving route; when that fails the leg becomes
//! a gap (no geometry) with a haversine distance, never a straight line over
//! land.

use std::sync::Arc;

use domain::entities::{PlannedLeg, ResolvedLeg};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::ports::{DirectionsPort, RouteDirections};
use crate::services::mode_resolver::ResolvedMode;

/// Fetches leg geometry from a directions provider
#[derive(Clone)]
pub struct GeometryFetcher {
    directions: Arc<dyn DirectionsPort>,
}

impl std::fmt::Debug for GeometryFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryFetcher")
            .field("directions", &"<DirectionsPort>")
            .finish()
    }
}

impl GeometryFetcher {
    /// Create a fetcher backed by the given provider
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>) -> Self {
        Self { directions }
    }

    /// Resolve one leg
    ///
    /// Never fails: provider errors and unusable routes turn into a gap.
    #[instrument(skip(self, leg), fields(leg = %leg.key(), mode = %resolved.mode))]
    pub async fn fetch(&self, leg: &PlannedLeg, resolved: ResolvedMode) -> ResolvedLeg {
        let haversine_km = leg.haversine_km();

        if resolved.mode.is_straight_line() {
            debug!("Straight segment, skipping directions lookup");
            return resolved_leg(leg, resolved, haversine_km, false, Some(leg.straight_line()));
        }

        let from = leg.from.location();
        let to = leg.to.location();

        match self.directions.get_route_directions(&from, &to).await {
            Ok(Some(route)) if route.is_drawable() => {
                let distance_km = provider_distance(&route).unwrap_or(haversine_km);
                debug!(points = route.geometry.0.len(), distance_km, "Route geometry found");
                resolved_leg(leg, resolved, distance_km, false, Some(route.geometry))
            },
            Ok(Some(route)) => {
                warn!(points = route.geometry.0.len(), "Degenerate route geometry, leaving gap");
                resolved_leg(leg, resolved, haversine_km, true, None)
            },
            Ok(None) => {
                warn!("No route found, leaving gap");
                resolved_leg(leg, resolved, haversine_km, true, None)
            },
            Err(e) => {
                warn!(error = %e, "Directions lookup failed, leaving gap");
                resolved_leg(leg, resolved, haversine_km, true, None)
            },
        }
    }

    /// Resolve every leg concurrently
    ///
    /// Output order matches input order. Each leg settles on its own, so one
    /// failing lookup never affects its siblings.
    pub async fn fetch_all(&self, legs: Vec<(PlannedLeg, ResolvedMode)>) -> Vec<ResolvedLeg> {
        join_all(
            legs.iter()
                .map(|(leg, resolved)| self.fetch(leg, *resolved)),
        )
        .await
    }
}

fn provider_distance(route: &RouteDirections) -> Option<f64> {
    route
        .distance_km
        .filter(|distance| distance.is_finite() && *distance >= 0.0)
}

fn resolved_leg(
    leg: &PlannedLeg,
    resolved: ResolvedMode,
    distance_km: f64,
    used_fallback: bool,
    geometry: Option<geo_types::LineString<f64>>,
) -> ResolvedLeg {
    ResolvedLeg {
        from: leg.from.clone(),
        to: leg.to.clone(),
        mode: resolved.mode,
        was_inferred: resolved.was_inferred,
        distance_km,
        used_fallback,
        geometry,
    }
}
