//! Route planner
//!
//! Runs the full pipeline (legs, modes, geometry, aggregation) and publishes
//! the result to subscribers. Every recompute is tagged with a generation;
//! a run whose generation is no longer the latest when it completes is
//! discarded so an older, slower run never overwrites a newer result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::entities::{City, HomeLocation};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::ports::{DirectionsPort, TransportSuggestionPort};
use crate::services::geometry_fetcher::GeometryFetcher;
use crate::services::leg_builder::build_legs;
use crate::services::mode_resolver::ModeResolver;
use crate::services::route_aggregator::{TripRoute, aggregate};

/// Published routing state
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteSnapshot {
    /// Generation of the run that produced `route` (0 before the first run)
    pub generation: u64,
    /// True while the latest run is in flight
    pub loading: bool,
    /// Last published route
    pub route: Option<TripRoute>,
}

/// Result of a recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run was the latest and its route was published
    Published(u64),
    /// A newer run started before this one completed
    Discarded(u64),
}

impl RunOutcome {
    /// Generation of the run
    #[must_use]
    pub const fn generation(self) -> u64 {
        match self {
            Self::Published(generation) | Self::Discarded(generation) => generation,
        }
    }

    /// Whether the run's route was published
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Orchestrates routing passes for a trip
pub struct RoutePlanner {
    resolver: ModeResolver,
    fetcher: GeometryFetcher,
    generation: AtomicU64,
    state: watch::Sender<RouteSnapshot>,
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("resolver", &self.resolver)
            .field("fetcher", &self.fetcher)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a planner
    #[must_use]
    pub fn new(
        directions: Arc<dyn DirectionsPort>,
        suggestions: Arc<dyn TransportSuggestionPort>,
    ) -> Self {
        let (state, _) = watch::channel(RouteSnapshot::default());
        Self {
            resolver: ModeResolver::new(suggestions),
            fetcher: GeometryFetcher::new(directions),
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Receive every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.state.subscribe()
    }

    /// Current published snapshot
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        self.state.borrow().clone()
    }

    /// Generation of the most recently started run
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run the pipeline once without touching published state
    #[instrument(skip(self, cities, home), fields(cities = cities.len(), has_home = home.is_some()))]
    pub async fn plan(&self, cities: &[City], home: Option<&HomeLocation>) -> TripRoute {
        let legs = build_legs(cities, home);
        let resolved = legs
            .into_iter()
            .map(|leg| {
                let mode = self.resolver.resolve(&leg);
                (leg, mode)
            })
            .collect();

        let route = aggregate(&self.fetcher.fetch_all(resolved).await);
        debug!(
            legs = route.legs.len(),
            gaps = route.gap_count(),
            total_km = route.total_distance_km,
            "Route planned"
        );
        route
    }

    /// Start a new run and publish its result if it is still the latest
    ///
    /// The previous route stays visible (with `loading` set) until a newer
    /// result is published. Only the latest run clears `loading`.
    pub async fn recompute(&self, cities: &[City], home: Option<&HomeLocation>) -> RunOutcome {
        // Bumped under the state lock so a superseded run cannot raise the
        // loading flag after a newer run has already cleared it
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            snapshot.loading = true;
        });

        let route = self.plan(cities, home).await;

        let published = self.state.send_if_modified(|snapshot| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *snapshot = RouteSnapshot {
                generation,
                loading: false,
                route: Some(route),
            };
            true
        });

        if published {
            info!(generation, "Route published");
            RunOutcome::Published(generation)
        } else {
            debug!(generation, latest = self.current_generation(), "Discarding stale route");
            RunOutcome::Discarded(generation)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use domain::value_objects::{CityId, GeoLocation, TransportMode};
    use geo_types::LineString;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{MockDirectionsPort, RouteDirections};
    use crate::services::transport_suggestions::DistanceBandSuggestions;

    /// Returns a route after a delay that depends on the destination longitude
    struct SlowDirections;

    #[async_trait]
    impl DirectionsPort for SlowDirections {
        async fn get_route_directions(
            &self,
            from: &GeoLocation,
            to: &GeoLocation,
        ) -> Result<Option<RouteDirections>, ApplicationError> {
            if to.longitude() < 5.0 {
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            Ok(Some(RouteDirections {
                geometry: LineString::from(vec![from.to_coord(), to.to_coord()]),
                distance_km: Some(42.0),
            }))
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    fn city(id: &str, order: i32, lon: f64) -> City {
        City::new(CityId::parse(id).unwrap(), id.to_uppercase(), "Country")
            .with_order(order)
            .with_coords(0.0, lon)
            .with_transport_mode(TransportMode::Car)
    }

    fn planner(directions: impl DirectionsPort + 'static) -> RoutePlanner {
        RoutePlanner::new(Arc::new(directions), Arc::new(DistanceBandSuggestions::new()))
    }

    #[tokio::test]
    async fn empty_trip_publishes_empty_route() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_get_route_directions().never();
        let planner = planner(directions);

        let outcome = planner.recompute(&[], None).await;

        assert_eq!(outcome, RunOutcome::Published(1));
        let snapshot = planner.snapshot();
        assert!(!snapshot.loading);
        let route = snapshot.route.unwrap();
        assert!(route.features.features.is_empty());
        assert!(route.total_distance_km.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn plan_does_not_publish() {
        let planner = planner(SlowDirections);
        let cities = vec![city("a", 0, 10.0), city("b", 1, 11.0)];

        let route = planner.plan(&cities, None).await;

        assert_eq!(route.legs.len(), 1);
        assert!(planner.snapshot().route.is_none());
        assert_eq!(planner.current_generation(), 0);
    }

    #[tokio::test]
    async fn stale_run_is_discarded() {
        let planner = planner(SlowDirections);
        let slow = vec![city("a", 0, 0.0), city("b", 1, 1.0)];
        let fast = vec![city("c", 0, 10.0), city("d", 1, 11.0)];

        let (first, second) = tokio::join!(planner.recompute(&slow, None), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            planner.recompute(&fast, None).await
        });

        assert_eq!(first, RunOutcome::Discarded(1));
        assert_eq!(second, RunOutcome::Published(2));

        let snapshot = planner.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert!(!snapshot.loading);
        let route = snapshot.route.unwrap();
        assert_eq!(route.legs[0].key().as_str(), "c-d");
    }

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let planner = planner(SlowDirections);
        let mut rx = planner.subscribe();
        let cities = vec![city("a", 0, 0.0), city("b", 1, 1.0)];

        let (outcome, saw_loading) = tokio::join!(planner.recompute(&cities, None), async {
            rx.changed().await.unwrap();
            rx.borrow_and_update().loading
        });

        assert!(outcome.is_published());
        assert!(saw_loading);
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.generation, outcome.generation());
    }

    #[tokio::test]
    async fn sequential_runs_each_publish() {
        let planner = planner(SlowDirections);
        let cities = vec![city("a", 0, 10.0), city("b", 1, 11.0)];

        assert_eq!(planner.recompute(&cities, None).await, RunOutcome::Published(1));
        assert_eq!(planner.recompute(&cities, None).await, RunOutcome::Published(2));
        assert_eq!(planner.snapshot().generation, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_runs_settle_on_latest_generation() {
        let planner = Arc::new(planner(SlowDirections));
        let cities = vec![city("a", 0, 10.0), city("b", 1, 11.0)];

        for _ in 0..20 {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let planner = Arc::clone(&planner);
                    let cities = cities.clone();
                    tokio::spawn(async move { planner.recompute(&cities, None).await })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for handle in handles {
                outcomes.push(handle.await.unwrap());
            }

            let latest = planner.current_generation();
            let snapshot = planner.snapshot();
            assert!(!snapshot.loading);
            assert_eq!(snapshot.generation, latest);
            assert_eq!(
                outcomes
                    .iter()
                    .filter(|outcome| outcome.generation() == latest)
                    .collect::<Vec<_>>(),
                vec![&RunOutcome::Published(latest)]
            );
        }

        assert_eq!(planner.current_generation(), 20 * 16);
    }

    #[tokio::test]
    async fn failed_lookups_still_publish_gaps() {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_get_route_directions()
            .returning(|_, _| Err(ApplicationError::RateLimited));
        let planner = planner(directions);
        let cities = vec![city("a", 0, 0.0), city("b", 1, 1.0)];

        let outcome = planner.recompute(&cities, None).await;

        assert!(outcome.is_published());
        let route = planner.snapshot().route.unwrap();
        assert_eq!(route.gap_count(), 1);
        assert!(route.features.features.is_empty());
        assert!(route.total_distance_km > 100.0);
    }
}
