//! Application services - Use case implementations

mod city_lookup_service;
mod geometry_fetcher;
mod leg_builder;
mod mode_resolver;
mod route_aggregator;
mod route_planner;
mod transport_suggestions;

pub use city_lookup_service::{CityLookupService, MAX_SEARCH_LIMIT};
pub use geometry_fetcher::GeometryFetcher;
pub use leg_builder::build_legs;
pub use mode_resolver::{FALLBACK_MODE, ModeResolver, ResolvedMode};
pub use route_aggregator::{TripRoute, aggregate, format_distance_km};
pub use route_planner::{RoutePlanner, RouteSnapshot, RunOutcome};
pub use transport_suggestions::DistanceBandSuggestions;
