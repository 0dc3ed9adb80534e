//! Leg builder
//!
//! Turns the ordered city list and optional home location into the ordered
//! sequence of directed legs: Home→first, each adjacent city pair, last→Home.

use domain::entities::{City, HomeLocation, LegEndpoint, PlannedLeg};
use tracing::debug;

/// Build the directed legs of a trip
///
/// Cities are consumed in ascending `order`; ties keep their input position.
/// Any pair whose endpoints lack valid coordinates is skipped silently, and
/// Home legs are only produced when `home` is present and the first/last
/// city has valid coordinates.
#[must_use]
pub fn build_legs(cities: &[City], home: Option<&HomeLocation>) -> Vec<PlannedLeg> {
    let mut sorted: Vec<&City> = cities.iter().collect();
    sorted.sort_by_key(|city| city.order);

    let home = home
        .and_then(HomeLocation::location)
        .map(|location| LegEndpoint::Home { location });

    let mut legs = Vec::with_capacity(sorted.len() + 1);

    let first = sorted
        .first()
        .and_then(|city| city_endpoint(city).map(|endpoint| (endpoint, city.transport_mode)));
    if let (Some(home), Some((to, explicit_mode))) = (&home, first) {
        legs.push(PlannedLeg::new(home.clone(), to, explicit_mode));
    }

    for pair in sorted.windows(2) {
        let (from_city, to_city) = (pair[0], pair[1]);
        match (city_endpoint(from_city), city_endpoint(to_city)) {
            (Some(from), Some(to)) => {
                legs.push(PlannedLeg::new(from, to, to_city.transport_mode));
            },
            _ => debug!(
                from = %from_city.id,
                to = %to_city.id,
                "Skipping leg with missing coordinates"
            ),
        }
    }

    let last = sorted.last().and_then(|city| city_endpoint(city));
    if let (Some(home), Some(from)) = (home, last) {
        legs.push(PlannedLeg::new(from, home, None));
    }

    debug!(cities = cities.len(), legs = legs.len(), "Built trip legs");
    legs
}

fn city_endpoint(city: &City) -> Option<LegEndpoint> {
    city.location().map(|location| LegEndpoint::City {
        id: city.id.clone(),
        name: city.name.clone(),
        location,
    })
}
