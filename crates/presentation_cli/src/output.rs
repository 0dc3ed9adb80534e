//! Route rendering for the terminal

use std::fmt::Write;

use application::{TripRoute, format_distance_km};
use clap::ValueEnum;
use domain::entities::ResolvedLeg;

/// How `plan` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered list of legs
    #[default]
    Summary,
    /// GeoJSON feature collection of the drawable legs
    Geojson,
    /// Full route as JSON
    Json,
}

/// Render a planned route in the requested format
pub fn render(
    route: &TripRoute,
    format: OutputFormat,
    sea_like_threshold_km: f64,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Summary => Ok(summary(route, sea_like_threshold_km)),
        OutputFormat::Geojson => serde_json::to_string_pretty(&route.features),
        OutputFormat::Json => serde_json::to_string_pretty(route),
    }
}

/// Human-readable leg list, numbered from 1
pub fn summary(route: &TripRoute, sea_like_threshold_km: f64) -> String {
    if route.legs.is_empty() {
        return "No legs: add at least two cities with coordinates.".to_string();
    }

    let mut out = String::new();
    for (step, leg) in (1..).zip(&route.legs) {
        let _ = writeln!(out, "{}", leg_line(step, leg));
        if leg.looks_like_open_water(sea_like_threshold_km) {
            let _ = writeln!(out, "   ⚠️  No road found, looks like open water: try flight or ferry");
        } else if leg.used_fallback {
            let _ = writeln!(out, "   ⚠️  No road route found");
        }
    }

    let _ = write!(out, "Total: {}", route.total_display());
    let gaps = route.gap_count();
    if gaps > 0 {
        let _ = write!(out, " ({gaps} leg(s) without geometry)");
    }
    out
}

fn leg_line(step: usize, leg: &ResolvedLeg) -> String {
    let inferred = if leg.was_inferred { " (suggested)" } else { "" };
    format!(
        "{step}. {} → {}  {} {}{inferred}  {}",
        leg.from.label(),
        leg.to.label(),
        leg.mode.emoji(),
        leg.mode.label(),
        format_distance_km(leg.distance_km)
    )
}

#[cfg(test)]
mod tests {
    use application::aggregate;
    use domain::entities::{LegEndpoint, PlannedLeg};
    use domain::value_objects::{CityId, GeoLocation, TransportMode};

    use super::*;

    fn endpoint(id: &str, lat: f64, lon: f64) -> LegEndpoint {
        LegEndpoint::City {
            id: CityId::parse(id).unwrap(),
            name: id.to_uppercase(),
            location: GeoLocation::new(lat, lon).unwrap(),
        }
    }

    fn leg(from: LegEndpoint, to: LegEndpoint, mode: TransportMode, gap: bool) -> ResolvedLeg {
        let planned = PlannedLeg::new(from, to, None);
        ResolvedLeg {
            distance_km: planned.haversine_km(),
            geometry: (!gap).then(|| planned.straight_line()),
            from: planned.from,
            to: planned.to,
            mode,
            was_inferred: true,
            used_fallback: gap,
        }
    }

    #[test]
    fn summary_numbers_legs_from_one() {
        let route = aggregate(&[
            leg(endpoint("a", 0.0, 0.0), endpoint("b", 0.0, 0.01), TransportMode::Walking, false),
            leg(endpoint("b", 0.0, 0.01), endpoint("c", 0.0, 1.0), TransportMode::Car, false),
        ]);

        let text = summary(&route, 20.0);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("1. A → B"));
        assert!(lines[0].contains("(suggested)"));
        assert!(lines[1].starts_with("2. B → C"));
        assert!(lines[1].ends_with("110 km"));
        assert!(lines[2].starts_with("Total: "));
    }

    #[test]
    fn long_gap_gets_open_water_hint() {
        let route = aggregate(&[leg(
            endpoint("a", 0.0, 0.0),
            endpoint("b", 0.0, 2.0),
            TransportMode::Driving,
            true,
        )]);

        let text = summary(&route, 20.0);
        assert!(text.contains("open water"));
        assert!(text.contains("1 leg(s) without geometry"));
    }

    #[test]
    fn empty_route_has_hint() {
        assert!(summary(&TripRoute::default(), 20.0).starts_with("No legs"));
    }

    #[test]
    fn geojson_output_is_a_feature_collection() {
        let route = aggregate(&[leg(
            endpoint("a", 0.0, 0.0),
            endpoint("b", 1.0, 1.0),
            TransportMode::Flight,
            false,
        )]);

        let json = render(&route, OutputFormat::Geojson, 20.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 1);
    }
}
