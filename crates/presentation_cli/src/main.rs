//! Tripweaver CLI
//!
//! Plan multi-city trips from a JSON trip file and look up places.

#![allow(clippy::print_stdout)]

mod output;
mod trip_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::{
    CityLookupService, DirectionsPort, DistanceBandSuggestions, GeocodingPort, RoutePlanner,
};
use clap::{Parser, Subcommand};
use domain::value_objects::GeoLocation;
use infrastructure::{
    AppConfig, DirectionsAdapter, GeocodingAdapter, OfflineDirections, init_tracing,
};
use integration_directions::{MapboxDirectionsClient, NominatimGeocodingClient};
use tracing::{info, warn};

use crate::output::OutputFormat;
use crate::trip_file::TripFile;

/// Tripweaver CLI
#[derive(Parser)]
#[command(name = "tripweaver-cli")]
#[command(author, version, about = "Multi-city trip route planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "TRIPWEAVER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the route of a trip
    ///
    /// Example: tripweaver-cli plan --trip ./europe.json --format geojson
    Plan {
        /// Trip file (JSON with `cities` and optional `home`)
        #[arg(short, long)]
        trip: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Skip road lookups; land legs are drawn as gaps
        #[arg(long)]
        offline: bool,
    },

    /// Name the place at a coordinate
    Reverse {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Search places by name
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: u8,
    },

    /// Append a city at a coordinate to a trip file, as a map click would
    AddCity {
        /// Trip file to update
        #[arg(short, long)]
        trip: PathBuf,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_from(path)?;
    config
        .validate()
        .map_err(|problems| anyhow::anyhow!("invalid configuration: {}", problems.join("; ")))?;
    Ok(config)
}

async fn directions_port(
    config: &AppConfig,
    offline: bool,
) -> anyhow::Result<Arc<dyn DirectionsPort>> {
    if offline || !config.planner.allow_directions {
        return Ok(Arc::new(OfflineDirections));
    }

    let client = MapboxDirectionsClient::new(&config.directions.to_client_config())?;
    let adapter = DirectionsAdapter::new(Arc::new(client));
    if !adapter.is_available().await {
        warn!("Directions provider unavailable, land legs will be drawn as gaps");
        return Ok(Arc::new(OfflineDirections));
    }

    Ok(Arc::new(adapter))
}

fn geocoding_port(config: &AppConfig) -> anyhow::Result<Arc<dyn GeocodingPort>> {
    let client = NominatimGeocodingClient::new(&config.geocoding.to_client_config())?;
    Ok(Arc::new(GeocodingAdapter::new(Arc::new(client))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.clone().with_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Plan {
            trip,
            format,
            offline,
        } => {
            let trip = TripFile::load(&trip)?;
            let planner = RoutePlanner::new(
                directions_port(&config, offline).await?,
                Arc::new(DistanceBandSuggestions::new()),
            );

            let outcome = planner.recompute(&trip.cities, trip.home.as_ref()).await;
            info!(generation = outcome.generation(), "Planning finished");

            let route = planner.snapshot().route.unwrap_or_default();
            println!(
                "{}",
                output::render(&route, format, config.planner.sea_like_threshold_km)?
            );
        },

        Commands::Reverse { lat, lon } => {
            let location = GeoLocation::new(lat, lon)?;
            match geocoding_port(&config)?.reverse_geocode(&location).await? {
                Some(place) => {
                    println!("📍 {}", place.name);
                    println!("   {}", place.address);
                },
                None => println!("❌ No place found at {location}"),
            }
        },

        Commands::Search { query, limit } => {
            let lookup = CityLookupService::new(geocoding_port(&config)?);
            let cities = lookup.search(&query, limit).await?;

            if cities.is_empty() {
                println!("❌ No places found for \"{query}\"");
            }
            for (position, city) in (1..).zip(&cities) {
                let coords = city
                    .location()
                    .map_or_else(String::new, |location| format!(" ({location})"));
                println!("{position}. {}, {}{coords}", city.name, city.country);
            }
        },

        Commands::AddCity { trip: path, lat, lon } => {
            let location = GeoLocation::new(lat, lon)?;
            let mut trip = TripFile::load(&path)?;
            let lookup = CityLookupService::new(geocoding_port(&config)?);

            let city = lookup.city_from_map_click(location, trip.next_order()).await;
            println!(
                "➕ Added {} ({}) with order {}",
                city.name, city.country, city.order
            );
            trip.cities.push(city);
            trip.save(&path)?;
        },
    }

    Ok(())
}
