use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use translink_transit::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "feed-inspect",
    author,
    version,
    about = "Load bus network feeds from disk and run spatial queries against them",
    long_about = "Reads routes, stops, arrivals and route-map files into an in-memory \
                  network, then reports the nearest stop to a point and the stops and \
                  route patterns inside a map rectangle.\n\n\
                  Log output honours RUST_LOG."
)]
struct Args {
    /// Routes JSON file
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Stops JSON file
    #[arg(long)]
    stops: Option<PathBuf>,

    /// Compact route-map file (one pattern path per line)
    #[arg(long)]
    route_map: Option<PathBuf>,

    /// Arrivals JSON for one stop, as STOP=FILE (repeatable)
    #[arg(long, value_parser = parse_arrivals_arg)]
    arrivals: Vec<(StopNumber, PathBuf)>,

    /// Find the nearest stop to LAT,LON
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    near: Option<LatLon>,

    /// List stops and patterns inside NORTH,WEST,SOUTH,EAST
    #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
    bounds: Option<(LatLon, LatLon)>,

    /// Network config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Nearest-stop search radius in metres (overrides the config file)
    #[arg(long)]
    radius: Option<f64>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(value: &str) -> std::result::Result<LatLon, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    Ok(LatLon::new(parse_degrees(lat)?, parse_degrees(lon)?))
}

fn parse_bounds(value: &str) -> std::result::Result<(LatLon, LatLon), String> {
    let fields: Vec<&str> = value.split(',').collect();
    let [north, west, south, east] = fields.as_slice() else {
        return Err(format!("expected NORTH,WEST,SOUTH,EAST, got '{value}'"));
    };
    Ok((
        LatLon::new(parse_degrees(north)?, parse_degrees(west)?),
        LatLon::new(parse_degrees(south)?, parse_degrees(east)?),
    ))
}

fn parse_arrivals_arg(value: &str) -> std::result::Result<(StopNumber, PathBuf), String> {
    let (stop, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected STOP=FILE, got '{value}'"))?;
    let stop: u32 = stop
        .trim()
        .parse()
        .map_err(|_| format!("'{stop}' is not a stop number"))?;
    Ok((StopNumber::new(stop), PathBuf::from(path)))
}

fn parse_degrees(field: &str) -> std::result::Result<f64, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("'{field}' is not a coordinate"))
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().without_time())
        .with_writer(std::io::stderr);
    tracing_subscriber::registry().with(layer).with(filter).init();
}

fn load_config(args: &Args) -> Result<NetworkConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            NetworkConfig::from_json(&json).context("Failed to parse config")?
        }
        None => NetworkConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.nearest_stop_radius_m = radius;
        config.validate().context("Invalid --radius")?;
    }
    Ok(config)
}

fn load(network: &mut TransitNetwork, args: &Args) -> Result<()> {
    if let Some(path) = &args.routes {
        let summary = parse_routes(network, &FileDataSource::new(path))
            .with_context(|| format!("Failed to load routes from {}", path.display()))?;
        info!(routes = summary.routes, patterns = summary.patterns, "loaded routes");
    }

    if let Some(path) = &args.stops {
        let summary = parse_stops(network, &FileDataSource::new(path))
            .with_context(|| format!("Failed to load stops from {}", path.display()))?;
        info!(stops = summary.stops, links = summary.links, "loaded stops");
    }

    if let Some(path) = &args.route_map {
        parse_route_map(network, &FileDataSource::new(path))
            .with_context(|| format!("Failed to load route map from {}", path.display()))?;
    }

    for (stop, path) in &args.arrivals {
        parse_arrivals(network, *stop, &FileDataSource::new(path))
            .with_context(|| format!("Failed to load arrivals for stop {stop} from {}", path.display()))?;
    }

    Ok(())
}

fn print_stop(stop: &Stop) {
    let routes: Vec<&str> = stop.routes().iter().map(|r| r.as_str()).collect();
    println!(
        "  {} {} at {} [{}]",
        stop.number(),
        stop.name(),
        stop.location(),
        routes.join(", ")
    );
    for arrival in stop.upcoming_arrivals() {
        println!(
            "    {:>3} min  {} to {} ({})",
            arrival.countdown(),
            arrival.route(),
            arrival.destination(),
            arrival.status()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = load_config(&args)?;
    let mut network = TransitNetwork::with_config(config);
    load(&mut network, &args)?;

    let pattern_count: usize = network.routes().iter().map(|r| r.patterns().len()).sum();
    println!(
        "{} routes, {} patterns, {} stops",
        network.routes().len(),
        pattern_count,
        network.stops().len()
    );

    if let Some(point) = args.near {
        match network.find_nearest_stop(point) {
            Some(stop) => {
                let distance = distance_between(point, stop.location());
                println!("Nearest stop to {point} ({distance:.0} m):");
                print_stop(stop);
            }
            None => println!(
                "No stop within {} m of {point}",
                network.config().nearest_stop_radius_m
            ),
        }
    }

    if let Some((north_west, south_east)) = args.bounds {
        let mut stops = network.stops_in_rect(north_west, south_east);
        stops.sort_by_key(|stop| stop.number());
        println!("{} stops inside bounds:", stops.len());
        for stop in stops {
            print_stop(stop);
        }

        let mut patterns = network.patterns_in_rect(north_west, south_east);
        patterns.sort_by(|a, b| (a.route(), a.name()).cmp(&(b.route(), b.name())));
        println!("{} patterns inside bounds:", patterns.len());
        for pattern in patterns {
            println!(
                "  {}-{} to {} ({})",
                pattern.route(),
                pattern.name(),
                pattern.destination(),
                pattern.direction()
            );
        }
    }

    Ok(())
}
