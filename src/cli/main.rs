//! Command line entry point.
//!
//! Adds drinking water POI found near a GPX trace as waypoints.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use thirsty::config::Config;
use thirsty::pipeline::{self, Options};
use thirsty::progress::ConsoleProgress;
use thirsty::proximity::DEFAULT_MAX_DISTANCE_M;
use thirsty::PoiCategory;

#[derive(Parser, Debug)]
#[command(name = "thirsty")]
#[command(about = "Add water POI to a GPX trace")]
struct Args {
    /// Input GPX trace (local path or http(s) URL)
    input: String,

    /// Output GPX trace
    output: PathBuf,

    /// Search distance around trace, in meters
    #[arg(short, long, default_value_t = DEFAULT_MAX_DISTANCE_M, allow_negative_numbers = true)]
    distance: f64,

    /// Generate HTML interactive map to <output>.html
    #[arg(long)]
    html: bool,

    /// Type of amenities to consider: water, point, tap, spring, fountain (default: water)
    #[arg(short, long = "poi-type", value_parser = parse_category)]
    poi_type: Vec<PoiCategory>,

    /// Optional TOML config file (Overpass endpoint, timeouts)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_category(s: &str) -> Result<PoiCategory, String> {
    s.parse().map_err(|e: thirsty::ThirstyError| e.to_string())
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let mut categories = args.poi_type;
    if categories.is_empty() {
        categories.push(PoiCategory::default());
    }
    let names: Vec<&str> = categories.iter().map(|c| c.name()).collect();
    info!("Selected amenities: {:?}", names);

    let options = Options {
        input: args.input,
        output: args.output,
        max_distance_m: args.distance,
        categories,
        html: args.html,
    };

    let mut progress = ConsoleProgress::new();
    let summary = pipeline::run(&options, &config, &mut progress)
        .with_context(|| format!("Failed to process {}", options.input))?;

    if let Some(map) = &summary.map {
        info!("Map written to {}", map.display());
    }
    info!(
        "Added {} POI to {} ({} fetched)",
        summary.retained.len(),
        summary.output.display(),
        summary.fetched
    );

    Ok(())
}
