//! End-to-end run: load trace, query Overpass, filter, augment, write.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::map;
use crate::models::{Poi, PoiCategory};
use crate::overpass::OverpassClient;
use crate::progress::ProgressObserver;
use crate::proximity::{self, DEFAULT_MAX_DISTANCE_M};
use crate::track;

/// What to run the pipeline on
#[derive(Debug, Clone)]
pub struct Options {
    /// Local GPX path or `http(s)` URL
    pub input: String,
    pub output: PathBuf,
    /// Search distance around the trace, in meters
    pub max_distance_m: f64,
    pub categories: Vec<PoiCategory>,
    /// Also write `<output>.html`
    pub html: bool,
}

impl Options {
    pub fn new(input: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            categories: vec![PoiCategory::default()],
            html: false,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct Summary {
    pub fetched: usize,
    pub retained: Vec<Poi>,
    pub output: PathBuf,
    pub map: Option<PathBuf>,
}

/// Run the full pipeline. Any failure aborts before the output is written.
pub fn run(
    options: &Options,
    config: &Config,
    progress: &mut dyn ProgressObserver,
) -> Result<Summary> {
    proximity::validate_distance(options.max_distance_m)?;

    let http = Client::builder()
        .user_agent(config.overpass.user_agent.clone())
        .timeout(config.overpass.http_timeout())
        .build()?;

    let mut gpx = if track::is_remote(&options.input) {
        track::download_gpx(&http, &options.input, progress)?
    } else {
        track::read_gpx_file(&options.input)?
    };

    let points = track::route_points(&gpx);
    info!("Loaded trace with {} points", points.len());
    let bounds = track::route_bounds(&points)?;

    let overpass = OverpassClient::with_client(http, &config.overpass);
    let pois = overpass.fetch_pois(&bounds, &options.categories)?;
    let fetched = pois.len();

    let retained =
        proximity::filter_pois_near_route(&points, pois, options.max_distance_m, progress)?;
    track::add_waypoints(&mut gpx, &retained);
    // The writer only emits GPX 1.1; 1.0 inputs are upgraded on output
    gpx.version = gpx::GpxVersion::Gpx11;

    let map_file = if options.html {
        let path = map::map_path(&options.output);
        map::write_map(&path, &track::segment_points(&gpx), &retained)?;
        Some(path)
    } else {
        None
    };

    let xml = track::to_sanitized_xml(&gpx)?;
    fs::write(&options.output, xml)?;

    Ok(Summary {
        fetched,
        retained,
        output: options.output.clone(),
        map: map_file,
    })
}
