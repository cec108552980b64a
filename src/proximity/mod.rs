//! Proximity filtering of POIs against a route.
//!
//! A POI is kept iff its great-circle distance to the nearest route point is
//! strictly less than the threshold. Route points are indexed in an R-tree
//! so the cost per POI stays close to logarithmic in the route length.

mod haversine;
mod index;

pub use haversine::{haversine, EARTH_RADIUS_M};
pub use index::RouteIndex;

use tracing::{debug, info};

use crate::error::{Result, ThirstyError};
use crate::models::{GeoPoint, Poi};
use crate::progress::ProgressObserver;

/// Default search distance around the trace, in meters
pub const DEFAULT_MAX_DISTANCE_M: f64 = 100.0;

/// Reject thresholds that are not strictly positive (NaN included)
pub fn validate_distance(max_distance_m: f64) -> Result<()> {
    if max_distance_m > 0.0 {
        Ok(())
    } else {
        Err(ThirstyError::InvalidParameter(format!(
            "distance must be > 0 meters, got {}",
            max_distance_m
        )))
    }
}

/// Keep only POIs near the route, preserving their input order
pub fn filter_pois_near_route(
    route: &[GeoPoint],
    pois: Vec<Poi>,
    max_distance_m: f64,
    progress: &mut dyn ProgressObserver,
) -> Result<Vec<Poi>> {
    validate_distance(max_distance_m)?;
    let index = RouteIndex::build(route)?;

    progress.start("Filtering POI", pois.len() as u64);

    let total = pois.len();
    let mut nearby = Vec::new();
    for poi in pois {
        if index.is_near(poi.location(), max_distance_m) {
            debug!(
                "Keeping POI {} at ({}, {})",
                poi.id.unwrap_or_default(),
                poi.lat,
                poi.lon
            );
            nearby.push(poi);
        }
        progress.advance(1);
    }

    progress.finish();
    info!(
        "{} of {} POI within {} m of the route",
        nearby.len(),
        total,
        max_distance_m
    );

    Ok(nearby)
}
