//! GPX trace handling: loading, bounds, augmentation and serialization.

mod augment;
mod bounds;
mod io;
mod sanitize;

pub use augment::{add_waypoints, poi_waypoint, WAYPOINT_NAME, WAYPOINT_SYMBOL};
pub use bounds::route_bounds;
pub use io::{download_gpx, is_remote, read_gpx, read_gpx_file, to_sanitized_xml};
pub use sanitize::sanitize_gpx_text;

use gpx::Gpx;

use crate::models::GeoPoint;

/// All track points in traversal order (tracks, then segments, then points).
///
/// Standalone waypoints and `<rte>` routes are not part of the trace.
pub fn route_points(gpx: &Gpx) -> Vec<GeoPoint> {
    gpx.tracks
        .iter()
        .flat_map(|trk| trk.segments.iter())
        .flat_map(|seg| seg.points.iter())
        .map(GeoPoint::from)
        .collect()
}

/// Track segments as separate point lists, for drawing polylines
pub fn segment_points(gpx: &Gpx) -> Vec<Vec<GeoPoint>> {
    gpx.tracks
        .iter()
        .flat_map(|trk| trk.segments.iter())
        .map(|seg| seg.points.iter().map(GeoPoint::from).collect())
        .collect()
}
