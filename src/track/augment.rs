use gpx::{Gpx, Waypoint};

use crate::models::Poi;

pub const WAYPOINT_NAME: &str = "Water";
pub const WAYPOINT_SYMBOL: &str = "water-drop";

/// GPX waypoint marking a water POI
pub fn poi_waypoint(poi: &Poi) -> Waypoint {
    let mut wpt = Waypoint::new(geo_types::Point::new(poi.lon, poi.lat));
    wpt.name = Some(WAYPOINT_NAME.to_string());
    wpt.description = Some(WAYPOINT_NAME.to_string());
    wpt.symbol = Some(WAYPOINT_SYMBOL.to_string());
    wpt
}

/// Append one waypoint per POI, after any waypoint already in the trace
pub fn add_waypoints(gpx: &mut Gpx, pois: &[Poi]) {
    gpx.waypoints.extend(pois.iter().map(poi_waypoint));
}
