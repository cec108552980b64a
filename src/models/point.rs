//! Geographic points and bounding boxes.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon, degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&gpx::Waypoint> for GeoPoint {
    fn from(wpt: &gpx::Waypoint) -> Self {
        let point = wpt.point();
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::Point::new(p.lon, p.lat)
    }
}

/// Axis-aligned lat/lon box. Antimeridian crossing is not handled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Overpass bbox filter: `(south,west,north,east)`
    pub fn to_overpass(&self) -> String {
        format!("({},{},{},{})", self.south, self.west, self.north, self.east)
    }
}
