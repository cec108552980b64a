//! Thirsty - add nearby drinking water POI to a GPX trace
//!
//! The pipeline reads a trace, queries OpenStreetMap (Overpass API) for
//! water points inside its bounding box, keeps the ones close to the trace
//! and writes them back as GPX waypoints.

pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod overpass;
pub mod pipeline;
pub mod progress;
pub mod proximity;
pub mod track;

#[cfg(test)]
mod test_support;

pub use error::{Result, ThirstyError};
pub use models::{BoundingBox, GeoPoint, Poi, PoiCategory};
