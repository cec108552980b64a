//! Core data models for the POI enrichment pipeline.

pub mod point;
pub mod poi;

pub use poi::{Poi, PoiCategory};
pub use point::{BoundingBox, GeoPoint};
