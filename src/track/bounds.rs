use geo::{BoundingRect, MultiPoint};

use crate::error::{Result, ThirstyError};
use crate::models::{BoundingBox, GeoPoint};

/// Minimal bounding box containing every route point
pub fn route_bounds(points: &[GeoPoint]) -> Result<BoundingBox> {
    let multi: MultiPoint<f64> = points.iter().map(|p| geo_types::Point::from(*p)).collect();
    let rect = multi.bounding_rect().ok_or(ThirstyError::EmptyRoute)?;

    Ok(BoundingBox::new(
        rect.min().y,
        rect.min().x,
        rect.max().y,
        rect.max().x,
    ))
}
