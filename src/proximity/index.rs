//! Spatial index over route points.
//!
//! Points are stored as unit vectors on the sphere. Chord length between
//! two unit vectors is `2·sin(θ/2)`, monotone in the central angle θ, so a
//! chord-radius query returns every point whose great-circle distance is
//! below the matching angle. Candidates are then checked with the exact
//! haversine distance, which keeps results identical to a full scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use super::haversine::{haversine, EARTH_RADIUS_M};
use crate::error::{Result, ThirstyError};
use crate::models::GeoPoint;

/// Relative and absolute slack added to the chord radius so that floating
/// point error never drops a point that haversine would accept.
const CHORD_REL_SLACK: f64 = 1e-6;
const CHORD_ABS_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    xyz: [f64; 3],
    point: GeoPoint,
}

impl IndexedPoint {
    fn new(point: GeoPoint) -> Self {
        Self {
            xyz: to_unit_vector(point),
            point,
        }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xyz)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        squared_chord(&self.xyz, point)
    }
}

fn to_unit_vector(p: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (p.lat.to_radians(), p.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn squared_chord(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Squared chord radius covering every point closer than `distance_m`
fn search_radius_2(distance_m: f64) -> f64 {
    let angle = (distance_m / EARTH_RADIUS_M).min(std::f64::consts::PI);
    let chord = 2.0 * (angle / 2.0).sin() * (1.0 + CHORD_REL_SLACK) + CHORD_ABS_SLACK;
    chord * chord
}

/// R-tree over the points of a route
pub struct RouteIndex {
    tree: RTree<IndexedPoint>,
}

impl RouteIndex {
    /// Build the index. Fails with [`ThirstyError::EmptyRoute`] on an empty route.
    pub fn build(route: &[GeoPoint]) -> Result<Self> {
        if route.is_empty() {
            return Err(ThirstyError::EmptyRoute);
        }

        let indexed: Vec<IndexedPoint> = route.iter().copied().map(IndexedPoint::new).collect();
        let tree = RTree::bulk_load(indexed);
        debug!("Route index built with {} points", tree.size());

        Ok(Self { tree })
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Haversine distance to the nearest route point, if one lies within
    /// `max_distance_m` (inclusive, plus rounding slack).
    pub fn nearest_within(&self, target: GeoPoint, max_distance_m: f64) -> Option<f64> {
        let query = to_unit_vector(target);
        self.tree
            .locate_within_distance(query, search_radius_2(max_distance_m))
            .map(|ip| haversine(target, ip.point))
            .min_by(f64::total_cmp)
    }

    /// True iff some route point is strictly closer than `max_distance_m`
    pub fn is_near(&self, target: GeoPoint, max_distance_m: f64) -> bool {
        self.nearest_within(target, max_distance_m)
            .map(|d| d < max_distance_m)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_route_rejected() {
        assert!(matches!(
            RouteIndex::build(&[]),
            Err(ThirstyError::EmptyRoute)
        ));
    }

    #[test]
    fn test_nearest_within() {
        let route = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)];
        let index = RouteIndex::build(&route).unwrap();
        assert_eq!(index.len(), 2);

        let target = GeoPoint::new(0.0, 0.0095);
        let d = index.nearest_within(target, 1000.0).unwrap();
        assert!((d - haversine(target, route[1])).abs() < 1e-9);

        assert!(index.nearest_within(GeoPoint::new(10.0, 10.0), 1000.0).is_none());
    }

    #[test]
    fn test_huge_radius_reaches_antipode() {
        let index = RouteIndex::build(&[GeoPoint::new(0.0, 0.0)]).unwrap();
        let antipode = GeoPoint::new(0.0, 180.0);
        assert!(index.is_near(antipode, 2.0e7 + 1.0e6));
        assert!(!index.is_near(antipode, 1.0e7));
    }

    #[test]
    fn test_unit_vectors_on_sphere() {
        for (lat, lon) in [(0.0, 0.0), (90.0, 0.0), (-33.9, 151.2), (64.1, -21.9)] {
            let v = to_unit_vector(GeoPoint::new(lat, lon));
            let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }
}
