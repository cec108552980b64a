//! Great-circle distance on a spherical earth.
//!
//! The haversine formula treats the earth as a sphere of radius
//! [`EARTH_RADIUS_M`]. Compared to an ellipsoidal geodesic (WGS84) the error
//! reaches about 0.5%, i.e. half a meter at a 100 m threshold. That is fine
//! for deciding whether a fountain is "near" a trace, but the value must not
//! be used where survey-grade distances are expected.
//!
//! The central angle is `2·atan2(√a, √(1−a))`, not geo's `2·asin(√a)`;
//! the strict `<` threshold test relies on this exact value.

use crate::models::GeoPoint;

/// Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance in meters between two GPS points
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
