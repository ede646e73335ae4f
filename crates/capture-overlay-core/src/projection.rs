//! Spherical Web Mercator projection.
//!
//! Good enough to place overlay pixels on consumer web maps; not a geodesy
//! library. Assumes the provider's standard 256 px tiling at zoom 0.

use nalgebra::Point2;

use crate::GeoPoint;

/// Earth radius used by spherical Web Mercator, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Tile edge in pixels at zoom 0. Must match the map provider's tiling
/// convention; 256 is the standard for Mapbox/OSM-style maps.
pub const TILE_SIZE_PX: f64 = 256.0;

// log-tan diverges at the poles; poles are never realistic map centers here,
// so the clamp is silent.
const MAX_ABS_LAT_DEG: f64 = 89.9;

/// Project latitude/longitude to planar Web Mercator meters.
pub fn geo_to_meters(p: GeoPoint) -> Point2<f64> {
    let lat = p.lat.clamp(-MAX_ABS_LAT_DEG, MAX_ABS_LAT_DEG).to_radians();
    let lng = p.lng.to_radians();

    let x = EARTH_RADIUS_M * lng;
    let y = EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    Point2::new(x, y)
}

/// Exact algebraic inverse of [`geo_to_meters`].
pub fn meters_to_geo(m: Point2<f64>) -> GeoPoint {
    let lng = (m.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (m.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    GeoPoint::new(lat, lng)
}

/// Screen pixels per projected meter at the given map zoom level.
pub fn pixels_per_meter(zoom: f64) -> f64 {
    (TILE_SIZE_PX * 2f64.powf(zoom)) / (std::f64::consts::TAU * EARTH_RADIUS_M)
}
