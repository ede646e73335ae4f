//! Geographic coordinates to/from the client-reported viewport pixel space.
//!
//! The mapping is anchored at the declared map center and zoom: project both
//! points to meters, scale the metric offset by the zoom's pixel density and
//! add it to the viewport midpoint. This avoids the map provider's internal
//! tile math and holds well for small extents at moderate-to-high zoom; it
//! degrades at low zoom / wide extents.
//!
//! Output is *reported* logical pixel space, not capture-pixel space.

use nalgebra::Point2;

use crate::{projection, GeoPoint, ViewportInfo};

/// Map a geographic point into reported-viewport pixel coordinates.
pub fn geo_to_reported_pixel(point: GeoPoint, viewport: &ViewportInfo) -> Point2<f64> {
    let center = projection::geo_to_meters(viewport.map_center);
    let p = projection::geo_to_meters(point);
    let ppm = projection::pixels_per_meter(viewport.map_zoom);

    let dx = (p.x - center.x) * ppm;
    // Geographic north maps to smaller pixel Y.
    let dy = -(p.y - center.y) * ppm;

    Point2::new(
        viewport.reported_width / 2.0 + dx,
        viewport.reported_height / 2.0 + dy,
    )
}

/// Exact inverse of [`geo_to_reported_pixel`].
pub fn reported_pixel_to_geo(px: f64, py: f64, viewport: &ViewportInfo) -> GeoPoint {
    let center = projection::geo_to_meters(viewport.map_center);
    let ppm = projection::pixels_per_meter(viewport.map_zoom);

    let dx = px - viewport.reported_width / 2.0;
    let dy = py - viewport.reported_height / 2.0;

    projection::meters_to_geo(Point2::new(center.x + dx / ppm, center.y - dy / ppm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> ViewportInfo {
        ViewportInfo {
            reported_width: 1280.0,
            reported_height: 800.0,
            map_center: GeoPoint::new(42.3601, -71.0589),
            map_zoom: 15.0,
            map_bounds: None,
        }
    }

    #[test]
    fn map_center_lands_at_viewport_midpoint() {
        let vp = viewport();
        let px = geo_to_reported_pixel(vp.map_center, &vp);
        assert_relative_eq!(px.x, 640.0, epsilon = 1e-9);
        assert_relative_eq!(px.y, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn north_of_center_has_smaller_y() {
        let vp = viewport();
        let north = GeoPoint::new(vp.map_center.lat + 0.001, vp.map_center.lng);
        let px = geo_to_reported_pixel(north, &vp);
        assert!(px.y < 400.0);
        assert_relative_eq!(px.x, 640.0, epsilon = 1e-9);
    }

    #[test]
    fn pixel_round_trip() {
        let vp = viewport();
        let p = GeoPoint::new(42.3622, -71.0553);
        let px = geo_to_reported_pixel(p, &vp);
        let back = reported_pixel_to_geo(px.x, px.y, &vp);
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-9);
        assert_relative_eq!(back.lng, p.lng, epsilon = 1e-9);
    }
}
