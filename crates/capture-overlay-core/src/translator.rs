//! Request-scoped composition of the viewport mapper and the capture scaler.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    canvas::CaptureScaler, projection, viewport, CanvasState, CaptureGeometry, GeoBounds,
    GeoPoint, ViewportInfo,
};

/// Axis-aligned canvas-space rectangle, `min` inclusive of the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The four corners of the map-bounds rectangle in capture pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundsCorners {
    pub nw: (i32, i32),
    pub ne: (i32, i32),
    pub sw: (i32, i32),
    pub se: (i32, i32),
}

/// Immutable per-request translator between geographic, drawing-canvas and
/// capture-pixel coordinates.
///
/// Derived scale factors are computed exactly once at construction and reused
/// by every query, so repeated conversions cannot drift.
///
/// The geo path and the canvas path are composed separately and never share
/// the canvas zoom/pan stage: the map layer and the drawing layer are two
/// logically independent coordinate systems that happen to share one pixel
/// buffer. Geo-anchored elements (grid over the map, center marker, bounds
/// rectangle) go through [`geo_to_capture_pixel`](Self::geo_to_capture_pixel)
/// which applies only the crop-and-scale step on top of the viewport mapping.
#[derive(Clone, Debug)]
pub struct Translator {
    viewport: ViewportInfo,
    geom: CaptureGeometry,
    scaler: CaptureScaler,
    pixels_per_meter: f64,
}

impl Translator {
    pub fn new(viewport: ViewportInfo, canvas: CanvasState, geom: CaptureGeometry) -> Self {
        let scaler = CaptureScaler::new(&viewport, &canvas, &geom);
        let pixels_per_meter = projection::pixels_per_meter(viewport.map_zoom);

        debug!(
            "translator: reported {}x{}, captured {}x{}, crop {}, scale ({:.4}, {:.4}), degraded {}",
            viewport.reported_width,
            viewport.reported_height,
            geom.captured_width,
            geom.captured_height,
            geom.vertical_crop_offset,
            scaler.scale_x(),
            scaler.scale_y(),
            scaler.degraded(),
        );

        Self {
            viewport,
            geom,
            scaler,
            pixels_per_meter,
        }
    }

    pub fn viewport(&self) -> &ViewportInfo {
        &self.viewport
    }

    pub fn capture_geometry(&self) -> &CaptureGeometry {
        &self.geom
    }

    pub fn scale_x(&self) -> f64 {
        self.scaler.scale_x()
    }

    pub fn scale_y(&self) -> f64 {
        self.scaler.scale_y()
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// True when degenerate reported dimensions forced identity scaling.
    pub fn degraded(&self) -> bool {
        self.scaler.degraded()
    }

    /// Drawing-canvas units to capture pixels, rounded only at this final step.
    pub fn canvas_to_capture_pixel(&self, cx: f64, cy: f64) -> (i32, i32) {
        let p = self.scaler.canvas_to_capture(cx, cy);
        (p.x.round() as i32, p.y.round() as i32)
    }

    /// Capture pixels back to drawing-canvas units.
    pub fn capture_pixel_to_canvas(&self, px: f64, py: f64) -> (f64, f64) {
        let p = self.scaler.capture_to_canvas(px, py);
        (p.x, p.y)
    }

    /// Geographic point to capture pixels. Skips the canvas zoom/pan stage.
    pub fn geo_to_capture_pixel(&self, point: GeoPoint) -> (i32, i32) {
        let reported = viewport::geo_to_reported_pixel(point, &self.viewport);
        let p = self.scaler.reported_to_capture(reported.x, reported.y);
        (p.x.round() as i32, p.y.round() as i32)
    }

    /// Capture pixels back to a geographic point.
    pub fn capture_pixel_to_geo(&self, px: f64, py: f64) -> GeoPoint {
        let l = self.scaler.capture_to_reported(px, py);
        viewport::reported_pixel_to_geo(l.x, l.y, &self.viewport)
    }

    /// Canvas-space rectangle visible in the capture: the four capture
    /// corners inverse-mapped, enclosed.
    pub fn visible_canvas_bounds(&self) -> CanvasBounds {
        let w = f64::from(self.geom.captured_width);
        let h = f64::from(self.geom.captured_height);
        let corners = [
            self.capture_pixel_to_canvas(0.0, 0.0),
            self.capture_pixel_to_canvas(w, 0.0),
            self.capture_pixel_to_canvas(0.0, h),
            self.capture_pixel_to_canvas(w, h),
        ];
        enclose(&corners)
    }

    /// Geographic extent visible in the capture, via the geo inverse path.
    pub fn visible_geo_bounds(&self) -> GeoBounds {
        let w = f64::from(self.geom.captured_width);
        let h = f64::from(self.geom.captured_height);
        let corners = [
            self.capture_pixel_to_geo(0.0, 0.0),
            self.capture_pixel_to_geo(w, 0.0),
            self.capture_pixel_to_geo(0.0, h),
            self.capture_pixel_to_geo(w, h),
        ];

        let mut bounds = GeoBounds {
            north: corners[0].lat,
            south: corners[0].lat,
            east: corners[0].lng,
            west: corners[0].lng,
        };
        for c in &corners[1..] {
            bounds.north = bounds.north.max(c.lat);
            bounds.south = bounds.south.min(c.lat);
            bounds.east = bounds.east.max(c.lng);
            bounds.west = bounds.west.min(c.lng);
        }
        bounds
    }

    /// Capture pixel of the declared map center.
    pub fn map_center_capture_pixel(&self) -> (i32, i32) {
        self.geo_to_capture_pixel(self.viewport.map_center)
    }

    /// Capture pixels of the map-bounds corners, when the client supplied
    /// bounds. `None` otherwise; never an error.
    pub fn map_bounds_capture_rect(&self) -> Option<BoundsCorners> {
        let b = self.viewport.map_bounds?;
        Some(BoundsCorners {
            nw: self.geo_to_capture_pixel(GeoPoint::new(b.north, b.west)),
            ne: self.geo_to_capture_pixel(GeoPoint::new(b.north, b.east)),
            sw: self.geo_to_capture_pixel(GeoPoint::new(b.south, b.west)),
            se: self.geo_to_capture_pixel(GeoPoint::new(b.south, b.east)),
        })
    }
}

fn enclose(points: &[(f64, f64)]) -> CanvasBounds {
    let mut bounds = CanvasBounds {
        min_x: points[0].0,
        min_y: points[0].1,
        max_x: points[0].0,
        max_y: points[0].1,
    };
    for &(x, y) in &points[1..] {
        bounds.min_x = bounds.min_x.min(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_x = bounds.max_x.max(x);
        bounds.max_y = bounds.max_y.max(y);
    }
    bounds
}
