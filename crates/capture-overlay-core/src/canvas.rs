//! Drawing-canvas coordinates to/from literal capture pixels.
//!
//! The capture's pixel resolution rarely matches the logical space the client
//! reports, and the capture may exclude a strip at the top of the canvas.
//! Three independent corrections are chained here, in this order:
//!
//! 1. the canvas's own zoom/pan viewport transform (drawing layer only),
//! 2. the vertical crop offset, applied to the Y axis and never to X,
//! 3. per-axis scale factors from reported logical size to captured size.
//!
//! Each step must be exactly invertible; getting the order or an axis wrong
//! shifts every overlay by a constant, non-obvious amount. Intermediate
//! values are never rounded, only the final pixel coordinate is.

use nalgebra::Point2;

use crate::{CanvasState, CaptureGeometry, ViewportInfo};

/// Precomputed scale-and-crop mapper between logical space and the capture.
///
/// Immutable; built once per request. When the reported width or the
/// crop-adjusted height is not positive, both scales fall back to identity
/// and the scaler reports itself degraded rather than failing. An approximate
/// overlay is preferred to none.
#[derive(Clone, Copy, Debug)]
pub struct CaptureScaler {
    canvas: CanvasState,
    crop_offset: f64,
    scale_x: f64,
    scale_y: f64,
    degraded: bool,
}

impl CaptureScaler {
    pub fn new(viewport: &ViewportInfo, canvas: &CanvasState, geom: &CaptureGeometry) -> Self {
        let adjusted_height = viewport.reported_height - geom.vertical_crop_offset;
        let degraded = viewport.reported_width <= 0.0 || adjusted_height <= 0.0;

        let (scale_x, scale_y) = if degraded {
            (1.0, 1.0)
        } else {
            (
                f64::from(geom.captured_width) / viewport.reported_width,
                f64::from(geom.captured_height) / adjusted_height,
            )
        };

        Self {
            canvas: *canvas,
            crop_offset: geom.vertical_crop_offset,
            scale_x,
            scale_y,
            degraded,
        }
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }

    /// Crop-and-scale step only: reported logical pixels into capture pixels.
    ///
    /// This is the path geo-anchored elements take. The canvas zoom/pan
    /// transform is deliberately absent here; it belongs to the drawing
    /// layer's shapes alone.
    pub fn reported_to_capture(&self, lx: f64, ly: f64) -> Point2<f64> {
        Point2::new(lx * self.scale_x, (ly - self.crop_offset) * self.scale_y)
    }

    /// Inverse of [`reported_to_capture`](Self::reported_to_capture).
    pub fn capture_to_reported(&self, px: f64, py: f64) -> Point2<f64> {
        Point2::new(px / self.scale_x, py / self.scale_y + self.crop_offset)
    }

    /// Full chain: canvas units through the canvas viewport transform, the
    /// crop offset and the capture scales.
    pub fn canvas_to_capture(&self, cx: f64, cy: f64) -> Point2<f64> {
        let lx = (cx + self.canvas.pan.x) * self.canvas.zoom;
        let ly = (cy + self.canvas.pan.y) * self.canvas.zoom;
        self.reported_to_capture(lx, ly)
    }

    /// Exact inverse of [`canvas_to_capture`](Self::canvas_to_capture),
    /// performed in reverse order: unscale, re-add the crop, then invert the
    /// canvas transform.
    pub fn capture_to_canvas(&self, px: f64, py: f64) -> Point2<f64> {
        let l = self.capture_to_reported(px, py);
        Point2::new(
            l.x / self.canvas.zoom - self.canvas.pan.x,
            l.y / self.canvas.zoom - self.canvas.pan.y,
        )
    }
}
