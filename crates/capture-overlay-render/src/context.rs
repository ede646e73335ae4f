//! Structured coordinate-context record for downstream prompt assembly.

use capture_overlay_core::{CanvasBounds, GeoBounds, OverlaySpec, Translator};
use serde::{Deserialize, Serialize};

/// Facts a vision-consuming collaborator needs to reason about the annotated
/// capture. Plain data, serialized verbatim; this crate builds no prose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateContext {
    /// Origin corner of both pixel and canvas space.
    pub origin: String,
    /// Axis directions from the origin: x then y.
    pub axes: [String; 2],
    /// Canvas units between adjacent grid lines.
    pub grid_spacing: f64,
    /// Capture pixel of the declared map center.
    pub map_center_pixel: [i32; 2],
    /// Drawing-canvas coordinate of the map center.
    pub map_center_canvas: [f64; 2],
    pub visible_canvas_bounds: CanvasBounds,
    pub visible_geo_bounds: Option<GeoBounds>,
    pub scale_x: f64,
    pub scale_y: f64,
    pub degraded: bool,
}

impl CoordinateContext {
    pub fn from_translator(translator: &Translator, spec: &OverlaySpec) -> Self {
        let (cpx, cpy) = translator.map_center_capture_pixel();
        let (ccx, ccy) = translator.capture_pixel_to_canvas(f64::from(cpx), f64::from(cpy));
        let visible_geo_bounds = if translator.degraded() {
            None
        } else {
            Some(translator.visible_geo_bounds())
        };

        Self {
            origin: "top-left".to_owned(),
            axes: ["right".to_owned(), "down".to_owned()],
            grid_spacing: spec.grid_spacing,
            map_center_pixel: [cpx, cpy],
            map_center_canvas: [ccx, ccy],
            visible_canvas_bounds: translator.visible_canvas_bounds(),
            visible_geo_bounds,
            scale_x: translator.scale_x(),
            scale_y: translator.scale_y(),
            degraded: translator.degraded(),
        }
    }
}
