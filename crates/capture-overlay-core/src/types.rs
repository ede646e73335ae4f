use serde::{Deserialize, Serialize};

/// Geographic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geographic bounding box in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Client-reported map viewport: logical dimensions plus the declared
/// geographic center and zoom.
///
/// The reported dimensions are what the client *claims* the viewport measures
/// in logical pixels. The capture itself may have different literal pixel
/// dimensions; see [`CaptureGeometry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportInfo {
    #[serde(rename = "width")]
    pub reported_width: f64,
    #[serde(rename = "height")]
    pub reported_height: f64,
    pub map_center: GeoPoint,
    pub map_zoom: f64,
    #[serde(default)]
    pub map_bounds: Option<GeoBounds>,
}

/// Pan offset of the drawing-canvas viewport, in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

/// The drawing-canvas's own viewport transform.
///
/// Independent of the map viewport: it applies to drawing-layer shapes only,
/// never to geo-anchored elements.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    pub zoom: f64,
    #[serde(default)]
    pub pan: PanOffset,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: PanOffset::default(),
        }
    }
}

fn default_crop_offset() -> f64 {
    0.0
}

/// Literal pixel dimensions of the captured raster plus the vertical crop.
///
/// `vertical_crop_offset` is the number of logical pixels excluded from the
/// *top* of the canvas by the capture pipeline (cropped chrome such as a menu
/// bar). The correction applies to the Y axis only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureGeometry {
    pub captured_width: u32,
    pub captured_height: u32,
    #[serde(default = "default_crop_offset")]
    pub vertical_crop_offset: f64,
}

impl CaptureGeometry {
    /// Geometry for a capture of the given pixel size with no crop.
    pub fn uncropped(captured_width: u32, captured_height: u32) -> Self {
        Self {
            captured_width,
            captured_height,
            vertical_crop_offset: 0.0,
        }
    }
}

/// Kind-specific geometry of a drawing-canvas shape, in canvas units.
///
/// Rectangle and text boxes are anchored at their top-left corner; circles
/// are anchored at their center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    Text {
        width: f64,
        height: f64,
        #[serde(default)]
        text: String,
    },
}

/// One drawing-canvas shape as owned by the calling collaborator.
///
/// Coordinates are native canvas units, read verbatim; the renderer never
/// reinterprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeGeometry {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

fn default_grid_spacing() -> f64 {
    100.0
}

/// Per-render overlay request: grid density plus the shapes to outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySpec {
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    #[serde(default)]
    pub shapes: Vec<ShapeGeometry>,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self {
            grid_spacing: default_grid_spacing(),
            shapes: Vec::new(),
        }
    }
}
