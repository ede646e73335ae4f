//! High-level facade for the `capture-overlay-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the coordinate core and the overlay renderer
//! - end-to-end helpers that decode a captured image, build the per-request
//!   [`Translator`] from the client-reported state and the literal capture
//!   size, draw the calibration overlay and re-encode the result.
//!
//! ## Quickstart
//!
//! ```no_run
//! use capture_overlay::{annotate_png_bytes, AnnotateRequest, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("capture.png")?;
//! let request: AnnotateRequest = serde_json::from_str(&std::fs::read_to_string("request.json")?)?;
//!
//! let out = annotate_png_bytes(&bytes, &request, &RenderConfig::default())?;
//! std::fs::write("annotated.png", &out.png)?;
//! println!("status: {:?}", out.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `capture_overlay::core`: coordinate spaces, projection and the `Translator`.
//! - `capture_overlay::render`: raster overlay pass, config and context record.
//! - crate root: request wire type and decode/annotate/encode helpers.

pub use capture_overlay_core as core;
pub use capture_overlay_render as render;

pub use capture_overlay_core::{
    CanvasState, CaptureGeometry, GeoBounds, GeoPoint, OverlaySpec, ShapeGeometry, ShapeKind,
    Translator, ViewportInfo,
};
pub use capture_overlay_render::{
    Annotated, CoordinateContext, RenderConfig, RenderStatus, Renderer,
};

mod annotate;

pub use annotate::{
    annotate_image, annotate_png_bytes, translator_for_capture, AnnotateError, AnnotateRequest,
    AnnotatedBytes,
};
