//! End-to-end helpers: decode a capture, annotate it, re-encode as PNG.
//!
//! Annotated images always re-encode as PNG: lossless and right for line art
//! and labels, regardless of the capture's original format.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use capture_overlay_core::{
    CanvasState, CaptureGeometry, OverlaySpec, Translator, ViewportInfo,
};
use capture_overlay_render::{Annotated, CoordinateContext, RenderConfig, RenderStatus, Renderer};

/// Errors produced by the decode/encode boundary. The overlay pass itself
/// never fails; it degrades to [`RenderStatus::Skipped`].
#[derive(thiserror::Error, Debug)]
pub enum AnnotateError {
    #[error("failed to decode capture image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode annotated image: {0}")]
    Encode(#[source] image::ImageError),
}

fn default_crop_offset() -> f64 {
    0.0
}

/// One annotation request as the client sends it: viewport metadata, canvas
/// state and the overlay spec. The capture's literal pixel dimensions come
/// from the decoded image, not from the request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateRequest {
    pub viewport_info: ViewportInfo,
    pub canvas_state: CanvasState,
    /// Logical pixels the capture pipeline habitually crops from the top of
    /// the canvas (e.g. a menu bar). Configuration, defaulting to none.
    #[serde(default = "default_crop_offset")]
    pub vertical_crop_offset: f64,
    #[serde(default)]
    pub overlay: OverlaySpec,
}

/// Annotated PNG bytes plus the coordinate-context record.
#[derive(Clone, Debug)]
pub struct AnnotatedBytes {
    pub png: Vec<u8>,
    pub context: CoordinateContext,
    pub status: RenderStatus,
}

/// Build the request-scoped translator against the capture's actual pixel
/// dimensions.
pub fn translator_for_capture(request: &AnnotateRequest, width: u32, height: u32) -> Translator {
    let geom = CaptureGeometry {
        captured_width: width,
        captured_height: height,
        vertical_crop_offset: request.vertical_crop_offset,
    };
    Translator::new(request.viewport_info.clone(), request.canvas_state, geom)
}

/// Annotate an already-decoded capture.
pub fn annotate_image(
    image: &DynamicImage,
    request: &AnnotateRequest,
    config: &RenderConfig,
) -> Annotated {
    let rgba = image.to_rgba8();
    let translator = translator_for_capture(request, rgba.width(), rgba.height());
    Renderer::new(config.clone()).annotate(&rgba, &translator, &request.overlay)
}

/// Decode raw capture bytes, annotate and re-encode as PNG.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(bytes, request, config), fields(len = bytes.len()))
)]
pub fn annotate_png_bytes(
    bytes: &[u8],
    request: &AnnotateRequest,
    config: &RenderConfig,
) -> Result<AnnotatedBytes, AnnotateError> {
    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| AnnotateError::Decode(image::ImageError::IoError(err)))?
        .decode()
        .map_err(AnnotateError::Decode)?;
    debug!(
        "decoded capture: {}x{} from {} bytes",
        decoded.width(),
        decoded.height(),
        bytes.len()
    );

    let annotated = annotate_image(&decoded, request, config);

    let mut png = Vec::new();
    annotated
        .image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(AnnotateError::Encode)?;

    Ok(AnnotatedBytes {
        png,
        context: annotated.context,
        status: annotated.status,
    })
}
