//! Coordinate spaces and translations for map-capture annotation.
//!
//! Three coordinate systems share one captured raster:
//! - geographic latitude/longitude of the map layer,
//! - the client's logical drawing-canvas space (its own zoom/pan transform),
//! - the literal pixel grid of the capture, which may be smaller than the
//!   reported viewport and vertically cropped at the top.
//!
//! This crate is purely geometric. It does *not* decode images or draw; it
//! only builds a per-request [`Translator`] that converts between the three
//! spaces without conflating the map layer with the drawing layer.

mod canvas;
mod logger;
mod projection;
mod translator;
mod types;
mod viewport;

pub use canvas::CaptureScaler;
pub use projection::{geo_to_meters, meters_to_geo, pixels_per_meter, EARTH_RADIUS_M, TILE_SIZE_PX};
pub use translator::{BoundsCorners, CanvasBounds, Translator};
pub use types::{
    CanvasState, CaptureGeometry, GeoBounds, GeoPoint, OverlaySpec, PanOffset, ShapeGeometry,
    ShapeKind, ViewportInfo,
};
pub use viewport::{geo_to_reported_pixel, reported_pixel_to_geo};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
