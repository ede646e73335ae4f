//! Calibration overlay renderer for map-capture rasters.
//!
//! Consumes a decoded RGBA buffer, a [`capture_overlay_core::Translator`] and
//! an overlay spec; produces a new buffer with a canvas-unit grid, a
//! map-center marker, the map-bounds rectangle and per-kind shape outlines,
//! plus a structured [`CoordinateContext`] record for downstream prompt
//! assembly. The input buffer is never mutated.
//!
//! Annotation is best-effort: a degraded translator or an unusable buffer
//! yields the original image with [`RenderStatus::Skipped`], never an error.

mod config;
mod context;
mod draw;
mod glyph;
mod overlay;

pub use config::{ConfigIoError, RenderConfig};
pub use context::CoordinateContext;
pub use draw::Color;
pub use overlay::{Annotated, RenderStatus, Renderer};
