//! The overlay pass: grid, map-center marker, map-bounds rectangle, shape
//! outlines and the visible-bounds caption.
//!
//! Geo-anchored elements (center marker, bounds rectangle) are placed through
//! the translator's geo path; drawing-layer shapes and the grid go through
//! the canvas path. The two are composed only here, at the rendering
//! boundary, and never share transform state.

use capture_overlay_core::{OverlaySpec, ShapeGeometry, ShapeKind, Translator};
use image::{Rgba, RgbaImage};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::context::CoordinateContext;
use crate::draw::{
    fill_disc, fill_rect, hline, stroke_ellipse, stroke_rect, vline, Color,
};
use crate::glyph::draw_label_boxed;

/// Interior alpha for shape outlines, matching the semi-transparent fills the
/// drawing client renders.
const SHAPE_FILL_ALPHA: u8 = 100;

/// Outcome of an annotation attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Rendered,
    Skipped,
}

/// Annotated raster plus the coordinate-context record.
#[derive(Clone, Debug)]
pub struct Annotated {
    pub image: RgbaImage,
    pub context: CoordinateContext,
    pub status: RenderStatus,
}

/// Draws calibration overlays onto a captured raster.
///
/// Annotation is a best-effort enhancement: any condition that would make the
/// overlay wrong or impossible returns the input unchanged with
/// [`RenderStatus::Skipped`] instead of failing the enclosing request.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw the overlay onto a copy of `image`. The input is never mutated.
    pub fn annotate(
        &self,
        image: &RgbaImage,
        translator: &Translator,
        spec: &OverlaySpec,
    ) -> Annotated {
        let context = CoordinateContext::from_translator(translator, spec);

        if translator.degraded() {
            warn!("overlay skipped: translator degraded (degenerate reported dimensions)");
            return Annotated {
                image: image.clone(),
                context,
                status: RenderStatus::Skipped,
            };
        }
        if image.width() == 0 || image.height() == 0 {
            warn!("overlay skipped: empty capture buffer");
            return Annotated {
                image: image.clone(),
                context,
                status: RenderStatus::Skipped,
            };
        }
        if spec.grid_spacing <= 0.0 {
            warn!("overlay skipped: non-positive grid spacing {}", spec.grid_spacing);
            return Annotated {
                image: image.clone(),
                context,
                status: RenderStatus::Skipped,
            };
        }

        let mut out = image.clone();
        self.draw_grid(&mut out, translator, spec.grid_spacing);
        self.draw_center_marker(&mut out, translator);
        self.draw_map_bounds(&mut out, translator);
        for shape in &spec.shapes {
            self.draw_shape(&mut out, translator, shape);
        }
        self.draw_caption(&mut out, &context);

        Annotated {
            image: out,
            context,
            status: RenderStatus::Rendered,
        }
    }

    fn draw_grid(&self, img: &mut RgbaImage, translator: &Translator, spacing: f64) {
        let color = rgba(self.config.grid_color);
        let (w, h) = (i64::from(img.width()), i64::from(img.height()));

        for (canvas_x, px) in grid_columns(translator, spacing, img.width()) {
            vline(img, px, 0, h - 1, 1, color);
            if self.config.draw_labels {
                let label = format!("x:{}", fmt_coord(canvas_x));
                draw_label_boxed(
                    img,
                    px + 2,
                    2,
                    &label,
                    rgba(self.config.label_color),
                    rgba(self.config.label_background),
                );
            }
            if self.config.debug {
                debug!("grid column {} at capture x {}", fmt_coord(canvas_x), px);
            }
        }

        for (canvas_y, py) in grid_rows(translator, spacing, img.height()) {
            hline(img, 0, w - 1, py, 1, color);
            if self.config.draw_labels {
                let label = format!("y:{}", fmt_coord(canvas_y));
                draw_label_boxed(
                    img,
                    2,
                    py + 2,
                    &label,
                    rgba(self.config.label_color),
                    rgba(self.config.label_background),
                );
            }
            if self.config.debug {
                debug!("grid row {} at capture y {}", fmt_coord(canvas_y), py);
            }
        }
    }

    fn draw_center_marker(&self, img: &mut RgbaImage, translator: &Translator) {
        let color = rgba(self.config.center_color);
        let (cx, cy) = translator.map_center_capture_pixel();
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let arm = i64::from(self.config.crosshair_size);

        hline(img, cx - arm, cx + arm, cy, 2, color);
        vline(img, cx, cy - arm, cy + arm, 2, color);
        stroke_ellipse(img, cx - 5, cy - 5, cx + 5, cy + 5, color);

        if self.config.draw_labels {
            let (ccx, ccy) = translator.capture_pixel_to_canvas(cx as f64, cy as f64);
            let label = format!("center: ({}, {})", fmt_coord(ccx), fmt_coord(ccy));
            draw_label_boxed(
                img,
                cx + arm + 5,
                cy - 10,
                &label,
                rgba(self.config.label_color),
                color,
            );
        }
        if self.config.debug {
            debug!("map center at capture ({cx}, {cy})");
        }
    }

    fn draw_map_bounds(&self, img: &mut RgbaImage, translator: &Translator) {
        let Some(rect) = translator.map_bounds_capture_rect() else {
            debug!("no map bounds supplied, skipping bounds rectangle");
            return;
        };
        let color = rgba(self.config.bounds_color);

        // Web Mercator maps a geographic rectangle to an axis-aligned pixel
        // rectangle, so connecting NW and SE is exact.
        let (x0, y0) = (i64::from(rect.nw.0), i64::from(rect.nw.1));
        let (x1, y1) = (i64::from(rect.se.0), i64::from(rect.se.1));
        stroke_rect(img, x0, y0, x1, y1, 2, color);

        if self.config.draw_labels {
            let nw_canvas = translator.capture_pixel_to_canvas(x0 as f64, y0 as f64);
            let se_canvas = translator.capture_pixel_to_canvas(x1 as f64, y1 as f64);
            draw_label_boxed(
                img,
                x0 + 5,
                y0 + 5,
                &format!("({}, {})", fmt_coord(nw_canvas.0), fmt_coord(nw_canvas.1)),
                rgba(self.config.label_color),
                color,
            );
            draw_label_boxed(
                img,
                x1 - 80,
                y1 - 20,
                &format!("({}, {})", fmt_coord(se_canvas.0), fmt_coord(se_canvas.1)),
                rgba(self.config.label_color),
                color,
            );
        }
    }

    fn draw_shape(&self, img: &mut RgbaImage, translator: &Translator, shape: &ShapeGeometry) {
        let (ax, ay) = translator.canvas_to_capture_pixel(shape.x, shape.y);
        let (ax, ay) = (i64::from(ax), i64::from(ay));
        if self.config.debug {
            debug!("shape {} anchored at capture ({ax}, {ay})", shape.id);
        }

        match &shape.kind {
            ShapeKind::Rectangle { width, height } => {
                let color = self.config.rectangle_color;
                let (bx, by) =
                    translator.canvas_to_capture_pixel(shape.x + width, shape.y + height);
                let (bx, by) = (i64::from(bx), i64::from(by));
                fill_rect(img, ax, ay, bx, by, fill_color(color));
                stroke_rect(img, ax, ay, bx, by, 3, rgba(color));
                fill_disc(img, ax, ay, 3, rgba(color));
            }
            ShapeKind::Circle { radius } => {
                // Translate the bounding box corner-wise so the outline stays
                // correct under anisotropic capture scales.
                let color = self.config.circle_color;
                let (x0, y0) =
                    translator.canvas_to_capture_pixel(shape.x - radius, shape.y - radius);
                let (x1, y1) =
                    translator.canvas_to_capture_pixel(shape.x + radius, shape.y + radius);
                stroke_ellipse(
                    img,
                    i64::from(x0),
                    i64::from(y0),
                    i64::from(x1),
                    i64::from(y1),
                    rgba(color),
                );
                fill_disc(img, ax, ay, 3, rgba(color));
            }
            ShapeKind::Text {
                width,
                height,
                text,
            } => {
                let color = self.config.text_color;
                let (bx, by) =
                    translator.canvas_to_capture_pixel(shape.x + width, shape.y + height);
                let (bx, by) = (i64::from(bx), i64::from(by));
                fill_rect(img, ax, ay, bx, by, fill_color(color));
                stroke_rect(img, ax, ay, bx, by, 2, rgba(color));
                if !text.is_empty() {
                    draw_label_boxed(
                        img,
                        ax + 5,
                        ay + 5,
                        text,
                        Rgba([0, 0, 0, 255]),
                        fill_color(color),
                    );
                }
                fill_disc(img, ax, ay, 3, rgba(color));
            }
        }
    }

    fn draw_caption(&self, img: &mut RgbaImage, context: &CoordinateContext) {
        if !self.config.draw_labels {
            return;
        }
        let b = &context.visible_canvas_bounds;
        let caption = format!(
            "canvas visible: ({}, {}) to ({}, {})",
            fmt_coord(b.min_x),
            fmt_coord(b.min_y),
            fmt_coord(b.max_x),
            fmt_coord(b.max_y),
        );
        draw_label_boxed(
            img,
            10,
            i64::from(img.height()) - 20,
            &caption,
            rgba(self.config.label_color),
            rgba(self.config.label_background),
        );
    }
}

/// Vertical grid lines: `(canvas x, capture x)` for every spacing multiple
/// whose capture column lies inside the buffer.
pub(crate) fn grid_columns(
    translator: &Translator,
    spacing: f64,
    width: u32,
) -> Vec<(f64, i64)> {
    let bounds = translator.visible_canvas_bounds();
    let first = (bounds.min_x / spacing).floor() as i64;
    let last = (bounds.max_x / spacing).ceil() as i64;

    (first..=last)
        .filter_map(|i| {
            let canvas_x = i as f64 * spacing;
            let (px, _) = translator.canvas_to_capture_pixel(canvas_x, 0.0);
            (px >= 0 && px <= width as i32).then_some((canvas_x, i64::from(px)))
        })
        .collect()
}

/// Horizontal grid lines: `(canvas y, capture y)`.
pub(crate) fn grid_rows(translator: &Translator, spacing: f64, height: u32) -> Vec<(f64, i64)> {
    let bounds = translator.visible_canvas_bounds();
    let first = (bounds.min_y / spacing).floor() as i64;
    let last = (bounds.max_y / spacing).ceil() as i64;

    (first..=last)
        .filter_map(|i| {
            let canvas_y = i as f64 * spacing;
            let (_, py) = translator.canvas_to_capture_pixel(0.0, canvas_y);
            (py >= 0 && py <= height as i32).then_some((canvas_y, i64::from(py)))
        })
        .collect()
}

fn rgba(c: [u8; 4]) -> Color {
    Rgba(c)
}

fn fill_color(c: [u8; 4]) -> Color {
    Rgba([c[0], c[1], c[2], SHAPE_FILL_ALPHA])
}

/// Grid coordinates are integers in practice; print them without a mantissa.
fn fmt_coord(v: f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_overlay_core::{
        CanvasState, CaptureGeometry, GeoBounds, GeoPoint, PanOffset, ViewportInfo,
    };

    fn fixture(map_bounds: Option<GeoBounds>) -> Translator {
        let viewport = ViewportInfo {
            reported_width: 1277.0,
            reported_height: 1322.0,
            map_center: GeoPoint::new(42.3601, -71.0589),
            map_zoom: 15.0,
            map_bounds,
        };
        Translator::new(
            viewport,
            CanvasState::default(),
            CaptureGeometry {
                captured_width: 1097,
                captured_height: 1080,
                vertical_crop_offset: 62.0,
            },
        )
    }

    fn degraded_fixture() -> Translator {
        let viewport = ViewportInfo {
            reported_width: 0.0,
            reported_height: 0.0,
            map_center: GeoPoint::new(42.3601, -71.0589),
            map_zoom: 15.0,
            map_bounds: None,
        };
        Translator::new(
            viewport,
            CanvasState::default(),
            CaptureGeometry::uncropped(64, 64),
        )
    }

    fn capture(t: &Translator) -> RgbaImage {
        RgbaImage::from_pixel(
            t.capture_geometry().captured_width,
            t.capture_geometry().captured_height,
            Rgba([10, 10, 10, 255]),
        )
    }

    #[test]
    fn renders_and_leaves_input_untouched() {
        let t = fixture(None);
        let img = capture(&t);
        let before = img.clone();

        let out = Renderer::default().annotate(&img, &t, &OverlaySpec::default());

        assert_eq!(out.status, RenderStatus::Rendered);
        assert_eq!(img, before);
        assert_ne!(out.image, img);
    }

    #[test]
    fn degraded_translator_skips_and_returns_original() {
        let t = degraded_fixture();
        let img = capture(&t);

        let out = Renderer::default().annotate(&img, &t, &OverlaySpec::default());

        assert_eq!(out.status, RenderStatus::Skipped);
        assert_eq!(out.image, img);
        assert!(out.context.degraded);
        assert!(out.context.visible_geo_bounds.is_none());
    }

    #[test]
    fn grid_line_positions_match_the_translator() {
        let t = fixture(None);
        let columns = grid_columns(&t, 100.0, t.capture_geometry().captured_width);

        let (_, px_500) = columns
            .iter()
            .find(|(cx, _)| *cx == 500.0)
            .copied()
            .expect("x:500 grid line visible");
        let (expected, _) = t.canvas_to_capture_pixel(500.0, 0.0);
        assert!((px_500 - i64::from(expected)).abs() <= 5);
    }

    #[test]
    fn grid_column_pixels_carry_the_grid_tint() {
        let t = fixture(None);
        let img = capture(&t);
        let out = Renderer::default().annotate(&img, &t, &OverlaySpec::default());

        let columns = grid_columns(&t, 100.0, t.capture_geometry().captured_width);
        let (_, px) = columns
            .iter()
            .find(|(cx, _)| *cx == 500.0)
            .copied()
            .expect("x:500 grid line visible");
        // A row away from the labels, crosshair and caption.
        let sample = out.image.get_pixel(px as u32, 200);
        assert!(sample.0[1] > 10, "expected green grid tint, got {:?}", sample);
    }

    #[test]
    fn bounds_rectangle_only_drawn_when_supplied() {
        let bounds = GeoBounds {
            north: 42.3680,
            south: 42.3520,
            east: -71.0480,
            west: -71.0700,
        };
        let with = fixture(Some(bounds));
        let without = fixture(None);
        let img = capture(&with);
        let renderer = Renderer::default();

        let a = renderer.annotate(&img, &with, &OverlaySpec::default());
        let b = renderer.annotate(&img, &without, &OverlaySpec::default());

        assert_eq!(a.status, RenderStatus::Rendered);
        assert_eq!(b.status, RenderStatus::Rendered);
        assert_ne!(a.image, b.image);
    }

    #[test]
    fn shapes_move_with_canvas_pan_but_center_marker_does_not() {
        let still = fixture(None);
        let viewport = still.viewport().clone();
        let panned = Translator::new(
            viewport,
            CanvasState {
                zoom: 1.0,
                pan: PanOffset { x: 200.0, y: 0.0 },
            },
            *still.capture_geometry(),
        );

        assert_eq!(
            still.map_center_capture_pixel(),
            panned.map_center_capture_pixel()
        );

        let shape = ShapeGeometry {
            id: "s1".into(),
            x: 400.0,
            y: 600.0,
            kind: ShapeKind::Rectangle {
                width: 80.0,
                height: 60.0,
            },
        };
        assert_ne!(
            still.canvas_to_capture_pixel(shape.x, shape.y),
            panned.canvas_to_capture_pixel(shape.x, shape.y)
        );
    }

    #[test]
    fn shape_outlines_render_for_every_kind() {
        let t = fixture(None);
        let img = capture(&t);
        let spec = OverlaySpec {
            grid_spacing: 100.0,
            shapes: vec![
                ShapeGeometry {
                    id: "r".into(),
                    x: 100.0,
                    y: 200.0,
                    kind: ShapeKind::Rectangle {
                        width: 120.0,
                        height: 90.0,
                    },
                },
                ShapeGeometry {
                    id: "c".into(),
                    x: 600.0,
                    y: 700.0,
                    kind: ShapeKind::Circle { radius: 40.0 },
                },
                ShapeGeometry {
                    id: "t".into(),
                    x: 300.0,
                    y: 900.0,
                    kind: ShapeKind::Text {
                        width: 200.0,
                        height: 50.0,
                        text: "depot".into(),
                    },
                },
            ],
        };

        let plain = Renderer::default().annotate(&img, &t, &OverlaySpec::default());
        let with_shapes = Renderer::default().annotate(&img, &t, &spec);
        assert_ne!(plain.image, with_shapes.image);
    }

    #[test]
    fn empty_buffer_skips() {
        let t = fixture(None);
        let empty = RgbaImage::new(0, 0);
        let out = Renderer::default().annotate(&empty, &t, &OverlaySpec::default());
        assert_eq!(out.status, RenderStatus::Skipped);
    }
}
