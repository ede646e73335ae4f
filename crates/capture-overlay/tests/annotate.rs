use std::io::Cursor;

use capture_overlay::{
    annotate_png_bytes, translator_for_capture, AnnotateRequest, RenderConfig, RenderStatus,
};
use image::{ImageFormat, ImageReader, Rgba, RgbaImage};

fn request_json() -> &'static str {
    // The client wire shape: camelCase keys, shapes tagged by type.
    r#"{
        "viewportInfo": {
            "width": 1277,
            "height": 1322,
            "mapCenter": {"lat": 42.3601, "lng": -71.0589},
            "mapZoom": 15.0,
            "mapBounds": {"north": 42.368, "south": 42.352, "east": -71.048, "west": -71.07}
        },
        "canvasState": {"zoom": 1.0, "pan": {"x": 0.0, "y": 0.0}},
        "verticalCropOffset": 62,
        "overlay": {
            "gridSpacing": 100,
            "shapes": [
                {"id": "s1", "x": 200, "y": 300, "type": "rectangle", "width": 150, "height": 100},
                {"id": "s2", "x": 700, "y": 800, "type": "circle", "radius": 60},
                {"id": "s3", "x": 400, "y": 1000, "type": "text", "width": 220, "height": 50, "text": "station"}
            ]
        }
    }"#
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([32, 48, 32, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode fixture png");
    bytes
}

#[test]
fn annotates_a_capture_end_to_end() {
    let request: AnnotateRequest = serde_json::from_str(request_json()).expect("request json");
    let bytes = png_bytes(1097, 1080);

    let out = annotate_png_bytes(&bytes, &request, &RenderConfig::default()).expect("annotate");

    assert_eq!(out.status, RenderStatus::Rendered);

    let annotated = ImageReader::new(Cursor::new(&out.png[..]))
        .with_guessed_format()
        .expect("guess format")
        .decode()
        .expect("decode annotated png");
    assert_eq!(annotated.width(), 1097);
    assert_eq!(annotated.height(), 1080);

    // The overlay changed pixels somewhere.
    let original = ImageReader::new(Cursor::new(&bytes[..]))
        .with_guessed_format()
        .expect("guess format")
        .decode()
        .expect("decode fixture");
    assert_ne!(annotated.to_rgba8(), original.to_rgba8());
}

#[test]
fn request_derives_the_diagnosed_scale_factors() {
    let request: AnnotateRequest = serde_json::from_str(request_json()).expect("request json");
    let translator = translator_for_capture(&request, 1097, 1080);

    assert!((translator.scale_x() - 1097.0 / 1277.0).abs() < 1e-9);
    assert!((translator.scale_y() - 1080.0 / 1260.0).abs() < 1e-9);
    assert!(!translator.degraded());
}

#[test]
fn context_record_serializes_for_prompt_assembly() {
    let request: AnnotateRequest = serde_json::from_str(request_json()).expect("request json");
    let bytes = png_bytes(1097, 1080);

    let out = annotate_png_bytes(&bytes, &request, &RenderConfig::default()).expect("annotate");
    let json = serde_json::to_value(&out.context).expect("context json");

    assert_eq!(json["origin"], "top-left");
    assert_eq!(json["gridSpacing"], 100.0);
    assert!(json["mapCenterPixel"].is_array());
    assert!(json["visibleCanvasBounds"]["maxX"].as_f64().unwrap() > 0.0);
    assert!(json["visibleGeoBounds"]["north"].as_f64().unwrap() > 42.0);
    assert_eq!(json["degraded"], false);
}

#[test]
fn degenerate_viewport_returns_the_original_image_skipped() {
    let raw = r#"{
        "viewportInfo": {
            "width": 0,
            "height": 0,
            "mapCenter": {"lat": 42.3601, "lng": -71.0589},
            "mapZoom": 15.0
        },
        "canvasState": {"zoom": 1.0}
    }"#;
    let request: AnnotateRequest = serde_json::from_str(raw).expect("request json");
    let bytes = png_bytes(64, 64);

    let out = annotate_png_bytes(&bytes, &request, &RenderConfig::default()).expect("annotate");

    assert_eq!(out.status, RenderStatus::Skipped);
    let annotated = ImageReader::new(Cursor::new(&out.png[..]))
        .with_guessed_format()
        .expect("guess format")
        .decode()
        .expect("decode annotated png")
        .to_rgba8();
    let original = RgbaImage::from_pixel(64, 64, Rgba([32, 48, 32, 255]));
    assert_eq!(annotated, original);
}
