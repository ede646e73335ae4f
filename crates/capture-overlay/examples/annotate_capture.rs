use std::{env, fs, path::PathBuf, time::Instant};

use capture_overlay::{annotate_png_bytes, AnnotateRequest, RenderConfig};
use serde::Deserialize;

#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use capture_overlay::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use capture_overlay::core::init_with_level;

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    image_path: String,
    request_path: String,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    context_path: Option<String>,
    #[serde(default)]
    render: Option<RenderConfig>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    {
        let log_level = LevelFilter::from_str("info").unwrap_or(LevelFilter::Info);
        init_with_level(log_level)?;
    }
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let config_path = parse_config_path();
    let cfg: ExampleConfig = serde_json::from_str(&fs::read_to_string(&config_path)?)?;
    let request: AnnotateRequest = serde_json::from_str(&fs::read_to_string(&cfg.request_path)?)?;
    let render_cfg = cfg.render.unwrap_or_default();

    let bytes = fs::read(&cfg.image_path)?;
    let t0 = Instant::now();
    let out = annotate_png_bytes(&bytes, &request, &render_cfg)?;
    info!(
        "annotated {} in {} ms, status {:?}",
        cfg.image_path,
        t0.elapsed().as_millis(),
        out.status
    );

    let output_path = cfg
        .output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("annotated.png"));
    fs::write(&output_path, &out.png)?;
    println!("wrote annotated capture to {}", output_path.display());

    let context_path = cfg
        .context_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("coordinate_context.json"));
    fs::write(&context_path, serde_json::to_string_pretty(&out.context)?)?;
    println!("wrote coordinate context to {}", context_path.display());

    Ok(())
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("annotate_capture.json"))
}
