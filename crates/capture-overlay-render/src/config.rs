//! Renderer styling and behavior configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Visual style and verbosity of the overlay pass.
///
/// An explicit value constructed by the composing service, not an env-var
/// global: behavior stays reproducible in tests. Colors are RGBA.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub grid_color: [u8; 4],
    pub center_color: [u8; 4],
    pub bounds_color: [u8; 4],
    pub rectangle_color: [u8; 4],
    pub circle_color: [u8; 4],
    pub text_color: [u8; 4],
    pub label_color: [u8; 4],
    pub label_background: [u8; 4],
    /// Arm length of the map-center crosshair, in capture pixels.
    pub crosshair_size: u32,
    pub draw_labels: bool,
    /// Emit per-element `debug!` lines while drawing.
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid_color: [0, 255, 0, 80],
            center_color: [255, 0, 0, 255],
            bounds_color: [0, 0, 255, 150],
            rectangle_color: [128, 0, 128, 255],
            circle_color: [255, 165, 0, 255],
            text_color: [255, 255, 0, 255],
            label_color: [255, 255, 255, 255],
            label_background: [0, 0, 0, 180],
            crosshair_size: 20,
            draw_labels: true,
            debug: false,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: RenderConfig =
            serde_json::from_str(r#"{"crosshairSize": 12, "debug": true}"#).expect("config json");
        assert_eq!(cfg.crosshair_size, 12);
        assert!(cfg.debug);
        assert_eq!(cfg.grid_color, RenderConfig::default().grid_color);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = RenderConfig {
            debug: true,
            ..RenderConfig::default()
        };
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: RenderConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cfg);
    }
}
