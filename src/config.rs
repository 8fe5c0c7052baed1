use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::cursor::DEFAULT_ALPHA;
use crate::debounce::DEFAULT_STABLE_THRESHOLD;
use crate::types::Surface;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tracking: TrackingConfig,
    pub capture: CaptureConfig,
    pub surface: SurfaceConfig,
    pub ui: UiConfig,
}

/// Tunables. The defaults are empirical, not optimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub stable_threshold: u32,
    pub smoothing_alpha: f32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub mirror: bool,
}

/// Overrides for the control surface; unset means the main display size.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_preview: bool,
    pub landmark_color_hex: String,
    pub connection_color_hex: String,
    pub dot_size: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            stable_threshold: DEFAULT_STABLE_THRESHOLD,
            smoothing_alpha: DEFAULT_ALPHA,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.5,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { mirror: true }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_preview: true,
            landmark_color_hex: "#FF00FF".to_string(),
            connection_color_hex: "#14B45A".to_string(),
            dot_size: 4,
        }
    }
}

impl SurfaceConfig {
    /// Both dimensions must be set for an override.
    pub fn resolve(&self) -> Option<Surface> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Surface::new(w, h)),
            _ => None,
        }
    }
}

impl AppConfig {
    pub const PATH: &'static str = "config.json";

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unparsable. A parsed or newly created config is written back so new
    /// fields show up; an unparsable file is left untouched.
    pub fn load(path: &Path) -> Result<Self> {
        let mut write_back = true;
        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            // Missing fields use Default due to #[serde(default)]
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    info!("Loaded configuration from {}", path.display());
                    c
                },
                Err(e) => {
                    warn!("Error parsing config: {}. Loading defaults without overwriting it.", e);
                    write_back = false;
                    Self::default()
                }
            }
        } else {
            info!("Configuration file not found. Creating default at {}", path.display());
            Self::default()
        };

        config.validate()?;
        if write_back {
            config.save(path)?;
        }

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.tracking;
        if t.stable_threshold == 0 {
            bail!("tracking.stable_threshold must be at least 1");
        }
        if !(t.smoothing_alpha > 0.0 && t.smoothing_alpha < 1.0) {
            bail!("tracking.smoothing_alpha must be between 0 and 1 (exclusive), got {}", t.smoothing_alpha);
        }
        for (name, v) in [
            ("min_detection_confidence", t.min_detection_confidence),
            ("min_tracking_confidence", t.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                bail!("tracking.{} must be within [0, 1], got {}", name, v);
            }
        }
        if matches!(self.surface.width, Some(0)) || matches!(self.surface.height, Some(0)) {
            bail!("surface dimensions must be non-zero");
        }
        Ok(())
    }
}
