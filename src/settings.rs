//! Animation settings
//!
//! Native builds read a JSON file; the web build keeps them in LocalStorage.
//! Every field is optional in the stored form and falls back to the defaults
//! below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Bounds, SpeedRange};

/// Animation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Lower bound of the per-axis speed band (NDC units per frame)
    pub min_speed: f32,
    /// Upper bound of the per-axis speed band (NDC units per frame)
    pub max_speed: f32,
    /// Half width/height of the logo quad; drives both drawing and collision
    pub half_extent: [f32; 2],
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Background color (RGBA, 0.0 - 1.0)
    pub clear_color: [f32; 4],

    // === Assets ===
    /// Logo image drawn on the quad
    pub logo_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            half_extent: HALF_EXTENT.to_array(),
            seed: None,

            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            clear_color: [1.0, 1.0, 1.0, 1.0],

            logo_path: LOGO_PATH.to_string(),
        }
    }
}

impl Settings {
    pub fn half_extent(&self) -> Vec2 {
        Vec2::from_array(self.half_extent)
    }

    /// Check the motion settings and return the validated speed band
    pub fn validate(&self) -> Result<SpeedRange, ConfigError> {
        let range = SpeedRange::new(self.min_speed, self.max_speed)?;
        if !Bounds::NDC.fits(self.half_extent()) {
            return Err(ConfigError::InvalidHalfExtent {
                x: self.half_extent[0],
                y: self.half_extent[1],
            });
        }
        Ok(range)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a JSON file, falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dvd_bounce_settings";

    /// Load settings from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load_web() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
