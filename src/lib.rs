//! DVD Bounce - a logo bouncing around the window
//!
//! Core modules:
//! - `sim`: Bounce simulation (position, reflection, velocity sampling)
//! - `renderer`: WebGPU textured quad and the `Present` seam
//! - `host`: Per-frame driver tying the two together
//! - `settings`: JSON-backed configuration

pub mod error;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GpuError, TextureError};
#[cfg(not(target_arch = "wasm32"))]
pub use error::AppError;
pub use host::BounceApp;
pub use settings::Settings;

/// Reference configuration
pub mod consts {
    use glam::Vec2;

    /// Per-axis speed band, NDC units per frame
    pub const MIN_SPEED: f32 = 0.0014;
    pub const MAX_SPEED: f32 = 0.002;

    /// Logo quad half-size; the quad spans [-0.2, 0.2] before offset
    pub const HALF_EXTENT: Vec2 = Vec2::new(0.2, 0.2);

    /// Window defaults
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;
    pub const WINDOW_TITLE: &str = "dvd_window";

    pub const LOGO_PATH: &str = "dvd.png";
}

/// Seed derived from the wall clock, for runs without a fixed seed
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Seed derived from the wall clock, for runs without a fixed seed
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}
