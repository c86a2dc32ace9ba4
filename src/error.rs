//! Error types
//!
//! The simulation core has exactly one failure mode (a bad speed range at
//! construction). Everything else here belongs to the collaborators around
//! it: settings loading, GPU setup, logo decoding and the native host.

use std::fmt;

/// Invalid configuration, rejected before the simulation starts
#[derive(Debug)]
pub enum ConfigError {
    /// A speed was zero, negative, or not finite
    InvalidSpeed { name: &'static str, value: f32 },
    /// `min_speed >= max_speed`; rejection sampling would never terminate
    InvertedSpeedRange { min: f32, max: f32 },
    /// Half-extent is non-positive, not finite, or does not fit the bounds
    InvalidHalfExtent { x: f32, y: f32 },
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeed { name, value } => {
                write!(f, "{} must be a positive finite number, got {}", name, value)
            }
            ConfigError::InvertedSpeedRange { min, max } => write!(
                f,
                "min_speed ({}) must be strictly less than max_speed ({})",
                min, max
            ),
            ConfigError::InvalidHalfExtent { x, y } => write!(
                f,
                "half_extent ({}, {}) must be positive and fit inside the bounds",
                x, y
            ),
            ConfigError::Io(e) => write!(f, "Failed to read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Renderer setup failures; all of them are fatal
#[derive(Debug)]
pub enum GpuError {
    /// The window or canvas could not back a wgpu surface
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface
    NoAdapter,
    /// The adapter refused the WebGL2-level limits the quad needs
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => {
                write!(f, "Cannot draw the logo into this window: {}", e)
            }
            GpuError::NoAdapter => write!(f, "No GPU adapter can present the logo quad"),
            GpuError::DeviceCreation(e) => {
                write!(f, "GPU device does not support the logo quad renderer: {}", e)
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Why the logo could not be used; the quad then shows its vertex colors
#[derive(Debug)]
pub enum TextureError {
    /// Bytes are not a PNG or JPEG the decoder understands
    ImageLoad(image::ImageError),
    /// Logo file could not be read
    Io(std::io::Error),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "Logo is not a decodable image: {}", e),
            TextureError::Io(e) => write!(f, "Logo file is unreadable: {}", e),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Errors that end the native windowed run
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum AppError {
    /// Bad command line
    Usage(String),
    /// Invalid settings
    Config(ConfigError),
    /// GPU initialization failed
    Gpu(GpuError),
    /// Failed to create or run the event loop
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window
    Window(winit::error::OsError),
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Usage(msg) => write!(f, "{}", msg),
            AppError::Config(e) => write!(f, "Invalid configuration: {}", e),
            AppError::Gpu(e) => write!(f, "GPU error: {}", e),
            AppError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            AppError::Window(e) => write!(f, "Failed to create window: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Usage(_) => None,
            AppError::Config(e) => Some(e),
            AppError::Gpu(e) => Some(e),
            AppError::EventLoop(e) => Some(e),
            AppError::Window(e) => Some(e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<GpuError> for AppError {
    fn from(e: GpuError) -> Self {
        AppError::Gpu(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::EventLoopError> for AppError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::OsError> for AppError {
    fn from(e: winit::error::OsError) -> Self {
        AppError::Window(e)
    }
}
