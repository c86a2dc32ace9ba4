//! Rendering back ends
//!
//! The simulation only ever hands a renderer one offset per frame, through
//! `Present`. `QuadRenderState` draws the logo with WebGPU; `FrameRecorder`
//! and `LastOffset` stand in for it in headless runs and tests.

pub mod quad_pipeline;
pub mod recorder;
pub mod texture;
pub mod vertex;

use glam::Vec2;

pub use quad_pipeline::QuadRenderState;
pub use recorder::{FrameRecorder, LastOffset};
pub use texture::LogoImage;
pub use vertex::QuadVertex;

/// Something that can show the logo at an offset from the frame center
pub trait Present {
    type Error;

    fn present(&mut self, offset: Vec2) -> Result<(), Self::Error>;
}
