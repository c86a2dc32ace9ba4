//! Logo image decoding and upload

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::error::TextureError;

/// Decoded logo pixels, RGBA8, bottom row first
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl LogoImage {
    /// Decode PNG/JPEG bytes, converting to RGBA8 and flipping vertically
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.flipv().into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            rgba: img.into_raw(),
            width,
            height,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(path: &Path) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    /// 1x1 texture of a single color
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            rgba: rgba.to_vec(),
            width: 1,
            height: 1,
        }
    }

    pub fn size(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// Create the GPU texture, upload the pixels and build a sampler
    pub fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> (wgpu::TextureView, wgpu::Sampler) {
        let size = self.size();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("logo_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("logo_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        (view, sampler)
    }
}

/// Keep a successfully loaded logo, or log why there is none.
///
/// A missing or broken logo is not fatal; the quad falls back to its vertex
/// colors.
pub fn logo_or_fallback(source: &str, result: Result<LogoImage, TextureError>) -> Option<LogoImage> {
    match result {
        Ok(logo) => {
            log::info!("Loaded logo {} ({}x{})", source, logo.width, logo.height);
            Some(logo)
        }
        Err(e) => {
            log::warn!("Failed to load texture {}: {}", source, e);
            None
        }
    }
}
