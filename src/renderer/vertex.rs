//! Vertex layout and geometry for the logo quad

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Quad vertex with position, color and texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32, color: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
            tex_coords,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Two triangles sharing the top-right/bottom-left diagonal
pub const QUAD_INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

/// Quad centered on the origin with the given half-size.
///
/// Order: top right, bottom right, bottom left, top left. Texture
/// coordinates have their origin at the bottom-left corner, matching a logo
/// that was flipped vertically on load.
pub fn quad_vertices(half_extent: Vec2) -> [QuadVertex; 4] {
    let Vec2 { x: hx, y: hy } = half_extent;
    [
        QuadVertex::new(hx, hy, colors::RED, [1.0, 1.0]),
        QuadVertex::new(hx, -hy, colors::GREEN, [1.0, 0.0]),
        QuadVertex::new(-hx, -hy, colors::BLUE, [0.0, 0.0]),
        QuadVertex::new(-hx, hy, colors::RED, [0.0, 1.0]),
    ]
}

/// Corner colors, shown when no logo is loaded
pub mod colors {
    pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
    pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
    pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 8 * 4);
        let desc = QuadVertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.attributes[2].offset, 24);
    }

    #[test]
    fn test_quad_matches_half_extent() {
        let quad = quad_vertices(Vec2::new(0.2, 0.1));
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 0.2);
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -0.2);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 0.1);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -0.1);
    }

    #[test]
    fn test_indices_cover_both_triangles() {
        let quad = quad_vertices(Vec2::splat(0.2));
        // Each triangle uses the top-left corner and two distinct others
        for tri in QUAD_INDICES.chunks(3) {
            assert!(tri.contains(&3));
            assert!(tri.iter().all(|&i| (i as usize) < quad.len()));
        }
        let mut used = QUAD_INDICES.to_vec();
        used.sort();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_uv_origin_bottom_left() {
        let quad = quad_vertices(Vec2::splat(0.2));
        // bottom left
        assert_eq!(quad[2].tex_coords, [0.0, 0.0]);
        // top right
        assert_eq!(quad[0].tex_coords, [1.0, 1.0]);
    }
}
