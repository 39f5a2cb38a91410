//! Segmented plane mesh for image panels.
//!
//! Panels are rendered from a shared grid mesh rather than a single quad so
//! the vertex-stage curve bend has interior vertices to displace.

use bytemuck::{Pod, Zeroable};

/// Curve tessellation: grid segments per panel axis.
pub const PANEL_SEGMENTS: u32 = 20;

/// One panel mesh vertex: local-space position + UV.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PanelVertex {
    /// Position in local panel space, centered on the origin.
    pub position: [f32; 3],
    /// Texture coordinate, `(0, 0)` at the panel's top-left.
    pub uv: [f32; 2],
}

impl PanelVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout for the panel pipeline.
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<PanelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Generate a centered plane of `width` x `height` with `segs_x` x `segs_y`
/// grid cells. Returns vertices plus a CCW triangle index list.
#[must_use]
pub fn plane_mesh(
    width: f32,
    height: f32,
    segs_x: u32,
    segs_y: u32,
) -> (Vec<PanelVertex>, Vec<u32>) {
    let mut vertices =
        Vec::with_capacity(((segs_x + 1) * (segs_y + 1)) as usize);
    for iy in 0..=segs_y {
        let ty = iy as f32 / segs_y as f32;
        // Rows run bottom-to-top; v runs top-to-bottom for wgpu sampling.
        let y = (ty - 0.5) * height;
        let v = 1.0 - ty;
        for ix in 0..=segs_x {
            let tx = ix as f32 / segs_x as f32;
            let x = (tx - 0.5) * width;
            vertices.push(PanelVertex {
                position: [x, y, 0.0],
                uv: [tx, v],
            });
        }
    }

    let stride = segs_x + 1;
    let mut indices = Vec::with_capacity((segs_x * segs_y * 6) as usize);
    for iy in 0..segs_y {
        for ix in 0..segs_x {
            let a = iy * stride + ix;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            indices.extend_from_slice(&[a, d, b, a, c, d]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let (verts, indices) = plane_mesh(0.65, 0.85, 20, 20);
        assert_eq!(verts.len(), 21 * 21);
        assert_eq!(indices.len(), 20 * 20 * 6);
    }

    #[test]
    fn extents_are_centered() {
        let (verts, _) = plane_mesh(0.65, 0.85, 4, 4);
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_y = verts.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((min_x + 0.325).abs() < 1e-6);
        assert!((max_x - 0.325).abs() < 1e-6);
        assert!((min_y + 0.425).abs() < 1e-6);
        assert!((max_y - 0.425).abs() < 1e-6);
    }

    #[test]
    fn uv_covers_unit_square_top_left_origin() {
        let (verts, _) = plane_mesh(1.0, 1.0, 2, 2);
        // First vertex is the bottom-left corner: uv (0, 1).
        assert_eq!(verts[0].uv, [0.0, 1.0]);
        // Last vertex is the top-right corner: uv (1, 0).
        assert_eq!(verts.last().map(|v| v.uv), Some([1.0, 0.0]));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let (verts, indices) = plane_mesh(1.0, 1.0, 3, 5);
        let n = verts.len() as u32;
        assert!(indices.iter().all(|&i| i < n));
    }
}
