//! Perspective camera and the per-frame globals uniform.

use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
pub const FOVY_DEG: f32 = 75.0;

/// Camera distance from the panel strip along +z.
pub const CAMERA_Z: f32 = 2.25;

/// Near clipping plane distance.
pub const ZNEAR: f32 = 0.1;

/// Far clipping plane distance.
pub const ZFAR: f32 = 20.0;

/// Perspective camera looking down -z at the panel strip.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Create the carousel camera for the given viewport size.
    #[must_use]
    pub fn new(viewport_w: u32, viewport_h: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport_w as f32 / viewport_h.max(1) as f32,
            fovy: FOVY_DEG,
            znear: ZNEAR,
            zfar: ZFAR,
        }
    }

    /// Recompute the aspect ratio after a viewport resize.
    pub fn set_viewport(&mut self, viewport_w: u32, viewport_h: u32) {
        self.aspect = viewport_w as f32 / viewport_h.max(1) as f32;
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and the strip's scroll
/// offset, uploaded once per frame.
pub struct GlobalsUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Horizontal scene offset (`time * speed`).
    pub scroll: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 3],
}

impl Default for GlobalsUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalsUniform {
    /// Identity view-projection with zero scroll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            scroll: 0.0,
            _pad: [0.0; 3],
        }
    }

    /// Refresh from the camera and the current scroll offset.
    pub fn update(&mut self, camera: &Camera, scroll: f32) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.scroll = scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_origin_to_screen_center() {
        let camera = Camera::new(800, 600);
        let clip = camera.build_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
    }

    #[test]
    fn aspect_tracks_viewport() {
        let mut camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        camera.set_viewport(1024, 512);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let camera = Camera::new(100, 0);
        assert!(camera.aspect.is_finite());
    }
}
