//! Pure panel layout math.
//!
//! Everything here is a plain function of the configuration and camera
//! geometry, so the strip invariants (count, monotonic offsets, symmetry
//! about the center panel) are testable without a GPU.

/// How many times the source image sequence is repeated along the strip.
/// Five copies leave drag slack on both sides before the repeat shows.
pub const REPEAT_FACTOR: usize = 5;

/// Panel quad width in world units.
pub const PANEL_WIDTH: f32 = 0.65;

/// Panel quad height in world units.
pub const PANEL_HEIGHT: f32 = 0.85;

/// Gap percentage to spacing multiplier: `1 + gap / 100`. Negative gaps
/// yield a multiplier below one, overlapping adjacent panels.
#[must_use]
pub fn spacing_factor(gap: f32) -> f32 {
    1.0 + gap / 100.0
}

/// World-space width allotted to one panel: the viewport width in world
/// units (at the camera's distance) divided by `images_per_view`, so that
/// many panels exactly fill the visible width before gap adjustment.
#[must_use]
pub fn plane_width(
    fovy_deg: f32,
    camera_z: f32,
    viewport_w: u32,
    viewport_h: u32,
    images_per_view: f32,
) -> f32 {
    let vfov = fovy_deg.to_radians();
    let world_h = 2.0 * (vfov / 2.0).tan() * camera_z;
    let aspect = viewport_w as f32 / viewport_h.max(1) as f32;
    let world_w = world_h * aspect;
    world_w / images_per_view
}

/// Total panel count for `image_count` sources.
#[must_use]
pub fn panel_count(image_count: usize) -> usize {
    image_count * REPEAT_FACTOR
}

/// Index of the panel that sits at x = 0: `ceil(total / 2)`.
#[must_use]
pub fn initial_offset(total: usize) -> usize {
    total.div_ceil(2)
}

/// World x position of panel `index`. `step` is the full panel-to-panel
/// spacing (`plane_width * spacing_factor`); `direction` flips the strip so
/// autoplay can run either way.
#[must_use]
pub fn panel_offset(
    index: usize,
    initial_offset: usize,
    step: f32,
    direction: f32,
) -> f32 {
    -direction * (index as f32 - initial_offset as f32) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOVY: f32 = 75.0;
    const CAMERA_Z: f32 = 2.25;

    #[test]
    fn count_is_five_per_source_image() {
        assert_eq!(panel_count(3), 15);
        assert_eq!(panel_count(9), 45);
        assert_eq!(panel_count(0), 0);
    }

    #[test]
    fn initial_offset_is_ceil_half() {
        assert_eq!(initial_offset(15), 8);
        assert_eq!(initial_offset(45), 23);
        assert_eq!(initial_offset(10), 5);
    }

    #[test]
    fn center_panel_sits_at_origin() {
        // 3 images, 800x600, defaults: 15 panels, panel index 8 at x = 0.
        let total = panel_count(3);
        let center = initial_offset(total);
        assert_eq!(center, 8);
        let step =
            plane_width(FOVY, CAMERA_Z, 800, 600, 9.0) * spacing_factor(-20.0);
        let x = panel_offset(center, center, step, -1.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn offsets_are_strictly_monotonic() {
        let total = panel_count(3);
        let center = initial_offset(total);
        let step =
            plane_width(FOVY, CAMERA_Z, 800, 600, 9.0) * spacing_factor(-20.0);

        // direction -1: increasing in index
        let xs: Vec<f32> = (0..total)
            .map(|i| panel_offset(i, center, step, -1.0))
            .collect();
        assert!(xs.windows(2).all(|w| w[1] > w[0]));

        // direction +1: decreasing in index
        let xs: Vec<f32> = (0..total)
            .map(|i| panel_offset(i, center, step, 1.0))
            .collect();
        assert!(xs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn offsets_are_symmetric_about_center() {
        let total = panel_count(3);
        let center = initial_offset(total);
        let step =
            plane_width(FOVY, CAMERA_Z, 800, 600, 9.0) * spacing_factor(-20.0);
        for d in 1..=7 {
            let left = panel_offset(center - d, center, step, -1.0);
            let right = panel_offset(center + d, center, step, -1.0);
            assert!((left + right).abs() < 1e-5);
        }
    }

    #[test]
    fn panels_fill_viewport_before_gap() {
        // images_per_view panels of plane_width span the visible width.
        let w = plane_width(FOVY, CAMERA_Z, 800, 600, 9.0);
        let world_h = 2.0 * (FOVY.to_radians() / 2.0).tan() * CAMERA_Z;
        let world_w = world_h * (800.0 / 600.0);
        assert!((w * 9.0 - world_w).abs() < 1e-4);
    }

    #[test]
    fn negative_gap_overlaps() {
        assert!(spacing_factor(-20.0) < 1.0);
        assert_eq!(spacing_factor(0.0), 1.0);
        assert!(spacing_factor(10.0) > 1.0);
    }
}
