//! CPU mirror of the panel mask math in `assets/shaders/panel.wgsl`.
//!
//! The fragment stage masks each panel to a rounded rectangle and darkens
//! the rim. Keeping the same formulas here lets the mask's visual
//! guarantees (opaque center, transparent corners, antialiased edge) be
//! unit-tested without a GPU. If the WGSL changes, this file must change
//! with it.

/// Width of the antialiased band at the rounded edge, in UV units.
pub const EDGE_SOFTNESS: f32 = 0.01;

/// Maximum rim darkening applied near the panel's outer radius.
pub const SHADOW_STRENGTH: f32 = 0.15;

/// Signed distance from `center` (offset from the rect's middle) to the
/// edge of a rounded rectangle of half-size `size` with corner `radius`.
/// Negative inside, positive outside.
#[must_use]
pub fn rounded_rect_sdf(center: (f32, f32), size: (f32, f32), radius: f32) -> f32 {
    let qx = (center.0.abs() - size.0 + radius).max(0.0);
    let qy = (center.1.abs() - size.1 + radius).max(0.0);
    (qx * qx + qy * qy).sqrt() - radius
}

/// GLSL-style smoothstep.
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Mask alpha at the given UV for the given corner radius: fully opaque
/// inside the rounded rect, fading to transparent across a band of
/// [`EDGE_SOFTNESS`].
#[must_use]
pub fn panel_alpha(uv: (f32, f32), border_radius: f32) -> f32 {
    let center = (uv.0 - 0.5, uv.1 - 0.5);
    let dist = rounded_rect_sdf(center, (0.5, 0.5), border_radius);
    1.0 - smoothstep(0.0, EDGE_SOFTNESS, dist)
}

/// Rim darkening factor at the given UV, `0.0..=SHADOW_STRENGTH`.
#[must_use]
pub fn edge_shadow(uv: (f32, f32)) -> f32 {
    let center = (uv.0 - 0.5, uv.1 - 0.5);
    let r = (center.0 * center.0 + center.1 * center.1).sqrt();
    smoothstep(0.45, 0.5, r) * SHADOW_STRENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_fully_opaque_for_any_radius() {
        for radius in [0.01, 0.06, 0.1, 0.25, 0.5] {
            assert_eq!(panel_alpha((0.5, 0.5), radius), 1.0);
        }
    }

    #[test]
    fn corner_is_transparent() {
        // UV (0,0) with radius 0.1 lies well outside the rounded edge.
        let alpha = panel_alpha((0.0, 0.0), 0.1);
        assert!(alpha < 1e-6);
    }

    #[test]
    fn edge_band_is_antialiased() {
        // Halfway into the softness band past the straight right edge the
        // alpha must be strictly between 0 and 1.
        let alpha = panel_alpha((1.0 + EDGE_SOFTNESS / 2.0, 0.5), 0.1);
        assert!(alpha > 0.0 && alpha < 1.0);
    }

    #[test]
    fn sdf_sign_convention() {
        assert!(rounded_rect_sdf((0.0, 0.0), (0.5, 0.5), 0.1) < 0.0);
        assert!(rounded_rect_sdf((0.6, 0.0), (0.5, 0.5), 0.1) > 0.0);
    }

    #[test]
    fn shadow_is_zero_at_center_and_capped_at_corner() {
        assert_eq!(edge_shadow((0.5, 0.5)), 0.0);
        let corner = edge_shadow((0.0, 0.0));
        assert!((corner - SHADOW_STRENGTH).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_clamps_and_interpolates() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }
}
