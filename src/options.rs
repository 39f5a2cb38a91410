//! Carousel configuration with TOML preset support.
//!
//! All tweakable settings (scroll speed, panel gap, curve intensity, drag
//! sensitivity, image sources) live here. Options serialize to/from TOML so
//! a preset file can override any subset of fields; everything else falls
//! back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ArcslideError;

/// Breakpoint (physical pixels) below which the smaller corner radius is
/// used.
pub const RADIUS_BREAKPOINT_PX: u32 = 768;

/// Corner radius for viewports at or above [`RADIUS_BREAKPOINT_PX`].
pub const RADIUS_WIDE: f32 = 0.1;

/// Corner radius for viewports narrower than [`RADIUS_BREAKPOINT_PX`].
pub const RADIUS_NARROW: f32 = 0.06;

/// Carousel configuration. Every field has a default so partial TOML files
/// (e.g. only overriding `speed`) work correctly.
///
/// Each engine instance owns an independent copy; mutating one carousel's
/// options never affects another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselOptions {
    /// Scroll multiplier: world offset per frame = time x speed.
    pub speed: f32,
    /// Inter-panel spacing as a percentage of panel width. Negative values
    /// overlap adjacent panels.
    pub gap: f32,
    /// Panel bend intensity. Applied in the vertex stage as
    /// `y *= 1 + (curve / 100) * x^2`.
    pub curve: f32,
    /// Autoplay direction: `1.0` or `-1.0`.
    pub direction: f32,
    /// Pointer-to-scroll scale applied to drag deltas.
    pub drag_sensitivity: f32,
    /// How many panels fit across the viewport width before gap adjustment.
    pub images_per_view: f32,
    /// Rounded-corner radius in UV units, `0.0..=0.5`. Reassigned on resize
    /// when the viewport width crosses [`RADIUS_BREAKPOINT_PX`].
    pub border_radius: f32,
    /// Ordered image sources. The panel strip repeats this sequence.
    pub images: Vec<PathBuf>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            speed: 10.0,
            gap: -20.0,
            curve: 15.0,
            direction: -1.0,
            drag_sensitivity: 0.9,
            images_per_view: 9.0,
            border_radius: RADIUS_WIDE,
            images: Vec::new(),
        }
    }
}

impl CarouselOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ArcslideError::Io`] if the file cannot be read, or
    /// [`ArcslideError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, ArcslideError> {
        let content =
            std::fs::read_to_string(path).map_err(ArcslideError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ArcslideError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ArcslideError::OptionsParse`] on serialization failure or
    /// [`ArcslideError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ArcslideError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ArcslideError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ArcslideError::Io)?;
        }
        std::fs::write(path, content).map_err(ArcslideError::Io)
    }

    /// The corner radius appropriate for the given viewport width.
    #[must_use]
    pub fn radius_for_width(viewport_width: u32) -> f32 {
        if viewport_width < RADIUS_BREAKPOINT_PX {
            RADIUS_NARROW
        } else {
            RADIUS_WIDE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = CarouselOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: CarouselOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
speed = 4.0
images = ["a.jpg", "b.jpg"]
"#;
        let opts: CarouselOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.speed, 4.0);
        assert_eq!(opts.images.len(), 2);
        // Everything else should be default
        assert_eq!(opts.gap, -20.0);
        assert_eq!(opts.curve, 15.0);
        assert_eq!(opts.direction, -1.0);
        assert_eq!(opts.drag_sensitivity, 0.9);
        assert_eq!(opts.images_per_view, 9.0);
        assert_eq!(opts.border_radius, RADIUS_WIDE);
    }

    #[test]
    fn radius_flips_at_breakpoint() {
        assert_eq!(CarouselOptions::radius_for_width(767), RADIUS_NARROW);
        assert_eq!(CarouselOptions::radius_for_width(768), RADIUS_WIDE);
        assert_eq!(CarouselOptions::radius_for_width(1920), RADIUS_WIDE);
    }
}
