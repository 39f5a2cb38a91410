//! Shared utilities.
//!
//! Frame timing for FPS logging and the CPU mirror of the panel mask SDF.

pub mod frame_timing;
pub mod sdf;
