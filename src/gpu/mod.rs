//! GPU plumbing: device/surface ownership, shader composition, and texture
//! upload.

/// Core wgpu resource ownership (device, queue, surface).
pub mod render_context;
/// naga_oil composer with the crate's shared WGSL modules preloaded.
pub mod shader_composer;
/// Panel texture upload and sampling.
pub mod texture;
