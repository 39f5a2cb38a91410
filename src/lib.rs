// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated curved image carousel built on wgpu.
//!
//! Arcslide renders a horizontally drifting strip of textured image panels,
//! each bent into a shallow arc in the vertex stage and masked to a rounded
//! rectangle in the fragment stage. The user drags to scrub through the
//! strip; releasing stops the scrub instantly and the autoplay drift resumes.
//!
//! # Key entry points
//!
//! - [`engine::CarouselEngine`] - the rendering engine (embed in your own
//!   winit loop)
//! - [`options::CarouselOptions`] - runtime configuration (speed, gap,
//!   curve, images)
//! - [`Viewer`] - a ready-made standalone window (`viewer` feature)
//!
//! # Architecture
//!
//! The engine runs entirely on one thread. Image decoding is the only
//! asynchronous work: each panel rebuild spawns a worker that decodes
//! sources with the `image` crate and delivers them over an mpsc channel,
//! drained once per frame. Rebuilds bump a generation counter so decodes
//! that complete after a resize are detected and dropped.

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod loader;
pub mod options;
pub mod scroll;
pub mod util;

#[cfg(feature = "viewer")]
mod viewer;

pub use engine::CarouselEngine;
pub use error::ArcslideError;
pub use input::{InputEvent, MouseButton};
pub use options::CarouselOptions;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
