//! Panel strip construction and asynchronous texture fulfillment.

use std::path::PathBuf;

use wgpu::util::DeviceExt;

use super::CarouselEngine;
use crate::error::ArcslideError;
use crate::gpu::texture::PanelTexture;
use crate::layout::{self, PANEL_HEIGHT, PANEL_WIDTH};
use crate::loader::spawn_decode_batch;
use crate::options::CarouselOptions;

/// Per-panel shader parameters. Layout matches `PanelParams` in
/// `assets/shaders/panel.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PanelParams {
    /// World x offset of this panel along the strip.
    offset_x: f32,
    /// Bend intensity (copied from the options at rebuild time).
    curve: f32,
    /// Corner radius in UV units.
    border_radius: f32,
    /// Source image aspect ratio; written when the decode arrives.
    image_aspect: f32,
    /// Target panel aspect ratio (fixed 0.65 / 0.85).
    panel_aspect: f32,
    _pad: [f32; 3],
}

/// GPU-free bookkeeping for the strip lifecycle: the current rebuild
/// generation and how many decodes it still awaits.
#[derive(Debug, Default)]
pub(super) struct StripTracker {
    generation: u64,
    pending: usize,
    loaded: bool,
}

impl StripTracker {
    /// Start a new strip of `total` panels. Exactly one generation bump
    /// per call; an empty strip is trivially complete.
    pub(super) fn begin_rebuild(&mut self, total: usize) -> u64 {
        self.generation += 1;
        self.pending = total;
        self.loaded = total == 0;
        self.generation
    }

    /// Whether a decode tagged `generation` belongs to the current strip.
    pub(super) fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Record one finished decode. Returns `true` the moment the strip
    /// becomes fully loaded.
    pub(super) fn complete_one(&mut self) -> bool {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 && !self.loaded {
            self.loaded = true;
            return true;
        }
        false
    }

    /// The current rebuild generation.
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether every panel of the current strip has finished loading.
    pub(super) fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Build the parameter block for every panel of a fresh strip, purely from
/// the options and camera geometry.
fn strip_params(
    options: &CarouselOptions,
    fovy: f32,
    camera_z: f32,
    viewport_w: u32,
    viewport_h: u32,
) -> Vec<PanelParams> {
    let total = layout::panel_count(options.images.len());
    let center = layout::initial_offset(total);
    let step = layout::plane_width(
        fovy,
        camera_z,
        viewport_w,
        viewport_h,
        options.images_per_view,
    ) * layout::spacing_factor(options.gap);

    (0..total)
        .map(|i| PanelParams {
            offset_x: layout::panel_offset(i, center, step, options.direction),
            curve: options.curve,
            border_radius: options.border_radius,
            image_aspect: 1.0,
            panel_aspect: PANEL_WIDTH / PANEL_HEIGHT,
            _pad: [0.0; 3],
        })
        .collect()
}

/// One duplicated image instance along the strip.
pub(super) struct Panel {
    source: PathBuf,
    params: PanelParams,
    params_buffer: wgpu::Buffer,
    texture: Option<PanelTexture>,
    bind_group: Option<wgpu::BindGroup>,
}

impl Panel {
    /// The bind group, present once the texture has arrived.
    pub(super) fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }

    /// Whether this panel's image decoded successfully.
    fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl CarouselEngine {
    /// Discard the current strip and build a fresh one from the options and
    /// camera geometry. Bumps the generation so in-flight decodes for the
    /// old strip are dropped when they arrive.
    pub(super) fn rebuild_panels(&mut self) -> Result<(), ArcslideError> {
        self.panels.clear();

        let params = strip_params(
            &self.options,
            self.camera.fovy,
            self.camera_z(),
            self.context.width(),
            self.context.height(),
        );
        let generation = self.strip.begin_rebuild(params.len());
        if params.is_empty() {
            // Nothing to load; the strip is trivially complete.
            log::warn!("no image sources configured; strip is empty");
            return Ok(());
        }

        let image_count = self.options.images.len();
        let total = params.len();
        let mut sources = Vec::with_capacity(total);
        for (i, params) in params.into_iter().enumerate() {
            let source = self.options.images[i % image_count].clone();
            let params_buffer = self.context.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Panel Params Buffer"),
                    contents: bytemuck::bytes_of(&params),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                },
            );
            sources.push((i, source.clone()));
            self.panels.push(Panel {
                source,
                params,
                params_buffer,
                texture: None,
                bind_group: None,
            });
        }

        log::info!(
            "built {total} panels ({image_count} sources x {}), generation {generation}",
            layout::REPEAT_FACTOR,
        );
        spawn_decode_batch(self.decode_tx.clone(), generation, sources)
    }

    /// Drain finished decodes and attach textures to their panels. Stale
    /// results from a superseded generation are discarded.
    pub(super) fn drain_decodes(&mut self) {
        while let Ok(msg) = self.decode_rx.try_recv() {
            if !self.strip.is_current(msg.generation) {
                log::debug!(
                    "dropping stale decode (generation {} != {})",
                    msg.generation,
                    self.strip.generation()
                );
                continue;
            }

            match msg.result {
                Ok(rgba) => self.attach_texture(msg.panel_index, &rgba),
                Err(e) => {
                    // Failed panels stay untextured and are skipped at
                    // draw time; they still count toward completion.
                    log::warn!(
                        "panel {} failed to decode: {e}",
                        msg.panel_index
                    );
                }
            }

            if self.strip.complete_one() {
                let textured =
                    self.panels.iter().filter(|p| p.is_textured()).count();
                log::info!(
                    "all {} panels loaded ({textured} textured)",
                    self.panels.len()
                );
            }
        }
    }

    fn attach_texture(&mut self, index: usize, rgba: &image::RgbaImage) {
        let Some(panel) = self.panels.get_mut(index) else {
            return;
        };
        let texture = PanelTexture::from_rgba(
            &self.context.device,
            &self.context.queue,
            rgba,
            &format!("Panel Texture {index}"),
        );

        panel.params.image_aspect = texture.aspect;
        self.context.queue.write_buffer(
            &panel.params_buffer,
            0,
            bytemuck::bytes_of(&panel.params),
        );

        let bind_group = self.context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Panel Bind Group"),
                layout: &self.panel_bind_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: panel.params_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &self.sampler,
                        ),
                    },
                ],
            },
        );

        log::debug!(
            "panel {index} textured from {}",
            panel.source.display()
        );
        panel.texture = Some(texture);
        panel.bind_group = Some(bind_group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RADIUS_NARROW;

    fn three_image_options() -> CarouselOptions {
        let mut opts = CarouselOptions::default();
        opts.images = vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b.jpg"),
            PathBuf::from("c.jpg"),
        ];
        opts
    }

    #[test]
    fn rebuild_bumps_generation_exactly_once() {
        let mut strip = StripTracker::default();
        assert_eq!(strip.begin_rebuild(15), 1);
        assert_eq!(strip.begin_rebuild(15), 2);
        assert_eq!(strip.generation(), 2);
    }

    #[test]
    fn rebuild_resets_load_tracking() {
        let mut strip = StripTracker::default();
        let _ = strip.begin_rebuild(2);
        assert!(!strip.complete_one());
        assert!(strip.complete_one());
        assert!(strip.is_loaded());

        let _ = strip.begin_rebuild(1);
        assert!(!strip.is_loaded());
        assert!(strip.complete_one());
    }

    #[test]
    fn stale_generations_are_not_current() {
        let mut strip = StripTracker::default();
        let old = strip.begin_rebuild(5);
        let new = strip.begin_rebuild(5);
        assert!(!strip.is_current(old));
        assert!(strip.is_current(new));
    }

    #[test]
    fn empty_strip_is_trivially_loaded() {
        let mut strip = StripTracker::default();
        let _ = strip.begin_rebuild(0);
        assert!(strip.is_loaded());
        assert!(!strip.complete_one());
    }

    #[test]
    fn fresh_strip_params_follow_the_new_width() {
        // The resize path: reassign the radius for the new width, then
        // rebuild the strip from the layout inputs.
        let mut opts = three_image_options();
        opts.border_radius = CarouselOptions::radius_for_width(700);
        let params = strip_params(&opts, 75.0, 2.25, 700, 500);

        assert_eq!(params.len(), 15);
        assert!(params.iter().all(|p| p.border_radius == RADIUS_NARROW));
        // The center panel of the fresh strip sits at the origin.
        assert_eq!(params[8].offset_x, 0.0);
        // Offsets are strictly monotonic for the default direction (-1).
        assert!(params
            .windows(2)
            .all(|pair| pair[1].offset_x > pair[0].offset_x));
    }
}
