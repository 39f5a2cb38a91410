//! The carousel rendering engine.
//!
//! [`CarouselEngine`] owns the GPU context, the panel strip, the scroll
//! state, and the render pipeline. A windowing layer feeds it
//! [`InputEvent`]s and calls [`update`](CarouselEngine::update) +
//! [`render`](CarouselEngine::render) once per frame; the bundled viewer
//! (`viewer` feature) does exactly that.

mod input;
mod panels;

use std::sync::mpsc::{self, Receiver, Sender};

use wgpu::util::DeviceExt;

use self::panels::Panel;
use crate::camera::{Camera, GlobalsUniform, CAMERA_Z};
use crate::error::ArcslideError;
use crate::geometry::{plane_mesh, PanelVertex, PANEL_SEGMENTS};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::PanelTexture;
use crate::input::InputEvent;
use crate::layout::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::loader::DecodeResult;
use crate::options::CarouselOptions;
use crate::scroll::ScrollState;
use crate::util::frame_timing::FrameTiming;

/// How often (in frames) the smoothed FPS is logged at debug level.
const FPS_LOG_INTERVAL: u32 = 600;

/// The carousel rendering engine.
pub struct CarouselEngine {
    context: RenderContext,
    camera: Camera,
    options: CarouselOptions,
    scroll: ScrollState,

    globals: GlobalsUniform,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    panel_bind_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    sampler: wgpu::Sampler,

    panels: Vec<Panel>,
    strip: panels::StripTracker,
    decode_tx: Sender<DecodeResult>,
    decode_rx: Receiver<DecodeResult>,

    cursor: (f32, f32),
    frame_timing: FrameTiming,
    frames_since_fps_log: u32,
}

impl CarouselEngine {
    /// Create an engine rendering into the given surface target.
    ///
    /// Panel textures start decoding immediately on a background thread;
    /// the first frame draws whatever has arrived so far.
    ///
    /// # Errors
    ///
    /// Returns [`ArcslideError::Gpu`] when no adapter/device/surface is
    /// available, or [`ArcslideError::ThreadSpawn`] if the decode worker
    /// cannot start.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        mut options: CarouselOptions,
    ) -> Result<Self, ArcslideError> {
        let context = RenderContext::new(window, initial_size).await?;
        let camera = Camera::new(initial_size.0, initial_size.1);
        options.border_radius =
            CarouselOptions::radius_for_width(initial_size.0);

        let mut composer = ShaderComposer::new();
        let shader = composer.compose(
            &context.device,
            "Panel Shader",
            include_str!("../../assets/shaders/panel.wgsl"),
            "panel.wgsl",
        );

        let (vertices, indices) = plane_mesh(
            PANEL_WIDTH,
            PANEL_HEIGHT,
            PANEL_SEGMENTS,
            PANEL_SEGMENTS,
        );
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Panel Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Panel Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let globals = GlobalsUniform::new();
        let globals_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Globals Buffer"),
                contents: bytemuck::bytes_of(&globals),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let globals_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let globals_bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Globals Bind Group"),
                    layout: &globals_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: globals_buffer.as_entire_binding(),
                    }],
                });

        let panel_bind_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Panel Bind Group Layout"),
                entries: &[
                    // binding 0: per-panel params uniform
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX
                            | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // binding 1: panel texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 2: sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Panel Pipeline Layout"),
                bind_group_layouts: &[&globals_layout, &panel_bind_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Panel Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[PanelVertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        let sampler = PanelTexture::sampler(&context.device);
        let (decode_tx, decode_rx) = mpsc::channel();

        let mut engine = Self {
            context,
            camera,
            options,
            scroll: ScrollState::new(),
            globals,
            globals_buffer,
            globals_bind_group,
            panel_bind_layout,
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            sampler,
            panels: Vec::new(),
            strip: panels::StripTracker::default(),
            decode_tx,
            decode_rx,
            cursor: (0.0, 0.0),
            frame_timing: FrameTiming::new(),
            frames_since_fps_log: 0,
        };

        engine.rebuild_panels()?;
        Ok(engine)
    }

    /// Advance one frame: apply finished decodes, tick the autoplay drift,
    /// and upload the frame globals.
    pub fn update(&mut self) {
        self.drain_decodes();
        self.scroll.tick(self.options.direction);

        let offset = self.scroll.time * self.options.speed;
        self.globals.update(&self.camera, offset);
        self.context.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&self.globals),
        );
    }

    /// Draw every loaded panel in one alpha-blended pass.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; `Lost`/`Outdated` should be answered with a
    /// [`resize`](Self::resize) and a retry next frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    wgpu::Color::TRANSPARENT,
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            for panel in &self.panels {
                // Panels whose texture has not arrived (or failed to
                // decode) are skipped.
                let Some(bind_group) = panel.bind_group() else {
                    continue;
                };
                pass.set_bind_group(1, bind_group, &[]);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        self.frames_since_fps_log += 1;
        if self.frames_since_fps_log >= FPS_LOG_INTERVAL {
            log::debug!("fps: {:.1}", self.frame_timing.fps());
            self.frames_since_fps_log = 0;
        }
        Ok(())
    }

    /// Reconfigure for a new surface size: camera aspect, responsive corner
    /// radius, and a full panel rebuild. Every resize rebuilds; there is no
    /// debounce.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.set_viewport(width, height);
        self.options.border_radius =
            CarouselOptions::radius_for_width(width);
        if let Err(e) = self.rebuild_panels() {
            log::error!("panel rebuild failed: {e}");
        }
    }

    /// Suspend or resume the autoplay drift.
    pub fn set_paused(&mut self, paused: bool) {
        self.scroll.set_paused(paused);
    }

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Whether a drag is currently in progress (drive cursor styling from
    /// this).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.scroll.is_dragging
    }

    /// Whether every panel of the current generation has finished loading
    /// (successfully or not).
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.strip.is_loaded()
    }

    /// Cumulative scroll position.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.scroll.time
    }

    /// Number of panels in the current strip.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Camera distance from the strip, exposed for layout math.
    #[must_use]
    pub fn camera_z(&self) -> f32 {
        CAMERA_Z
    }

    /// Handle a platform-agnostic input event. Returns `true` if the drag
    /// state changed (the caller may want to refresh cursor styling).
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.apply_input(event)
    }
}
