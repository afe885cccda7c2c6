//! Windowed wgpu implementation of [`RenderSurface`].
//!
//! Two pipelines share one shader and one vertex format:
//! - **Line pass**: `LineList`, depth-tested and depth-writing, for box
//!   edges and trajectories
//! - **Mesh pass**: alpha-blended back faces without depth writes, so box
//!   fills read as a translucent backdrop
//!
//! Trajectory appends upload only their new line vertices.

use wgpu::util::DeviceExt;

use super::dynamic_buffer::DynamicBuffer;
use super::geometry::{
    scene_vertex_buffer_layout, GeometryChange, SceneGeometry,
};
use super::render_context::{RenderContext, RenderContextError};
use super::shader_composer::{ShaderComposer, SCENE_SHADER};
use super::texture::DepthTarget;
use crate::camera::{Camera, CameraUniform};
use crate::engine::RenderSurface;
use crate::error::TrackviewError;
use crate::scene::Scene;

/// Initial vertex buffer size in bytes.
const INITIAL_VERTEX_BYTES: usize = 64 * 1024;

/// GPU-backed render surface for a window.
pub struct GpuSurface {
    context: RenderContext,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    line_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    line_vertices: DynamicBuffer,
    mesh_vertices: DynamicBuffer,
    mesh_indices: DynamicBuffer,
    geometry: SceneGeometry,
    /// Scene generation last uploaded, if any.
    uploaded_generation: Option<u64>,
    depth: DepthTarget,
}

impl GpuSurface {
    /// Build pipelines and buffers on `context`.
    ///
    /// # Errors
    ///
    /// Shader composition failures.
    pub fn new(context: RenderContext) -> Result<Self, RenderContextError> {
        let device = &context.device;

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&CameraUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let mut composer = ShaderComposer::new()?;
        let shader = composer.compose(device, "Scene Shader", SCENE_SHADER)?;
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[&camera_layout],
                push_constant_ranges: &[],
            });
        let format = context.format();
        let pipeline = |label: &str,
                        topology: wgpu::PrimitiveTopology,
                        cull_mode: Option<wgpu::Face>,
                        depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[scene_vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode,
                    ..Default::default()
                },
                depth_stencil: Some(DepthTarget::stencil_state(depth_write)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let line_pipeline = pipeline(
            "Line Pipeline",
            wgpu::PrimitiveTopology::LineList,
            None,
            true,
        );
        let mesh_pipeline = pipeline(
            "Back Face Mesh Pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Front),
            false,
        );

        let line_vertices = DynamicBuffer::new(
            device,
            "Line Vertices",
            INITIAL_VERTEX_BYTES,
            wgpu::BufferUsages::VERTEX,
        );
        let mesh_vertices = DynamicBuffer::new(
            device,
            "Mesh Vertices",
            INITIAL_VERTEX_BYTES,
            wgpu::BufferUsages::VERTEX,
        );
        let mesh_indices = DynamicBuffer::new(
            device,
            "Mesh Indices",
            INITIAL_VERTEX_BYTES,
            wgpu::BufferUsages::INDEX,
        );
        let (width, height) = context.size();
        let depth = DepthTarget::new(device, width, height);

        Ok(Self {
            context,
            camera_buffer,
            camera_bind_group,
            line_pipeline,
            mesh_pipeline,
            line_vertices,
            mesh_vertices,
            mesh_indices,
            geometry: SceneGeometry::default(),
            uploaded_generation: None,
            depth,
        })
    }

    /// The underlying device, queue and surface.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn upload(&mut self, scene: &Scene) {
        let change = self.geometry.sync(scene);
        let device = &self.context.device;
        let queue = &self.context.queue;
        match change {
            GeometryChange::Unchanged => {}
            GeometryChange::LinesAppended { from } => {
                let _ = self.line_vertices.write_from(
                    device,
                    queue,
                    &self.geometry.line_vertices,
                    from,
                );
            }
            GeometryChange::Rebuilt => {
                let _ = self.line_vertices.write(
                    device,
                    queue,
                    &self.geometry.line_vertices,
                );
                let _ = self.mesh_vertices.write(
                    device,
                    queue,
                    &self.geometry.mesh_vertices,
                );
                let _ = self.mesh_indices.write(
                    device,
                    queue,
                    &self.geometry.mesh_indices,
                );
            }
        }
        self.uploaded_generation = Some(scene.generation());
        log::trace!(
            "synced scene generation {} ({change:?}, {} line vertices, {} meshes)",
            scene.generation(),
            self.geometry.line_vertex_count(),
            self.geometry.mesh_draws.len()
        );
    }
}

impl RenderSurface for GpuSurface {
    fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.context.resize(width, height) {
            self.depth = DepthTarget::new(&self.context.device, width, height);
        }
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &dyn Camera,
    ) -> Result<(), TrackviewError> {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(camera);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        if self.uploaded_generation != Some(scene.generation()) {
            self.upload(scene);
        }

        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated; reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b] = scene.background();
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            let line_count = self.geometry.line_vertex_count();
            if line_count > 0 {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, self.line_vertices.buffer().slice(..));
                pass.draw(0..line_count, 0..1);
            }

            if !self.geometry.mesh_draws.is_empty() {
                pass.set_vertex_buffer(0, self.mesh_vertices.buffer().slice(..));
                pass.set_index_buffer(
                    self.mesh_indices.buffer().slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.set_pipeline(&self.mesh_pipeline);
                for draw in &self.geometry.mesh_draws {
                    pass.draw_indexed(
                        draw.indices.clone(),
                        draw.base_vertex,
                        0..1,
                    );
                }
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
