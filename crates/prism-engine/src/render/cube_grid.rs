use anyhow::{ensure, Context, Result};
use wgpu::util::DeviceExt;

use crate::device::poll_device;
use crate::frame::FramePipeline;
use crate::scene::{Animation, CubeGridScene, InstanceRecord};

use super::common::{depth_test, load_color, load_depth, uniform_buffer, uniform_layout_entry};
use super::mesh::{CubeVertex, CUBE_INDICES, CUBE_VERTICES};
use super::records::{GpuCamera, GpuInstance};
use super::texture::TextureBinding;
use super::{CheckerTexture, FrameRenderer, RenderCtx, RenderTarget};

const ANGLE_STEP: f32 = 0.002;

/// Surface treatment for the cube faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Shading {
    /// Per-instance color with one directional light.
    #[default]
    Lit,
    /// Per-instance color modulated by a checker texture, then lit.
    Textured(CheckerTexture),
}

struct FrameSlot {
    instances: wgpu::Buffer,
    camera: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Instanced, depth-tested grid of cubes orbiting their center.
///
/// Each frame slot owns an instance buffer sized for the whole grid and a
/// camera uniform. Cube geometry is shared and static.
pub struct CubeGridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    texture: Option<TextureBinding>,
    frames: FramePipeline<FrameSlot>,

    scene: CubeGridScene,
    animation: Animation,

    instance_capacity: usize,
    records: Vec<InstanceRecord>,
    staging: Vec<GpuInstance>,
    warned_overflow: bool,
}

impl CubeGridRenderer {
    /// Builds pipelines and per-frame buffers.
    ///
    /// A texture that cannot be created is not an error: the renderer logs a
    /// warning and falls back to [`Shading::Lit`].
    pub fn new(
        ctx: &RenderCtx<'_>,
        scene: CubeGridScene,
        shading: Shading,
        frames_in_flight: usize,
    ) -> Result<Self> {
        let instance_capacity = scene.instance_count();
        ensure!(instance_capacity > 0, "cube grid has no instances");

        let texture_layout = match shading {
            Shading::Lit => None,
            Shading::Textured(_) => Some(CheckerTexture::bind_group_layout(ctx.device)),
        };
        let texture = match (shading, texture_layout.as_ref()) {
            (Shading::Textured(checker), Some(layout)) => match checker.upload(ctx, layout) {
                Ok(binding) => Some(binding),
                Err(e) => {
                    log::warn!("checker texture unavailable, falling back to lit shading: {e:#}");
                    None
                }
            },
            _ => None,
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism cube shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cube_grid.wgsl").into()),
        });

        let camera_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("prism cube camera bgl"),
                    entries: &[uniform_layout_entry::<GpuCamera>(
                        0,
                        wgpu::ShaderStages::VERTEX,
                    )],
                });

        let (fs_entry, bind_group_layouts) = match (&texture, texture_layout.as_ref()) {
            (Some(_), Some(tex)) => ("fs_textured", vec![&camera_layout, tex]),
            _ => ("fs_lit", vec![&camera_layout]),
        };

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("prism cube pipeline layout"),
                    bind_group_layouts: &bind_group_layouts,
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism cube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::layout(), GpuInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(depth_test(ctx.depth_format)),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism cube vbo"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism cube ibo"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_bytes = (instance_capacity * std::mem::size_of::<GpuInstance>()) as u64;
        let frames = FramePipeline::from_fn(frames_in_flight, |_| {
            let instances = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("prism cube instance vbo"),
                size: instance_bytes,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let camera = uniform_buffer::<GpuCamera>(ctx.device, "prism cube camera ubo");
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("prism cube camera bind group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera.as_entire_binding(),
                }],
            });
            FrameSlot {
                instances,
                camera,
                bind_group,
            }
        })
        .context("failed to create cube grid frame slots")?;

        log::debug!(
            "cube grid renderer ready: {instance_capacity} instances, {fs_entry}, \
             {frames_in_flight} frames in flight"
        );

        Ok(Self {
            pipeline,
            vertices,
            indices,
            texture,
            frames,
            scene,
            animation: Animation::new(ANGLE_STEP),
            instance_capacity,
            records: Vec::with_capacity(instance_capacity),
            staging: Vec::with_capacity(instance_capacity),
            warned_overflow: false,
        })
    }

    /// True when the checker texture was created and is being sampled.
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl FrameRenderer for CubeGridRenderer {
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let ticket = self.frames.begin_frame_driving(|| ctx.poll());
        let slot = ticket.slot;

        let angle = self.animation.advance();
        self.scene.write_instances(angle, &mut self.records);
        let count = fit_to_capacity(
            self.records.len(),
            self.instance_capacity,
            &mut self.warned_overflow,
        );

        self.staging.clear();
        self.staging
            .extend(self.records[..count].iter().map(GpuInstance::from));
        ctx.queue
            .write_buffer(&slot.instances, 0, bytemuck::cast_slice(&self.staging));

        let camera = GpuCamera::from(&self.scene.camera_record(ctx.viewport.aspect()));
        ctx.queue
            .write_buffer(&slot.camera, 0, bytemuck::bytes_of(&camera));

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism cube pass"),
                color_attachments: &[Some(load_color(target.color_view))],
                depth_stencil_attachment: Some(load_depth(target.depth_view)),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &slot.bind_group, &[]);
            if let Some(texture) = &self.texture {
                rpass.set_bind_group(1, &texture.bind_group, &[]);
            }
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.set_vertex_buffer(1, slot.instances.slice(..));
            rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..count as u32);
        }

        target.retire_on_completion(ticket.permit);
    }

    fn drain(&self, device: &wgpu::Device) {
        self.frames.drain_driving(|| poll_device(device));
    }
}

/// Number of records that fit in a slot buffer; warns once on overflow.
fn fit_to_capacity(len: usize, capacity: usize, warned: &mut bool) -> usize {
    if len > capacity && !*warned {
        log::warn!("{len} cube instances exceed slot capacity {capacity}; extra instances dropped");
        *warned = true;
    }
    len.min(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_within_capacity_pass_through() {
        let mut warned = false;
        assert_eq!(fit_to_capacity(1000, 1000, &mut warned), 1000);
        assert_eq!(fit_to_capacity(0, 1000, &mut warned), 0);
        assert!(!warned);
    }

    #[test]
    fn overflow_is_truncated_and_flagged_once() {
        let mut warned = false;
        assert_eq!(fit_to_capacity(1200, 1000, &mut warned), 1000);
        assert!(warned);
        assert_eq!(fit_to_capacity(5000, 1000, &mut warned), 1000);
        assert!(warned);
    }

    #[test]
    fn default_shading_is_lit() {
        assert_eq!(Shading::default(), Shading::Lit);
    }
}
