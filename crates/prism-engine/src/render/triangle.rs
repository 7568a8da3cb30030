use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::device::poll_device;
use crate::frame::FramePipeline;
use crate::math::Vec3;
use crate::scene::{Animation, TriangleScene};

use super::common::{load_color, uniform_buffer, uniform_layout_entry};
use super::records::GpuTriangleFrame;
use super::{FrameRenderer, RenderCtx, RenderTarget};

const ANGLE_STEP: f32 = 0.01;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

fn vec3_layout(attributes: &'static [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

struct FrameSlot {
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Flat triangle spinning about the view axis.
///
/// Positions and colors live in two static vertex buffers; the only per-frame
/// data is the spin transform, kept in a ring of uniform buffers.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    frames: FramePipeline<FrameSlot>,
    scene: TriangleScene,
    animation: Animation,
}

impl TriangleRenderer {
    pub fn new(ctx: &RenderCtx<'_>, scene: TriangleScene, frames_in_flight: usize) -> Result<Self> {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("prism triangle bgl"),
                    entries: &[uniform_layout_entry::<GpuTriangleFrame>(
                        0,
                        wgpu::ShaderStages::VERTEX,
                    )],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("prism triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vec3_layout(&POSITION_ATTRS), vec3_layout(&COLOR_ATTRS)],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Spins through both faces; no culling.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let positions = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism triangle positions"),
            contents: bytemuck::cast_slice(&scene.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism triangle colors"),
            contents: bytemuck::cast_slice(&scene.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let frames = FramePipeline::from_fn(frames_in_flight, |i| {
            let ubo = uniform_buffer::<GpuTriangleFrame>(ctx.device, "prism triangle frame ubo");
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("prism triangle bind group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                }],
            });
            log::trace!("triangle frame slot {i} created");
            FrameSlot { ubo, bind_group }
        })
        .context("failed to create triangle frame slots")?;

        log::debug!("triangle renderer ready ({frames_in_flight} frames in flight)");

        Ok(Self {
            pipeline,
            positions,
            colors,
            frames,
            scene,
            animation: Animation::new(ANGLE_STEP),
        })
    }
}

impl FrameRenderer for TriangleRenderer {
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let ticket = self.frames.begin_frame_driving(|| ctx.poll());
        let slot = ticket.slot;

        let angle = self.animation.advance();
        let frame = GpuTriangleFrame::from(self.scene.frame_transform(angle));
        ctx.queue.write_buffer(&slot.ubo, 0, bytemuck::bytes_of(&frame));

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism triangle pass"),
                color_attachments: &[Some(load_color(target.color_view))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &slot.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.positions.slice(..));
            rpass.set_vertex_buffer(1, self.colors.slice(..));
            rpass.draw(0..self.scene.positions.len() as u32, 0..1);
        }

        target.retire_on_completion(ticket.permit);
    }

    fn drain(&self, device: &wgpu::Device) {
        self.frames.drain_driving(|| poll_device(device));
    }
}
