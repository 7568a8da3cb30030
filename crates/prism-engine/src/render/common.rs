//! Pipeline pieces shared by the renderers.

use std::num::NonZeroU64;

use bytemuck::Pod;

// ── depth ─────────────────────────────────────────────────────────────────

pub(super) fn depth_test(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

// ── uniforms ──────────────────────────────────────────────────────────────

/// Minimum binding size for a uniform of type `T`.
///
/// Every uniform record is a non-empty `#[repr(C)]` struct, so this never
/// returns `None` in practice; callers fall back to an unchecked binding.
pub(super) fn uniform_binding_size<T: Pod>() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

pub(super) fn uniform_layout_entry<T: Pod>(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: uniform_binding_size::<T>(),
        },
        count: None,
    }
}

pub(super) fn uniform_buffer<T: Pod>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── passes ────────────────────────────────────────────────────────────────

/// Color attachment that keeps what the frame's clear pass wrote.
pub(super) fn load_color(view: &wgpu::TextureView) -> wgpu::RenderPassColorAttachment<'_> {
    wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Load,
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    }
}

pub(super) fn load_depth(view: &wgpu::TextureView) -> wgpu::RenderPassDepthStencilAttachment<'_> {
    wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Load,
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::records::GpuCamera;

    #[test]
    fn binding_size_matches_record() {
        assert_eq!(uniform_binding_size::<GpuCamera>().map(NonZeroU64::get), Some(176));
    }
}
