//! Byte layouts shared with the WGSL shaders.
//!
//! Each struct here is read by a shader straight out of a buffer with no
//! schema step in between, so field order and padding must match the WGSL
//! declarations exactly. Sizes are checked at compile time.

use bytemuck::{Pod, Zeroable};

use crate::math::Mat4;
use crate::scene::{CameraRecord, InstanceRecord};

/// Per-instance vertex data (`step_mode = Instance`).
///
/// Matrices are column-major; the 3×3 normal matrix is widened to three
/// `vec4` columns.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GpuInstance {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub normal_transform: [[f32; 4]; 3],
}

impl GpuInstance {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        3 => Float32x4, // transform col 0
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4, // color
        8 => Float32x4, // normal col 0
        9 => Float32x4,
        10 => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

impl From<&InstanceRecord> for GpuInstance {
    fn from(r: &InstanceRecord) -> Self {
        Self {
            transform: r.transform.to_cols_array(),
            color: r.color.to_array(),
            normal_transform: r.normal_transform.to_padded_cols(),
        }
    }
}

/// Camera uniform, WGSL:
///
/// ```text
/// struct Camera {
///     perspective: mat4x4<f32>,
///     world: mat4x4<f32>,
///     world_normal: mat3x3<f32>,
/// };
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GpuCamera {
    pub perspective: [[f32; 4]; 4],
    pub world: [[f32; 4]; 4],
    pub world_normal: [[f32; 4]; 3],
}

impl From<&CameraRecord> for GpuCamera {
    fn from(r: &CameraRecord) -> Self {
        Self {
            perspective: r.perspective.to_cols_array(),
            world: r.world.to_cols_array(),
            world_normal: r.world_normal.to_padded_cols(),
        }
    }
}

/// Triangle demo per-frame uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GpuTriangleFrame {
    pub transform: [[f32; 4]; 4],
}

impl From<Mat4> for GpuTriangleFrame {
    fn from(m: Mat4) -> Self {
        Self {
            transform: m.to_cols_array(),
        }
    }
}

const _: () = assert!(std::mem::size_of::<GpuInstance>() == 128);
const _: () = assert!(std::mem::size_of::<GpuCamera>() == 176);
const _: () = assert!(std::mem::size_of::<GpuTriangleFrame>() == 64);
