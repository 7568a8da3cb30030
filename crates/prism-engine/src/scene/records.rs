use crate::math::{Mat3, Mat4, Vec4};

/// Per-instance data, rewritten every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InstanceRecord {
    pub transform: Mat4,
    pub color: Vec4,
    pub normal_transform: Mat3,
}

impl Default for InstanceRecord {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            normal_transform: Mat3::IDENTITY,
        }
    }
}

/// Per-frame camera data.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRecord {
    pub perspective: Mat4,
    pub world: Mat4,
    pub world_normal: Mat3,
}
