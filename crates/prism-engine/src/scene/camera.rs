use crate::math::{self, Mat4};

use super::CameraRecord;

/// Projection parameters plus a world transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub fov_radians: f32,
    pub near: f32,
    pub far: f32,
    pub world: Mat4,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_radians: 45f32.to_radians(),
            near: 0.03,
            far: 500.0,
            world: Mat4::IDENTITY,
        }
    }
}

impl CameraRig {
    /// Camera record for a viewport with the given `width / height`.
    ///
    /// Recomputed every frame even though it rarely changes.
    pub fn record(&self, aspect: f32) -> CameraRecord {
        CameraRecord {
            perspective: math::perspective(self.fov_radians, aspect, self.near, self.far),
            world: self.world,
            world_normal: math::discard_translation(self.world),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::math::Mat3;

    use super::*;

    #[test]
    fn default_world_is_identity() {
        let rec = CameraRig::default().record(16.0 / 9.0);
        assert_eq!(rec.world, Mat4::IDENTITY);
        assert_eq!(rec.world_normal, Mat3::IDENTITY);
    }

    #[test]
    fn aspect_only_changes_x_scale() {
        let rig = CameraRig::default();
        let square = rig.record(1.0).perspective;
        let wide = rig.record(2.0).perspective;
        assert_eq!(wide.col(0).x * 2.0, square.col(0).x);
        assert_eq!(wide.col(1), square.col(1));
        assert_eq!(wide.col(2), square.col(2));
    }
}
