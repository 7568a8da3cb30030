use crate::math::{self, Mat4, Vec3};

/// The flat, spinning triangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleScene {
    pub positions: [Vec3; 3],
    pub colors: [Vec3; 3],
}

impl Default for TriangleScene {
    fn default() -> Self {
        Self {
            positions: [
                Vec3::new(-0.8, 0.8, 0.0),
                Vec3::new(0.0, -0.8, 0.0),
                Vec3::new(0.8, 0.8, 0.0),
            ],
            colors: [
                Vec3::new(1.0, 0.3, 0.2),
                Vec3::new(0.8, 1.0, 0.0),
                Vec3::new(0.8, 0.0, 1.0),
            ],
        }
    }
}

impl TriangleScene {
    /// Frame transform for animation angle `angle`: a spin about the view axis.
    pub fn frame_transform(&self, angle: f32) -> Mat4 {
        math::rotate_z(angle)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn rest_pose_is_identity() {
        assert_eq!(TriangleScene::default().frame_transform(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn spin_keeps_vertices_in_plane() {
        let scene = TriangleScene::default();
        let t = scene.frame_transform(0.8);
        for p in scene.positions {
            let q = t.transform_point(p);
            assert_abs_diff_eq!(q.z, 0.0);
            assert_abs_diff_eq!(q.truncate().dot(q.truncate()), p.dot(p), epsilon = 1e-5);
        }
    }
}
