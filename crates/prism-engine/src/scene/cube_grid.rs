use core::f32::consts::TAU;

use crate::math::{self, Mat4, Vec3, Vec4};

use super::{CameraRecord, CameraRig, InstanceGrid, InstanceRecord};

/// A lattice of cubes orbiting their common center.
///
/// Per instance, right to left: scale, roll, yaw, move to the lattice cell,
/// then rotate the whole lattice about `object_position`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeGridScene {
    pub grid: InstanceGrid,
    /// World-space center of the lattice; also the orbit pivot.
    pub object_position: Vec3,
    /// Uniform scale applied to the unit cube.
    pub scale: f32,
    pub camera: CameraRig,
}

impl Default for CubeGridScene {
    fn default() -> Self {
        let scale = 0.2;
        Self {
            grid: InstanceGrid::new(10, 10, 10, 2.0 * scale),
            object_position: Vec3::new(0.0, 0.0, -10.0),
            scale,
            camera: CameraRig::default(),
        }
    }
}

impl CubeGridScene {
    #[inline]
    pub fn instance_count(&self) -> usize {
        self.grid.len()
    }

    /// Record for instance `index` at animation angle `angle`.
    pub fn instance(&self, index: usize, angle: f32) -> InstanceRecord {
        self.instance_in_orbit(index, angle, self.orbit(angle))
    }

    /// Rewrites `out` with one record per instance.
    pub fn write_instances(&self, angle: f32, out: &mut Vec<InstanceRecord>) {
        let orbit = self.orbit(angle);
        out.clear();
        out.extend((0..self.instance_count()).map(|i| self.instance_in_orbit(i, angle, orbit)));
    }

    pub fn camera_record(&self, aspect: f32) -> CameraRecord {
        self.camera.record(aspect)
    }

    /// Rotation of the whole lattice about its center.
    fn orbit(&self, angle: f32) -> Mat4 {
        let p = self.object_position;
        math::translate(p) * math::rotate_y(-angle) * math::rotate_x(angle * 0.5) * math::translate(-p)
    }

    fn instance_in_orbit(&self, index: usize, angle: f32, orbit: Mat4) -> InstanceRecord {
        let c = self.grid.coord(index);

        let local_scale = math::scale(Vec3::splat(self.scale));
        let roll = math::rotate_z(angle * (c.x as f32).sin());
        let yaw = math::rotate_y(angle * (c.y as f32).cos());
        let cell = math::translate(math::add(self.object_position, self.grid.offset(c)));

        let transform = orbit * cell * yaw * roll * local_scale;

        let f = index as f32 / self.instance_count() as f32;
        InstanceRecord {
            transform,
            color: Vec4::new(f, 1.0 - f, (TAU * f).sin(), 1.0),
            normal_transform: math::discard_translation(transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::scene::GridCoord;

    const CUBE_CORNERS: [Vec3; 8] = [
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
    ];

    fn single_cube() -> CubeGridScene {
        let scale = 0.05;
        CubeGridScene {
            grid: InstanceGrid::new(1, 1, 1, 2.0 * scale),
            object_position: Vec3::new(0.0, 0.0, -5.0),
            scale,
            camera: CameraRig::default(),
        }
    }

    #[test]
    fn single_cube_at_rest_lands_inside_clip_bounds() {
        let scene = single_cube();
        let inst = scene.instance(0, 0.0);
        let camera = scene.camera_record(1.0);
        let mvp = camera.perspective * camera.world * inst.transform;

        for corner in CUBE_CORNERS {
            let clip = mvp.transform_point(corner);
            assert!(clip.w > 0.0, "corner {corner:?} behind the camera");
            let (x, y, z) = (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
            assert!((-1.0..=1.0).contains(&x), "x out of bounds: {x}");
            assert!((-1.0..=1.0).contains(&y), "y out of bounds: {y}");
            assert!((0.0..=1.0).contains(&z), "z out of bounds: {z}");
        }
    }

    #[test]
    fn zero_angle_is_scale_then_translate() {
        let scene = single_cube();
        let t = scene.instance(0, 0.0).transform;
        let expected = math::translate(Vec3::new(0.0, 0.0, -5.0)) * math::scale(Vec3::splat(0.05));
        assert_abs_diff_eq!(t, expected, epsilon = 1e-6);
    }

    #[test]
    fn pivot_stays_fixed_under_orbit() {
        let scene = CubeGridScene::default();
        let orbit = scene.orbit(1.3);
        let p = orbit.transform_point(scene.object_position);
        assert_abs_diff_eq!(p.truncate(), scene.object_position, epsilon = 1e-5);
    }

    #[test]
    fn instance_centers_follow_lattice() {
        let scene = CubeGridScene::default();
        let i = 123;
        let center = scene.instance(i, 0.0).transform.col(3).truncate();
        let expected = scene.object_position + scene.grid.offset(scene.grid.coord(i));
        assert_abs_diff_eq!(center, expected, epsilon = 1e-5);
    }

    #[test]
    fn orbit_keeps_distance_to_pivot() {
        let scene = CubeGridScene::default();
        let i = 7;
        let rest = scene.instance(i, 0.0).transform.col(3).truncate() - scene.object_position;
        let moved = scene.instance(i, 2.0).transform.col(3).truncate() - scene.object_position;
        assert_abs_diff_eq!(rest.dot(rest), moved.dot(moved), epsilon = 1e-4);
    }

    #[test]
    fn colors_ramp_with_index() {
        let scene = CubeGridScene::default();
        let first = scene.instance(0, 0.0).color;
        assert_eq!(first, Vec4::new(0.0, 1.0, 0.0, 1.0));

        let n = scene.instance_count();
        let mid = scene.instance(n / 4, 0.0).color;
        assert_abs_diff_eq!(mid.x, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.z, 1.0, epsilon = 1e-5);
        assert_eq!(mid.w, 1.0);
    }

    #[test]
    fn write_instances_matches_single_lookups() {
        let scene = CubeGridScene {
            grid: InstanceGrid::new(3, 2, 2, 0.4),
            ..CubeGridScene::default()
        };
        let mut out = vec![InstanceRecord::default(); 100];
        scene.write_instances(0.75, &mut out);

        assert_eq!(out.len(), 12);
        for (i, rec) in out.iter().enumerate() {
            assert_eq!(*rec, scene.instance(i, 0.75));
        }
    }

    #[test]
    fn normal_transform_ignores_translation() {
        let scene = CubeGridScene::default();
        let rec = scene.instance(42, 0.9);
        let n = rec.normal_transform;
        for i in 0..3 {
            assert_eq!(n.col(i), rec.transform.col(i).truncate());
        }
    }

    #[test]
    fn default_grid_is_ten_cubed() {
        let scene = CubeGridScene::default();
        assert_eq!(scene.instance_count(), 1000);
        assert_eq!(scene.grid.coord(999), GridCoord::new(9, 9, 9));
    }
}
