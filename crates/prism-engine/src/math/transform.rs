use super::{Mat3, Mat4, Vec3, Vec4};

/// Component-wise sum.
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

#[inline]
pub const fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Right-handed perspective projection into wgpu clip space.
///
/// View-space depth `-near` lands on clip depth 0 and `-far` on depth 1 once
/// divided by `w = -z`.
pub fn perspective(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    debug_assert!(fov_radians > 0.0 && fov_radians < core::f32::consts::PI);
    debug_assert!(aspect > 0.0);
    debug_assert!(far > near && near > 0.0);

    let ys = 1.0 / (fov_radians * 0.5).tan();
    let xs = ys / aspect;
    let zs = far / (near - far);

    Mat4::from_rows(
        Vec4::new(xs, 0.0, 0.0, 0.0),
        Vec4::new(0.0, ys, 0.0, 0.0),
        Vec4::new(0.0, 0.0, zs, near * zs),
        Vec4::new(0.0, 0.0, -1.0, 0.0),
    )
}

/// Rotation about +X; positive angles turn +Y towards +Z.
pub fn rotate_x(radians: f32) -> Mat4 {
    let (s, c) = radians.sin_cos();
    Mat4::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, c, -s, 0.0),
        Vec4::new(0.0, s, c, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Rotation about +Y; positive angles turn +Z towards +X.
pub fn rotate_y(radians: f32) -> Mat4 {
    let (s, c) = radians.sin_cos();
    Mat4::from_rows(
        Vec4::new(c, 0.0, s, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(-s, 0.0, c, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Rotation about +Z; positive angles turn +X towards +Y.
pub fn rotate_z(radians: f32) -> Mat4 {
    let (s, c) = radians.sin_cos();
    Mat4::from_rows(
        Vec4::new(c, -s, 0.0, 0.0),
        Vec4::new(s, c, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

#[inline]
pub fn translate(v: Vec3) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        v.extend(1.0),
    )
}

#[inline]
pub fn scale(v: Vec3) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(v.x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, v.y, 0.0, 0.0),
        Vec4::new(0.0, 0.0, v.z, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Upper-left 3×3 block of `m`, for transforming directions.
///
/// Only valid as a normal matrix while `m` carries no non-uniform scale.
#[inline]
pub fn discard_translation(m: Mat4) -> Mat3 {
    Mat3::from_cols(m.col(0).truncate(), m.col(1).truncate(), m.col(2).truncate())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;

    const ANGLES: [f32; 7] = [0.0, 0.3, -1.2, FRAC_PI_2, PI, 7.5, 1234.567];

    #[test]
    fn rotations_invert_with_negated_angle() {
        for a in ANGLES {
            assert_abs_diff_eq!(rotate_x(a) * rotate_x(-a), identity(), epsilon = 1e-5);
            assert_abs_diff_eq!(rotate_y(a) * rotate_y(-a), identity(), epsilon = 1e-5);
            assert_abs_diff_eq!(rotate_z(a) * rotate_z(-a), identity(), epsilon = 1e-5);
        }
    }

    #[test]
    fn rotations_follow_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);

        assert_abs_diff_eq!(rotate_x(FRAC_PI_2).transform_point(y).truncate(), z, epsilon = 1e-6);
        assert_abs_diff_eq!(rotate_y(FRAC_PI_2).transform_point(z).truncate(), x, epsilon = 1e-6);
        assert_abs_diff_eq!(rotate_z(FRAC_PI_2).transform_point(x).truncate(), y, epsilon = 1e-6);
    }

    #[test]
    fn rotation_keeps_w() {
        let p = rotate_y(0.7).transform_point(Vec3::new(3.0, 1.0, -2.0));
        assert_eq!(p.w, 1.0);
    }

    #[test]
    fn translation_inverts_with_negated_vector() {
        let vs = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.25, 40.0, -1e3),
        ];
        for v in vs {
            assert_abs_diff_eq!(translate(v) * translate(-v), identity(), epsilon = 1e-6);
        }
    }

    #[test]
    fn translate_moves_points_not_directions() {
        let t = translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t * Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(t * Vec4::new(1.0, 1.0, 1.0, 0.0), Vec4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn unit_scale_is_identity() {
        assert_eq!(scale(Vec3::ONE), identity());
    }

    #[test]
    fn scale_is_diagonal() {
        let s = scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s.transform_point(Vec3::ONE), Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(s.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn discard_translation_of_translate_is_identity() {
        for v in [Vec3::new(5.0, -3.0, 9.0), Vec3::splat(100.0)] {
            assert_eq!(discard_translation(translate(v)), Mat3::IDENTITY);
        }
    }

    #[test]
    fn discard_translation_keeps_rotation_block() {
        let m = translate(Vec3::new(1.0, 2.0, 3.0)) * rotate_z(0.4);
        let n = discard_translation(m);
        let r = rotate_z(0.4);
        for i in 0..3 {
            assert_abs_diff_eq!(n.col(i), r.col(i).truncate(), epsilon = 1e-6);
        }
    }

    #[test]
    fn perspective_maps_near_to_zero_and_far_to_one() {
        let (near, far) = (0.03, 500.0);
        let p = perspective(FRAC_PI_4, 1.5, near, far);

        let at_near = p.transform_point(Vec3::new(0.0, 0.0, -near));
        assert_abs_diff_eq!(at_near.z, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(at_near.w, near);

        let at_far = p.transform_point(Vec3::new(0.0, 0.0, -far));
        assert_abs_diff_eq!(at_far.z / at_far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_rows() {
        let (fov, aspect, near, far) = (FRAC_PI_2, 2.0, 1.0, 10.0);
        let p = perspective(fov, aspect, near, far);
        let zs = far / (near - far);

        assert_abs_diff_eq!(p.row(0), Vec4::new(0.5, 0.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(p.row(1), Vec4::new(0.0, 1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(p.row(2), Vec4::new(0.0, 0.0, zs, near * zs), epsilon = 1e-6);
        assert_eq!(p.row(3), Vec4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn perspective_frustum_edge_hits_unit_x() {
        // 90° fov, aspect 1: a point on the frustum edge lands on x/w = 1.
        let p = perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let c = p.transform_point(Vec3::new(4.0, 0.0, -4.0));
        assert_abs_diff_eq!(c.x / c.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn add_is_componentwise() {
        assert_eq!(
            add(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 10.0)),
            Vec3::new(0.0, 2.5, 13.0)
        );
    }

    #[test]
    fn composition_applies_right_operand_first() {
        // Scale then translate vs translate then scale.
        let t = translate(Vec3::new(1.0, 0.0, 0.0));
        let s = scale(Vec3::splat(2.0));
        let p = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!((t * s).transform_point(p).x, 3.0);
        assert_eq!((s * t).transform_point(p).x, 4.0);
    }
}
