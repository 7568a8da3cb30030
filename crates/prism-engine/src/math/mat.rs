use core::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use super::{Vec3, Vec4};

/// 4×4 matrix stored as four columns.
///
/// The storage order matches WGSL `mat4x4<f32>`, so [`Mat4::to_cols_array`] can
/// be uploaded as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    /// Builds a matrix from rows, the way transforms are usually written on paper.
    #[inline]
    pub const fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, r3.x),
            Vec4::new(r0.y, r1.y, r2.y, r3.y),
            Vec4::new(r0.z, r1.z, r2.z, r3.z),
            Vec4::new(r0.w, r1.w, r2.w, r3.w),
        )
    }

    #[inline]
    pub const fn col(&self, i: usize) -> Vec4 {
        self.cols[i]
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        let [c0, c1, c2, c3] = self.cols.map(|c| c.to_array()[i]);
        Vec4::new(c0, c1, c2, c3)
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Transforms a point (`w = 1`) and returns the homogeneous result.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        *self * p.extend(1.0)
    }

    #[inline]
    pub const fn to_cols_array(&self) -> [[f32; 4]; 4] {
        [
            self.cols[0].to_array(),
            self.cols[1].to_array(),
            self.cols[2].to_array(),
            self.cols[3].to_array(),
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        let [c0, c1, c2, c3] = self.cols;
        c0 * v.x + c1 * v.y + c2 * v.z + c3 * v.w
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        let [c0, c1, c2, c3] = rhs.cols;
        Mat4::from_cols(self * c0, self * c1, self * c2, self * c3)
    }
}

/// 3×3 matrix stored as three columns.
///
/// Used for direction vectors (normals). Its in-memory layout is tightly packed;
/// use [`Mat3::to_padded_cols`] for WGSL `mat3x3<f32>`, whose columns are
/// 16-byte aligned.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat3 {
    pub cols: [Vec3; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self::from_cols(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    );

    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    #[inline]
    pub const fn col(&self, i: usize) -> Vec3 {
        self.cols[i]
    }

    /// Columns widened to `vec4` with a zero pad lane.
    #[inline]
    pub const fn to_padded_cols(&self) -> [[f32; 4]; 3] {
        let [c0, c1, c2] = &self.cols;
        [
            [c0.x, c0.y, c0.z, 0.0],
            [c1.x, c1.y, c1.z, 0.0],
            [c2.x, c2.y, c2.z, 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        let [c0, c1, c2] = self.cols;
        c0 * v.x + c1 * v.y + c2 * v.z
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        let [c0, c1, c2] = rhs.cols;
        Mat3::from_cols(self * c0, self * c1, self * c2)
    }
}

// ── approx ────────────────────────────────────────────────────────────────

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols[..].abs_diff_eq(&other.cols[..], epsilon)
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.cols[..].relative_eq(&other.cols[..], epsilon, max_relative)
    }
}

impl AbsDiffEq for Mat3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols[..].abs_diff_eq(&other.cols[..], epsilon)
    }
}

impl RelativeEq for Mat3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.cols[..].relative_eq(&other.cols[..], epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn sample() -> Mat4 {
        Mat4::from_rows(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        )
    }

    #[test]
    fn from_rows_stores_columns() {
        let m = sample();
        assert_eq!(m.col(0), Vec4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(m.row(1), Vec4::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(m.to_cols_array()[3], [4.0, 8.0, 12.0, 16.0]);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = sample();
        let t = m.transpose();
        for i in 0..4 {
            assert_eq!(t.col(i), m.row(i));
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn identity_is_neutral() {
        let m = sample();
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
        let v = Vec4::new(1.0, -2.0, 3.0, 1.0);
        assert_eq!(Mat4::IDENTITY * v, v);
    }

    #[test]
    fn product_is_row_times_column() {
        let a = sample();
        let b = sample().transpose();
        let p = a * b;
        for r in 0..4 {
            for c in 0..4 {
                let expected = a.row(r).dot(b.col(c));
                assert_abs_diff_eq!(p.row(r).to_array()[c], expected);
            }
        }
    }

    #[test]
    fn multiplication_is_not_commutative() {
        let a = sample();
        let b = Mat4::from_rows(
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn mat3_padding_is_zero() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        let padded = m.to_padded_cols();
        assert_eq!(padded[1], [4.0, 5.0, 6.0, 0.0]);
        assert!(padded.iter().all(|c| c[3] == 0.0));
        assert_eq!(Mat3::IDENTITY * m, m);
        assert_eq!(m * Vec3::new(0.0, 0.0, 1.0), Vec3::new(7.0, 8.0, 9.0));
    }
}
