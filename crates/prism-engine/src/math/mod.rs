//! Transform math shared by every renderer.
//!
//! Conventions:
//! - column vectors, column-major storage
//! - `a * b` applies `b` first
//! - right-handed view space looking down -Z, clip depth in `[0, 1]`
//!
//! The constructors in [`transform`] are pure and never fail. Degenerate inputs
//! (zero aspect, `fov` outside `(0, π)`) are caller errors and only checked in
//! debug builds.

mod mat;
mod transform;
mod vec;

pub use mat::{Mat3, Mat4};
pub use transform::{
    add, discard_translation, identity, perspective, rotate_x, rotate_y, rotate_z, scale,
    translate,
};
pub use vec::{Vec3, Vec4};
