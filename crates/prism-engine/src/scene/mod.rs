//! CPU-side scene state consumed by the renderers.
//!
//! Nothing here touches the GPU: every per-frame record is computed from the
//! animation angle and static layout parameters, which keeps it testable.

mod animation;
mod camera;
mod cube_grid;
mod grid;
mod records;
mod triangle;

pub use animation::Animation;
pub use camera::CameraRig;
pub use cube_grid::CubeGridScene;
pub use grid::{GridCoord, InstanceGrid};
pub use records::{CameraRecord, InstanceRecord};
pub use triangle::TriangleScene;
