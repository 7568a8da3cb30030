//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, static buffers, and a
//! [`FramePipeline`](crate::frame::FramePipeline) of per-frame buffers) and
//! releases them on drop. Callers must [`FrameRenderer::drain`] before dropping
//! a renderer whose frames may still be in flight.
//!
//! Convention:
//! - CPU transforms come from [`crate::math`] (column-major, right-handed).
//! - Per-frame data is uploaded as the `#[repr(C)]` records in [`records`].

mod common;
mod ctx;
mod cube_grid;
mod mesh;
pub mod records;
mod texture;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube_grid::{CubeGridRenderer, Shading};
pub use texture::CheckerTexture;
pub use triangle::TriangleRenderer;

/// A renderer driven once per redraw.
pub trait FrameRenderer {
    /// Records one frame into `target`.
    ///
    /// Blocks while every frame slot is still in flight.
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>);

    /// Waits until no frame recorded by this renderer is in flight.
    fn drain(&self, device: &wgpu::Device);
}
