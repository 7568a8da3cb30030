use crate::coords::Viewport;
use crate::device::{poll_device, Gpu, DEPTH_FORMAT};
use crate::frame::FramePermit;

/// Renderer-facing context (device/queue + target formats + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub viewport: Viewport, // physical px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            depth_format,
            viewport,
        }
    }

    /// Context targeting `gpu`'s surface and depth buffer.
    pub fn for_gpu(gpu: &'a Gpu<'_>) -> Self {
        let size = gpu.size();
        Self::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            DEPTH_FORMAT,
            Viewport::new(size.width as f32, size.height as f32),
        )
    }

    /// Fires ready completion callbacks without blocking.
    ///
    /// Pass this as the driver when waiting on a frame gate from the
    /// submission thread.
    #[inline]
    pub fn poll(&self) {
        poll_device(self.device);
    }
}

/// Target for drawing (encoder + attachments) and the permits that must stay
/// alive until the GPU has executed this frame.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
    permits: Vec<FramePermit>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: &'a wgpu::TextureView,
    ) -> Self {
        Self {
            encoder,
            color_view,
            depth_view,
            permits: Vec::new(),
        }
    }

    /// Keeps `permit` until the frame's submission completes on the GPU.
    #[inline]
    pub fn retire_on_completion(&mut self, permit: FramePermit) {
        self.permits.push(permit);
    }

    /// Hands the collected permits to the submitter.
    #[inline]
    pub fn into_permits(self) -> Vec<FramePermit> {
        self.permits
    }
}
