/// One acquired swapchain image and the encoder recording into it.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) promptly: while the
/// surface texture is held, the next frame cannot be acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
