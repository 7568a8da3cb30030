use anyhow::{ensure, Context, Result};

use super::RenderCtx;

const TEXEL_BYTES: u32 = 4;

/// Procedural RGBA8 checkerboard, `size`×`size` texels split into
/// `cells`×`cells` squares.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CheckerTexture {
    pub size: u32,
    pub cells: u32,
    pub light: [u8; 4],
    pub dark: [u8; 4],
}

impl Default for CheckerTexture {
    fn default() -> Self {
        Self {
            size: 256,
            cells: 8,
            light: [235, 235, 235, 255],
            dark: [40, 40, 48, 255],
        }
    }
}

impl CheckerTexture {
    /// Row-major texels, `light` in the top-left cell.
    pub fn texels(&self) -> Result<Vec<u8>> {
        ensure!(self.size > 0, "checker texture size must be non-zero");
        ensure!(self.cells > 0, "checker texture needs at least one cell");
        ensure!(
            self.cells <= self.size,
            "checker texture has {} cells but only {} texels per side",
            self.cells,
            self.size
        );

        let side = self.size as usize;
        let mut out = Vec::with_capacity(side * side * TEXEL_BYTES as usize);
        for y in 0..self.size {
            let cy = self.cell_of(y);
            for x in 0..self.size {
                let texel = if (self.cell_of(x) + cy) % 2 == 0 {
                    self.light
                } else {
                    self.dark
                };
                out.extend_from_slice(&texel);
            }
        }
        Ok(out)
    }

    fn cell_of(&self, texel: u32) -> u32 {
        (u64::from(texel) * u64::from(self.cells) / u64::from(self.size)) as u32
    }

    /// Uploads the texels and builds the sampling bind group.
    pub(super) fn upload(
        &self,
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
    ) -> Result<TextureBinding> {
        let max = ctx.device.limits().max_texture_dimension_2d;
        ensure!(
            self.size <= max,
            "checker texture size {} exceeds device limit {max}",
            self.size
        );
        let texels = self.texels().context("failed to generate checker texels")?;

        let extent = wgpu::Extent3d {
            width: self.size,
            height: self.size,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism checker texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.size * TEXEL_BYTES),
                rows_per_image: Some(self.size),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("prism checker sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism checker bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::debug!(
            "checker texture uploaded: {0}x{0}, {1}x{1} cells",
            self.size,
            self.cells
        );

        Ok(TextureBinding {
            _texture: texture,
            bind_group,
        })
    }

    pub(super) fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism checker bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }
}

/// GPU side of an uploaded texture.
pub(super) struct TextureBinding {
    _texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: [u8; 4] = [255, 255, 255, 255];
    const D: [u8; 4] = [0, 0, 0, 255];

    fn checker(size: u32, cells: u32) -> CheckerTexture {
        CheckerTexture {
            size,
            cells,
            light: L,
            dark: D,
        }
    }

    fn texel(bytes: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size + x) * TEXEL_BYTES) as usize;
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    }

    #[test]
    fn two_by_two_cells() {
        let t = checker(4, 2).texels().expect("texels");
        assert_eq!(t.len(), 4 * 4 * 4);
        assert_eq!(texel(&t, 4, 0, 0), L);
        assert_eq!(texel(&t, 4, 1, 1), L);
        assert_eq!(texel(&t, 4, 2, 0), D);
        assert_eq!(texel(&t, 4, 0, 3), D);
        assert_eq!(texel(&t, 4, 3, 3), L);
    }

    #[test]
    fn one_cell_is_solid() {
        let t = checker(3, 1).texels().expect("texels");
        assert!(t.chunks(4).all(|px| px == L));
    }

    #[test]
    fn uneven_cells_cover_every_texel() {
        let t = checker(10, 3).texels().expect("texels");
        assert_eq!(t.len(), 400);
        assert_eq!(texel(&t, 10, 9, 0), L);
        assert_eq!(texel(&t, 10, 4, 0), D);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(checker(0, 1).texels().is_err());
        assert!(checker(8, 0).texels().is_err());
        assert!(checker(4, 5).texels().is_err());
    }

    #[test]
    fn default_is_valid() {
        let tex = CheckerTexture::default();
        let t = tex.texels().expect("texels");
        assert_eq!(t.len() as u32, tex.size * tex.size * TEXEL_BYTES);
    }
}
