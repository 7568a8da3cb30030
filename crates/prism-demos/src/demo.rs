use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::Gpu;
use prism_engine::frame::DEFAULT_FRAMES_IN_FLIGHT;
use prism_engine::render::{
    CheckerTexture, CubeGridRenderer, FrameRenderer, RenderCtx, Shading, TriangleRenderer,
};
use prism_engine::scene::{CubeGridScene, TriangleScene};

/// The bundled demos, in the order they build on each other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Demo {
    Triangle,
    #[default]
    Cubes,
    Textured,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Triangle, Demo::Cubes, Demo::Textured];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Triangle => "triangle",
            Demo::Cubes => "cubes",
            Demo::Textured => "textured",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Demo::Triangle => "prism: triangle",
            Demo::Cubes => "prism: cube grid",
            Demo::Textured => "prism: textured cube grid",
        }
    }

    fn clear_color(self) -> wgpu::Color {
        match self {
            Demo::Triangle => wgpu::Color {
                r: 0.07,
                g: 0.07,
                b: 0.09,
                a: 1.0,
            },
            Demo::Cubes | Demo::Textured => wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
        }
    }

    /// Builds the demo's renderer against `gpu`.
    pub fn build(self, gpu: &Gpu<'_>) -> Result<DemoApp> {
        let ctx = RenderCtx::for_gpu(gpu);
        let renderer: Box<dyn FrameRenderer> = match self {
            Demo::Triangle => Box::new(TriangleRenderer::new(
                &ctx,
                TriangleScene::default(),
                DEFAULT_FRAMES_IN_FLIGHT,
            )?),
            Demo::Cubes => Box::new(CubeGridRenderer::new(
                &ctx,
                CubeGridScene::default(),
                Shading::Lit,
                DEFAULT_FRAMES_IN_FLIGHT,
            )?),
            Demo::Textured => Box::new(CubeGridRenderer::new(
                &ctx,
                CubeGridScene::default(),
                Shading::Textured(CheckerTexture::default()),
                DEFAULT_FRAMES_IN_FLIGHT,
            )?),
        };

        log::info!("demo '{self}' ready");
        Ok(DemoApp {
            renderer,
            clear: self.clear_color(),
        })
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Demo::ALL.iter().map(|d| d.name()).collect();
                anyhow!("unknown demo '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// One renderer drawn into every frame.
pub struct DemoApp {
    renderer: Box<dyn FrameRenderer>,
    clear: wgpu::Color,
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let renderer = &mut self.renderer;
        ctx.render(self.clear, |rctx, target| renderer.draw(rctx, target))
    }

    fn on_exit(&mut self, gpu: &Gpu<'_>) {
        self.renderer.drain(gpu.device());
        log::debug!("all frames retired");
    }
}
