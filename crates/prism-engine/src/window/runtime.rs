use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(1024.0, 1024.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the app once the GPU exists, and drives one
    /// `on_frame` per redraw until the app or the user asks to exit.
    ///
    /// Escape and window close both run [`CoreApp::on_exit`] before the GPU is
    /// dropped. Errors from window/GPU setup or from `build` end the loop and
    /// are returned here.
    pub fn run<A, B>(config: RuntimeConfig, gpu_init: GpuInit, build: B) -> Result<()>
    where
        A: CoreApp + 'static,
        B: FnOnce(&Gpu<'_>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, build);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A, B> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    build: Option<B>,

    // Declared before `window`: app resources drop before the device.
    app: Option<A>,
    window: Option<WindowEntry>,

    error: Option<anyhow::Error>,
}

impl<A, B> AppState<A, B>
where
    A: CoreApp + 'static,
    B: FnOnce(&Gpu<'_>) -> Result<A>,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, build: B) -> Self {
        Self {
            config,
            gpu_init,
            build: Some(build),
            app: None,
            window: None,
            error: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_window_entry(event_loop)?;
        let build = self
            .build
            .take()
            .context("application was already built")?;

        let app = entry
            .with_gpu(|gpu| build(gpu))
            .context("failed to set up application")?;

        log::info!("runtime started: {:?}", self.config.title);

        entry.with_window(|w| w.request_redraw());
        self.app = Some(app);
        self.window = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::debug!("stopping runtime after setup failure");
        self.error = Some(err);
        self.shutdown(event_loop);
    }

    /// Lets the app finish in-flight work, then releases it before the GPU.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let (Some(app), Some(entry)) = (self.app.as_mut(), self.window.as_ref()) {
            log::debug!("shutting down; waiting for in-flight frames");
            entry.with_gpu(|gpu| app.on_exit(gpu));
        }
        self.app = None;
        self.window = None;
        event_loop.exit();
    }
}

impl<A, B> ApplicationHandler for AppState<A, B>
where
    A: CoreApp + 'static,
    B: FnOnce(&Gpu<'_>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.build.is_none() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; frame pacing comes from FIFO present and the
        // renderers' frame gates.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        if app.on_window_event(&event) == AppControl::Exit || is_exit_request(&event) {
            self.shutdown(event_loop);
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                    };
                    app.on_frame(&mut ctx)
                });

                if control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            self.shutdown(event_loop);
        }
    }
}

/// Close button or a fresh Escape press.
fn is_exit_request(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::CloseRequested => true,
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } => true,
        _ => false,
    }
}
