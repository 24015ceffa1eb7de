use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use tiger_puppet::cli::Cli;
use tiger_puppet::config::PuppetConfig;
use tiger_puppet::core::{
    DisplayContext, FpsMeter, GpuContext, InputEvent, PointerAdapter, SurfaceRenderer, TraceOptions,
};
use tiger_puppet::frame::FrameLoop;
use tiger_puppet::PuppetContext;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const MAX_WINDOW_WIDTH: u32 = 4096;

/// Only the width is resizable; min and max pin the height so the window
/// and surface always agree
fn window_attributes(width: u32, height: u32) -> WindowAttributes {
    Window::default_attributes()
        .with_title("Tiger Puppet")
        .with_inner_size(PhysicalSize::new(width, height))
        .with_min_inner_size(PhysicalSize::new(1, height))
        .with_max_inner_size(PhysicalSize::new(MAX_WINDOW_WIDTH, height))
}

struct Graphics {
    window: Arc<Window>,
    renderer: SurfaceRenderer,
}

struct App {
    puppet: PuppetContext,
    graphics: Option<Graphics>,
    pointer: PointerAdapter,
    frames: FrameLoop,
    fps: FpsMeter,
}

impl App {
    fn new(puppet: PuppetContext) -> Self {
        Self {
            puppet,
            graphics: None,
            pointer: PointerAdapter::new(),
            frames: FrameLoop::new(),
            fps: FpsMeter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let (width, height) = self.puppet.viewport().surface_size();
        let window = Arc::new(
            event_loop
                .create_window(window_attributes(width, height))
                .context("failed to create window")?,
        );

        let (gpu, surface) = pollster::block_on(GpuContext::for_window(window.clone()))
            .map_err(|e| anyhow!("failed to initialize GPU: {e}"))?;
        let renderer = SurfaceRenderer::new(
            Arc::new(gpu),
            surface,
            DisplayContext::new(width, height),
            self.puppet.render_context(),
        )
        .map_err(|e| anyhow!("failed to create surface renderer: {e}"))?;

        log::info!(
            "window {}x{}, tracing at {}x{}, {} scene nodes",
            width,
            height,
            self.puppet.render_context().width,
            self.puppet.render_context().height,
            self.puppet.scene().len()
        );

        Ok(Graphics { window, renderer })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let event = InputEvent::Resize {
            width: size.width,
            height: size.height,
        };
        if !self.puppet.handle_input(&event) {
            return;
        }

        let (width, height) = self.puppet.viewport().surface_size();
        let render_size = self.puppet.render_context();
        if let Some(graphics) = &mut self.graphics {
            graphics.renderer.resize(DisplayContext::new(width, height), render_size);
        }
    }

    fn redraw(&mut self) {
        let Some(info) = self.frames.next() else {
            return;
        };

        let (outcome, frame) = self.puppet.advance_frame();
        log::trace!(
            "frame {} dt {:.4}s open {:.2} tongue {}",
            info.number,
            info.delta,
            outcome.open,
            outcome.tongue_visible
        );

        if let Some(graphics) = &self.graphics {
            if let Err(e) = graphics.renderer.render_frame(&frame) {
                log::error!("Render error: {}", e);
            }
            if let Some(fps) = self.fps.frame() {
                log::debug!("FPS: {:.1} (frame {}, {:.1}s)", fps, info.number, info.time);
            }
            if self.frames.should_reschedule() {
                graphics.window.request_redraw();
            }
        }
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        self.frames.cancel();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.stop(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input) = self.pointer.translate(&event) {
            match input {
                InputEvent::Resize { width, height } => self.resize(PhysicalSize::new(width, height)),
                _ => {
                    self.puppet.handle_input(&input);
                }
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.stop(event_loop),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PuppetConfig::load(path)?,
        None => PuppetConfig::default(),
    };
    let options = TraceOptions {
        shadows: !cli.no_shadows,
        samples_per_axis: cli.samples,
    };
    let puppet = PuppetContext::new(&config, cli.width, cli.render_scale, options);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(puppet);

    log::info!("Tiger Puppet - drag to turn, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
