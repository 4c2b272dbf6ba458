//! Windowed runner: a winit window showing the scene through wgpu.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::canvas::PixelCanvas;
use crate::config::SceneConfig;
use crate::error::SimulationError;
use crate::gpu::GpuState;
use crate::scene::Scene;
use crate::time::Time;

const DEFAULT_TITLE: &str = "tannenbaum";

/// Window settings and scene config for a windowed run.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// Simulation::new()
///     .with_config(SceneConfig::default().with_snow_count(3000))
///     .with_window_size(1024, 768)
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SceneConfig,
    window_size: (u32, u32),
    title: String,
}

impl Simulation {
    /// Default scene in a 1280×720 window.
    pub fn new() -> Self {
        Self {
            config: SceneConfig::default(),
            window_size: (1280, 720),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the RNG seed so every run generates the same tree.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Initial inner size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run until it is closed or Escape is pressed.
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    canvas: PixelCanvas,
    scene: Scene,
    time: Time,
    window_size: (u32, u32),
    title: String,
    /// Set when setup fails inside the event loop; returned from `run`.
    error: Option<SimulationError>,
}

impl App {
    fn new(simulation: Simulation) -> Self {
        Self {
            window: None,
            gpu_state: None,
            canvas: PixelCanvas::new(0, 0),
            scene: Scene::new(simulation.config),
            time: Time::new(),
            window_size: simulation.window_size,
            title: simulation.title,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        self.scene.set_scale_factor(window.scale_factor());
        let (width, height) = logical_size(window.inner_size(), window.scale_factor());
        self.scene.resize(&mut self.canvas, width, height);
        self.time.reset();

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.scene.shutdown();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.time.update();
        let outcome = self.scene.step(self.time.elapsed_ms(), &mut self.canvas);

        let mut out_of_memory = false;
        if outcome.is_rendered() {
            if let Some(gpu_state) = &mut self.gpu_state {
                match gpu_state.upload_and_present(&self.canvas) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
        if out_of_memory {
            log::error!("GPU out of memory, closing");
            self.close(event_loop);
            return;
        }

        if let Some(window) = &self.window {
            if self.time.fps_updated() {
                window.set_title(&format!("{} - {:.0} fps", self.title, self.time.fps()));
            }
            if self.scene.frame_loop().is_running() {
                window.request_redraw();
            }
        }
    }
}

/// The scene works in logical pixels; the presenter stretches the canvas
/// over the physical surface.
fn logical_size(physical: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical = physical.to_logical::<f64>(scale_factor);
    (logical.width.round() as u32, logical.height.round() as u32)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("{}", err);
                self.error = Some(err);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.close(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.close(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    let (width, height) = logical_size(physical_size, window.scale_factor());
                    self.scene.resize(&mut self.canvas, width, height);
                    window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // A Resized with the new physical size follows.
                self.scene.set_scale_factor(scale_factor);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                self.scene.handle_window_event(&other);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.shutdown();
        self.gpu_state = None;
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_size() {
        assert_eq!(logical_size(PhysicalSize::new(2048, 1536), 2.0), (1024, 768));
        assert_eq!(logical_size(PhysicalSize::new(1000, 600), 1.25), (800, 480));
        assert_eq!(logical_size(PhysicalSize::new(0, 0), 2.0), (0, 0));
    }
}
