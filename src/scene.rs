//! The scene context: everything one running tree needs, in one place.
//!
//! [`Scene`] owns the particle store, camera, input state, intro clock,
//! viewport and RNG. A driver (the winit window or the headless snapshot
//! loop) calls [`Scene::resize`] when the surface changes size, feeds it
//! pointer input, and calls [`Scene::step`] once per frame.
//!
//! ```ignore
//! let mut canvas = PixelCanvas::new(0, 0);
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.resize(&mut canvas, 1024, 768);
//! scene.step(0.0, &mut canvas);
//! ```

use winit::event::WindowEvent;

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::frame_loop::FrameLoop;
use crate::generator::{self, TreeShape};
use crate::input::InputController;
use crate::intro::IntroAnimator;
use crate::particle::{ParticleKind, ParticleStore};
use crate::projection::{ViewTransform, Viewport};
use crate::renderer;
use crate::spawn::SpawnRng;
use crate::surface::{BlendMode, DrawSurface, Rgba};

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Particles drawn this frame.
    pub drawn: usize,
    /// Particles skipped because they projected behind the camera.
    pub culled: usize,
}

/// Why a frame was not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No drawable size has been seen yet, or the last one was zero.
    Idle,
    /// The loop has been torn down.
    Stopped,
    /// The surface has no pixels.
    EmptySurface,
}

/// Result of [`Scene::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered(FrameStats),
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FrameOutcome::Rendered(_))
    }
}

/// A running particle tree.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    store: ParticleStore,
    camera: Camera,
    input: InputController,
    intro: IntroAnimator,
    viewport: Viewport,
    frame_loop: FrameLoop,
    rng: SpawnRng,
}

impl Scene {
    /// An unsized scene. Nothing is generated until the first
    /// [`regenerate`](Self::regenerate) or [`resize`](Self::resize).
    ///
    /// A config that fails [`SceneConfig::validate`] is logged and used
    /// anyway; the camera replaces limits it cannot clamp with.
    pub fn new(config: SceneConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("{}", err);
        }
        let rng = SpawnRng::from_seed_or_clock(config.seed);
        Self {
            store: ParticleStore::new(),
            camera: Camera::new(&config),
            input: InputController::new(&config),
            intro: IntroAnimator::new(config.intro_duration_ms),
            viewport: Viewport::default(),
            frame_loop: FrameLoop::new(),
            rng,
            config,
        }
    }

    /// Replace every particle with a fresh population for `width × height`
    /// and restart the intro. Camera rotation and zoom are kept.
    pub fn regenerate(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_size(width, height);
        let generation = self.store.generation() + 1;
        self.intro.reset();

        if self.viewport.is_empty() {
            self.store = ParticleStore::from_particles(Vec::new(), generation);
            self.frame_loop.idle();
            log::debug!("Viewport {}x{} is empty, waiting for a usable size", width, height);
            return;
        }

        let particles = generator::generate(self.viewport, &self.config, &mut self.rng);
        self.store = ParticleStore::from_particles(particles, generation);
        self.frame_loop.start();

        let shape = TreeShape::new(self.viewport, &self.config);
        let counts = self.store.counts();
        log::info!(
            "Generated {} particles for {}x{} (body {}, lights {}, snow {}; base width {:.1}{})",
            counts.total(),
            width,
            height,
            counts.tree_body,
            counts.tree_light,
            counts.snow,
            shape.base_width,
            if shape.mobile { ", mobile" } else { "" },
        );
    }

    /// Resize the backing surface, then regenerate for the new size.
    pub fn resize<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, width: u32, height: u32) {
        log::debug!("Resize to {}x{}", width, height);
        surface.resize(width, height);
        self.regenerate(width, height);
    }

    /// Advance and draw one frame at `now_ms` (any monotonic clock).
    pub fn step<S: DrawSurface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> FrameOutcome {
        if self.frame_loop.is_stopped() {
            return FrameOutcome::Skipped(SkipReason::Stopped);
        }
        if !self.frame_loop.is_running() {
            return FrameOutcome::Skipped(SkipReason::Idle);
        }
        if self.viewport.is_empty() || !surface.is_drawable() {
            return FrameOutcome::Skipped(SkipReason::EmptySurface);
        }

        let phase = self.intro.sample(now_ms);

        surface.set_blend_mode(BlendMode::Alpha);
        surface.fill_background(Rgba::BLACK);
        surface.set_blend_mode(BlendMode::Additive);

        if !self.input.is_dragging() {
            self.camera
                .auto_rotate(self.config.rotation_speed, self.config.intro_spin_boost, phase.ease);
        }
        let view = ViewTransform::new(&self.camera, self.viewport, self.config.fov);

        let mut stats = FrameStats::default();
        let blink_speed = self.config.blink_speed;
        let margin = self.config.snow_recycle_margin;
        let viewport = self.viewport;
        let rng = &mut self.rng;

        for particle in self.store.as_mut_slice() {
            let projected = match particle.kind {
                ParticleKind::TreeBody | ParticleKind::TreeLight => {
                    particle.position = phase.position(particle.start, particle.target);
                    particle.life += blink_speed;
                    view.project(particle.position)
                }
                ParticleKind::Snow => {
                    renderer::advance_snow(particle, viewport, margin, rng);
                    view.project_flat(particle.position)
                }
            };

            let Some(at) = projected else {
                stats.culled += 1;
                continue;
            };
            match particle.kind {
                ParticleKind::Snow => renderer::draw_snow(&mut *surface, particle, at),
                _ => renderer::draw_tree_particle(&mut *surface, particle, at),
            }
            stats.drawn += 1;
        }

        surface.set_blend_mode(BlendMode::Alpha);
        log::trace!("Frame: {} drawn, {} culled", stats.drawn, stats.culled);
        FrameOutcome::Rendered(stats)
    }

    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.input.on_drag_start(x, y);
    }

    pub fn on_drag_move(&mut self, x: f32, y: f32) {
        self.input.on_drag_move(&mut self.camera, x, y);
    }

    pub fn on_drag_end(&mut self) {
        self.input.on_drag_end();
    }

    pub fn on_zoom(&mut self, delta_y: f32) {
        self.input.on_zoom(&mut self.camera, delta_y);
    }

    /// Physical pixels per logical pixel of the window feeding
    /// [`handle_window_event`](Self::handle_window_event).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.input.set_scale_factor(scale_factor);
    }

    /// Route a winit event to the input controller. Returns whether it was
    /// a pointer event.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.input.handle_event(&mut self.camera, event)
    }

    /// Stop the loop; later steps are skipped.
    pub fn shutdown(&mut self) {
        self.frame_loop.stop();
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn intro(&self) -> &IntroAnimator {
        &self.intro
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;

    fn small_scene() -> Scene {
        Scene::new(
            SceneConfig::new()
                .with_tree_count(300)
                .with_garland_count(100)
                .with_ornament_count(50)
                .with_snow_count(50)
                .with_seed(9),
        )
    }

    #[test]
    fn test_unsized_scene_skips() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        assert_eq!(scene.step(0.0, &mut canvas), FrameOutcome::Skipped(SkipReason::Idle));
        assert!(scene.particles().is_empty());
    }

    #[test]
    fn test_resize_generates_and_runs() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 200, 150);
        assert_eq!(canvas.size(), (200, 150));
        assert_eq!(scene.particles().len(), 500);
        assert_eq!(scene.particles().generation(), 1);
        assert!(scene.frame_loop().is_running());

        let outcome = scene.step(0.0, &mut canvas);
        assert!(outcome.is_rendered());
        assert_eq!(canvas.blend_mode(), BlendMode::Alpha);
        assert!(canvas.total_brightness() > 0);
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Background(BlendMode),
        Rect(BlendMode),
        Circle(BlendMode),
    }

    /// Records the blend mode active at each fill.
    struct RecordingSurface {
        size: (u32, u32),
        blend: BlendMode,
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                size: (0, 0),
                blend: BlendMode::Alpha,
                calls: Vec::new(),
            }
        }
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn blend_mode(&self) -> BlendMode {
            self.blend
        }

        fn set_blend_mode(&mut self, mode: BlendMode) {
            self.blend = mode;
        }

        fn fill_background(&mut self, _color: Rgba) {
            self.calls.push(Call::Background(self.blend));
        }

        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Rgba) {
            self.calls.push(Call::Rect(self.blend));
        }

        fn fill_circle(&mut self, _cx: f32, _cy: f32, _r: f32, _color: Rgba) {
            self.calls.push(Call::Circle(self.blend));
        }
    }

    #[test]
    fn test_particles_drawn_additively() {
        let mut scene = small_scene();
        let mut surface = RecordingSurface::new();
        scene.resize(&mut surface, 320, 240);

        for now in [0.0, 2_000.0, 10_000.0] {
            surface.calls.clear();
            let FrameOutcome::Rendered(stats) = scene.step(now, &mut surface) else {
                panic!("frame at {now} not rendered");
            };

            assert_eq!(surface.calls.first(), Some(&Call::Background(BlendMode::Alpha)));
            let fills = &surface.calls[1..];
            assert_eq!(fills.len(), stats.drawn);
            assert!(stats.drawn > 0);
            for call in fills {
                assert!(matches!(
                    call,
                    Call::Rect(BlendMode::Additive) | Call::Circle(BlendMode::Additive)
                ));
            }
            assert_eq!(surface.blend_mode(), BlendMode::Alpha);
        }
    }

    #[test]
    fn test_every_particle_accounted_for() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 320, 240);
        match scene.step(0.0, &mut canvas) {
            FrameOutcome::Rendered(stats) => assert_eq!(stats.drawn + stats.culled, 500),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_resize_goes_idle() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 100, 100);
        scene.resize(&mut canvas, 0, 100);
        assert!(scene.particles().is_empty());
        assert_eq!(scene.step(0.0, &mut canvas), FrameOutcome::Skipped(SkipReason::Idle));

        scene.resize(&mut canvas, 100, 100);
        assert!(scene.step(0.0, &mut canvas).is_rendered());
    }

    #[test]
    fn test_mismatched_surface_skips() {
        let mut scene = small_scene();
        scene.regenerate(100, 100);
        let mut canvas = PixelCanvas::new(0, 0);
        assert_eq!(
            scene.step(0.0, &mut canvas),
            FrameOutcome::Skipped(SkipReason::EmptySurface)
        );
    }

    #[test]
    fn test_life_advances_for_tree_only() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 200, 200);
        let before: Vec<f32> = scene.particles().iter().map(|p| p.life).collect();
        scene.step(0.0, &mut canvas);
        for (p, life) in scene.particles().iter().zip(before) {
            match p.kind {
                ParticleKind::Snow => assert_eq!(p.life, life),
                _ => assert!((p.life - life - 0.05).abs() < 1e-4),
            }
        }
    }

    #[test]
    fn test_auto_rotation_pauses_while_dragging() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 200, 200);

        scene.step(0.0, &mut canvas);
        let yaw = scene.camera().yaw();
        assert!(yaw > 0.0);

        scene.on_drag_start(10.0, 10.0);
        scene.step(16.0, &mut canvas);
        assert_eq!(scene.camera().yaw(), yaw);

        scene.on_drag_end();
        scene.step(32.0, &mut canvas);
        assert!(scene.camera().yaw() > yaw);
    }

    #[test]
    fn test_camera_survives_resize() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 200, 200);
        scene.on_zoom(-500.0);
        scene.on_drag_start(0.0, 0.0);
        scene.on_drag_move(0.0, 100.0);
        scene.on_drag_end();
        let camera = *scene.camera();

        scene.resize(&mut canvas, 300, 300);
        assert_eq!(*scene.camera(), camera);
        assert_eq!(scene.particles().generation(), 2);
        assert!(!scene.intro().has_started());
    }

    #[test]
    fn test_shutdown_stops_rendering() {
        let mut scene = small_scene();
        let mut canvas = PixelCanvas::new(0, 0);
        scene.resize(&mut canvas, 100, 100);
        scene.shutdown();
        assert_eq!(scene.step(0.0, &mut canvas), FrameOutcome::Skipped(SkipReason::Stopped));
        scene.resize(&mut canvas, 120, 120);
        assert!(scene.frame_loop().is_stopped());
    }
}
