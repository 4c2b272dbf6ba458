//! # tannenbaum - particle Christmas tree
//!
//! Tens of thousands of points form a rotating cone-shaped tree with a
//! double-helix garland, ornaments near its surface, and snow drifting in
//! front of it. Particles fly in from a random scatter when the scene is
//! generated, the tree spins on its own, and dragging or scrolling takes
//! over the camera.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tannenbaum::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_config(SceneConfig::default().with_snow_count(3000))
//!         .with_seed(2024)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Scene
//!
//! [`Scene`] owns one generation of particles together with the camera,
//! input state and intro clock. Drive it with [`Scene::resize`] whenever the
//! drawing surface changes size and [`Scene::step`] once per frame:
//!
//! ```ignore
//! let mut canvas = PixelCanvas::new(0, 0);
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.resize(&mut canvas, 1024, 768);
//! for frame in 0..240 {
//!     scene.step(frame as f64 * 16.7, &mut canvas);
//! }
//! canvas.save_png("tree.png")?;
//! ```
//!
//! Every resize throws the old particles away and generates a fresh tree for
//! the new size. Camera rotation and zoom carry over.
//!
//! ### Particles
//!
//! Each [`Particle`] is one of three [`ParticleKind`]s:
//! - `TreeBody` - dim green points filling the cone, shimmering slowly
//! - `TreeLight` - garland lights and ornaments, blinking on and off
//! - `Snow` - flakes falling in screen space, unaffected by the camera
//!
//! ### Drawing surfaces
//!
//! The scene draws through the [`DrawSurface`] trait: background fill,
//! rectangles, circles and a normal/additive blend switch. [`PixelCanvas`]
//! implements it on the CPU; the windowed runner uploads that canvas to the
//! GPU each frame.
//!
//! ## Configuration
//!
//! All constants live in [`SceneConfig`], which can be built in code or read
//! from TOML with [`SceneConfig::load`].

pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod generator;
mod gpu;
pub mod input;
pub mod intro;
pub mod particle;
pub mod projection;
pub mod renderer;
pub mod scene;
mod simulation;
pub mod snapshot;
pub mod spawn;
pub mod surface;
pub mod time;

pub use camera::Camera;
pub use canvas::PixelCanvas;
pub use config::SceneConfig;
pub use error::{ConfigError, GpuError, SimulationError, SnapshotError};
pub use frame_loop::{FrameLoop, LoopState};
pub use glam::{Vec2, Vec3};
pub use input::{InputController, PointerEvent};
pub use intro::{IntroAnimator, IntroPhase};
pub use particle::{KindCounts, Particle, ParticleKind, ParticleStore, Rgb};
pub use projection::{Projected, ViewTransform, Viewport};
pub use scene::{FrameOutcome, FrameStats, Scene, SkipReason};
pub use simulation::Simulation;
pub use spawn::SpawnRng;
pub use surface::{BlendMode, DrawSurface, Rgba};
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tannenbaum::prelude::*;
/// ```
///
/// This imports:
/// - [`Simulation`] - the windowed runner
/// - [`Scene`] - the scene context, for custom drivers
/// - [`SceneConfig`] - scene settings
/// - [`PixelCanvas`] and [`DrawSurface`] - drawing targets
/// - [`Vec2`], [`Vec3`] - glam vector types
pub mod prelude {
    pub use crate::canvas::PixelCanvas;
    pub use crate::config::SceneConfig;
    pub use crate::error::{SimulationError, SnapshotError};
    pub use crate::scene::{FrameOutcome, Scene};
    pub use crate::simulation::Simulation;
    pub use crate::surface::{BlendMode, DrawSurface};
    pub use glam::{Vec2, Vec3};
}
