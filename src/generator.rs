//! Scene generation: the tree cone, its garland, ornaments, and snow.
//!
//! All populations share one cone: height `H × tree_height_ratio`, apex at
//! the top (`progress = 0`, radius 0) widening linearly to the base
//! (`progress = 1`, radius `base_width / 2`). Screen y grows downward, so
//! the apex sits at `y = -tree_height / 2`.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::config::SceneConfig;
use crate::particle::{Particle, ParticleKind, Rgb};
use crate::projection::Viewport;
use crate::spawn::SpawnRng;

const TREE_BODY_RED: u8 = 20;
const TREE_BODY_BLUE: u8 = 40;
const GOLD: Rgb = Rgb::new(255, 215, 0);
const PALE_GOLD: Rgb = Rgb::new(255, 250, 180);

/// Ornament palette, picked by one uniform draw with cutoffs every 0.2.
const ORNAMENT_PALETTE: [Rgb; 5] = [
    Rgb::new(180, 40, 40),   // red
    Rgb::new(40, 80, 180),   // blue
    Rgb::new(180, 70, 180),  // purple
    Rgb::new(180, 115, 0),   // amber
    Rgb::new(150, 150, 150), // silver
];

const GARLAND_RADIUS_JITTER: f32 = 0.05;
const GARLAND_ANGLE_JITTER: f32 = 0.15;
const ORNAMENT_SHELL_INNER: f32 = 0.65;
const ORNAMENT_SHELL_OUTER: f32 = 1.0;
const SCATTER_SPREAD: f32 = 1.5;
const SCATTER_DEPTH: f32 = 1000.0;
const SNOW_DEPTH: f32 = 500.0;
const MAX_INITIAL_LIFE: f32 = 100.0;

/// Cone dimensions derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    pub height: f32,
    pub base_width: f32,
    /// Whether the narrow-viewport base ratio was used.
    pub mobile: bool,
}

impl TreeShape {
    pub fn new(viewport: Viewport, config: &SceneConfig) -> Self {
        let mobile = viewport.width < config.mobile_breakpoint;
        let ratio = if mobile {
            config.mobile_base_width_ratio
        } else {
            config.base_width_ratio
        };
        Self {
            height: viewport.height * config.tree_height_ratio,
            base_width: viewport.width * ratio,
            mobile,
        }
    }

    /// Normalised height: 0 at the apex, 1 at the base.
    #[inline]
    pub fn progress(&self, y: f32) -> f32 {
        if self.height > 0.0 {
            (y + self.height / 2.0) / self.height
        } else {
            0.0
        }
    }

    /// Inverse of [`progress`](Self::progress).
    #[inline]
    pub fn height_at(&self, progress: f32) -> f32 {
        -self.height / 2.0 + self.height * progress
    }

    /// Cross-section radius at a given progress.
    #[inline]
    pub fn radius(&self, progress: f32) -> f32 {
        progress * (self.base_width / 2.0)
    }

    fn random_height(&self, rng: &mut SpawnRng) -> f32 {
        rng.random_range(-self.height / 2.0, self.height / 2.0)
    }
}

/// Build a full population for the viewport: tree body, garland, ornaments,
/// then snow, in that order.
pub fn generate(viewport: Viewport, config: &SceneConfig, rng: &mut SpawnRng) -> Vec<Particle> {
    let shape = TreeShape::new(viewport, config);
    let mut particles = Vec::with_capacity(config.total_particles());

    for _ in 0..config.tree_count {
        particles.push(tree_body(&shape, viewport, rng));
    }
    for i in 0..config.garland_count {
        particles.push(garland_light(&shape, viewport, config, i, rng));
    }
    for _ in 0..config.ornament_count {
        particles.push(ornament(&shape, viewport, rng));
    }
    for _ in 0..config.snow_count {
        particles.push(snowflake(viewport, rng));
    }

    particles
}

fn tree_body(shape: &TreeShape, viewport: Viewport, rng: &mut SpawnRng) -> Particle {
    let y = shape.random_height(rng);
    let radius = shape.radius(shape.progress(y));
    let offset = rng.random_in_disk(radius);
    let green = rng.random_range(80.0, 220.0).floor() as u8;
    let size = rng.random_range(0.2, 1.1);

    tree_particle(
        ParticleKind::TreeBody,
        Vec3::new(offset.x, y, offset.y),
        Rgb::new(TREE_BODY_RED, green, TREE_BODY_BLUE),
        size,
        viewport,
        rng,
    )
}

fn garland_light(
    shape: &TreeShape,
    viewport: Viewport,
    config: &SceneConfig,
    index: usize,
    rng: &mut SpawnRng,
) -> Particle {
    let t = index as f32 / config.garland_count as f32;
    let thickness = config.garland_thickness;
    let progress = (t + rng.random_range(-thickness, thickness)).clamp(0.0, 1.0);
    let y = shape.height_at(progress);

    let mut angle = progress * TAU * config.garland_loops;
    // Every other light belongs to the second strand, half a turn ahead.
    if index % 2 == 0 {
        angle += PI;
    }
    let r = shape.radius(progress)
        * rng.random_range(1.0 - GARLAND_RADIUS_JITTER, 1.0 + GARLAND_RADIUS_JITTER);
    angle += rng.random_range(-GARLAND_ANGLE_JITTER, GARLAND_ANGLE_JITTER);

    let color = if rng.random() < 0.5 { PALE_GOLD } else { GOLD };
    let size = rng.random_range(0.4, 0.9);

    tree_particle(
        ParticleKind::TreeLight,
        Vec3::new(r * angle.cos(), y, r * angle.sin()),
        color,
        size,
        viewport,
        rng,
    )
}

fn ornament(shape: &TreeShape, viewport: Viewport, rng: &mut SpawnRng) -> Particle {
    let y = shape.random_height(rng);
    let radius = shape.radius(shape.progress(y));
    let offset = rng.random_in_shell(radius, ORNAMENT_SHELL_INNER, ORNAMENT_SHELL_OUTER);
    let color = ornament_color(rng.random());
    let size = rng.random_range(0.6, 1.0);

    tree_particle(
        ParticleKind::TreeLight,
        Vec3::new(offset.x, y, offset.y),
        color,
        size,
        viewport,
        rng,
    )
}

/// Palette bucket for a uniform draw in `[0, 1)`.
pub fn ornament_color(draw: f32) -> Rgb {
    let bucket = if draw < 0.2 {
        0
    } else if draw < 0.4 {
        1
    } else if draw < 0.6 {
        2
    } else if draw < 0.8 {
        3
    } else {
        4
    };
    ORNAMENT_PALETTE[bucket]
}

fn snowflake(viewport: Viewport, rng: &mut SpawnRng) -> Particle {
    let position = Vec3::new(
        rng.random_range(-viewport.width, viewport.width),
        rng.random_range(-viewport.height, viewport.height),
        rng.random_range(-SNOW_DEPTH, SNOW_DEPTH),
    );
    let velocity = Vec2::new(rng.random_range(-0.2, 0.2), rng.random_range(0.5, 1.5));
    let size = rng.random_range(0.2, 0.8);
    Particle::snow(position, velocity, size)
}

/// Common tail of every tree particle: scatter start and blink phase.
fn tree_particle(
    kind: ParticleKind,
    target: Vec3,
    color: Rgb,
    size: f32,
    viewport: Viewport,
    rng: &mut SpawnRng,
) -> Particle {
    let start = rng.random_in_box(Vec3::new(
        viewport.width * SCATTER_SPREAD,
        viewport.height * SCATTER_SPREAD,
        SCATTER_DEPTH,
    ));
    let life = rng.random_range(0.0, MAX_INITIAL_LIFE);
    Particle::tree(kind, target, start, color, size, life)
}
