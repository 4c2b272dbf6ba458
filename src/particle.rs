//! Particle records and the store that holds a generation of them.

use glam::{Vec2, Vec3};

/// Which placement rule produced a particle and how it is updated and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Dim blue-green point inside the tree cone.
    TreeBody,
    /// Blinking garland light or ornament.
    TreeLight,
    /// Falling snowflake, independent of the camera rotation.
    Snow,
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single point of the scene.
///
/// `target` and `start` are written once by the generator. Tree particles
/// have their `position` recomputed from them every frame; snow ignores both
/// and integrates `position` with `velocity` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Where the particle is drawn this frame.
    pub position: Vec3,
    /// Resting position in the formed tree.
    pub target: Vec3,
    /// Scattered position the intro animation starts from.
    pub start: Vec3,
    /// Per-frame drift (snow only).
    pub velocity: Vec2,
    /// Colour before per-frame blink/shimmer modulation.
    pub base_color: Rgb,
    /// Radius (circles) or side length (squares) before perspective scaling.
    pub size: f32,
    /// Oscillator phase. Only ever increases; particles never expire.
    pub life: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// A tree particle resting at `target`, starting the intro from `start`.
    pub fn tree(kind: ParticleKind, target: Vec3, start: Vec3, base_color: Rgb, size: f32, life: f32) -> Self {
        Self {
            position: target,
            target,
            start,
            velocity: Vec2::ZERO,
            base_color,
            size,
            life,
            kind,
        }
    }

    /// A snowflake at `position` drifting by `velocity` each frame.
    pub fn snow(position: Vec3, velocity: Vec2, size: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            start: Vec3::ZERO,
            velocity,
            base_color: Rgb::WHITE,
            size,
            life: 0.0,
            kind: ParticleKind::Snow,
        }
    }

    /// Distance from the tree's vertical axis at the resting position.
    #[inline]
    pub fn radial_distance(&self) -> f32 {
        Vec2::new(self.target.x, self.target.z).length()
    }
}

/// Per-kind particle counts of a generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub tree_body: usize,
    pub tree_light: usize,
    pub snow: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.tree_body + self.tree_light + self.snow
    }
}

/// All particles of one generation, in stable generation order.
///
/// A store is built in one go by the generator and replaced wholesale on
/// regeneration; nothing adds or removes particles in between.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    generation: u64,
}

impl ParticleStore {
    /// An empty store, as held before the first sizing.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_particles(particles: Vec<Particle>, generation: u64) -> Self {
        Self { particles, generation }
    }

    /// Monotonic id of the generation this store holds (0 = never generated).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Particles of one kind, in generation order.
    pub fn of_kind(&self, kind: ParticleKind) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.kind == kind)
    }

    pub fn counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for p in &self.particles {
            match p.kind {
                ParticleKind::TreeBody => counts.tree_body += 1,
                ParticleKind::TreeLight => counts.tree_light += 1,
                ParticleKind::Snow => counts.snow += 1,
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_particle_starts_at_target() {
        let p = Particle::tree(
            ParticleKind::TreeBody,
            Vec3::new(3.0, -4.0, 4.0),
            Vec3::new(100.0, 100.0, 100.0),
            Rgb::new(20, 100, 40),
            0.5,
            12.0,
        );
        assert_eq!(p.position, p.target);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert!((p.radial_distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_snow_has_no_shape_positions() {
        let p = Particle::snow(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.1, 1.0), 0.4);
        assert_eq!(p.kind, ParticleKind::Snow);
        assert_eq!(p.target, Vec3::ZERO);
        assert_eq!(p.start, Vec3::ZERO);
        assert_eq!(p.base_color, Rgb::WHITE);
    }

    #[test]
    fn test_counts() {
        let store = ParticleStore::from_particles(
            vec![
                Particle::snow(Vec3::ZERO, Vec2::ZERO, 1.0),
                Particle::tree(ParticleKind::TreeLight, Vec3::ZERO, Vec3::ZERO, Rgb::WHITE, 1.0, 0.0),
                Particle::tree(ParticleKind::TreeBody, Vec3::ZERO, Vec3::ZERO, Rgb::WHITE, 1.0, 0.0),
                Particle::tree(ParticleKind::TreeBody, Vec3::ZERO, Vec3::ZERO, Rgb::WHITE, 1.0, 0.0),
            ],
            1,
        );
        let counts = store.counts();
        assert_eq!(counts.tree_body, 2);
        assert_eq!(counts.tree_light, 1);
        assert_eq!(counts.snow, 1);
        assert_eq!(counts.total(), store.len());
        assert_eq!(store.of_kind(ParticleKind::TreeBody).count(), 2);
    }
}
