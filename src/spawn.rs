//! Random helpers for particle placement.
//!
//! Wraps a small fast RNG with the handful of sampling patterns the tree
//! needs (uniform ranges, uniform-area disk offsets, boxes).

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random source shared by generation and the snow recycler.
///
/// Seed it with [`SpawnRng::seeded`] for reproducible scenes; otherwise it
/// is seeded from the clock so every run looks different.
#[derive(Debug, Clone)]
pub struct SpawnRng {
    rng: SmallRng,
}

impl SpawnRng {
    /// RNG seeded from the current time.
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Deterministic RNG.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Use `seed` when given, the clock otherwise.
    pub fn from_seed_or_clock(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_clock, Self::seeded)
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// An empty, inverted or unbounded range yields `min` instead of
    /// panicking, so a zero-sized viewport still generates.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max && (max - min).is_finite() {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    // ========== Position helpers ==========

    /// Random offset inside a disk in the XZ plane, as `(x, z)`.
    ///
    /// The square root on the radial draw keeps areal density uniform
    /// instead of clustering at the centre.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec2 {
        let angle = self.random_angle();
        let r = self.random().sqrt() * radius;
        Vec2::new(r * angle.cos(), r * angle.sin())
    }

    /// Random offset on the annulus `[inner, outer] × radius`, as `(x, z)`.
    pub fn random_in_shell(&mut self, radius: f32, inner: f32, outer: f32) -> Vec2 {
        let angle = self.random_angle();
        let r = radius * self.random_range(inner, outer);
        Vec2::new(r * angle.cos(), r * angle.sin())
    }

    /// Random point inside the axis-aligned box `[-half, half)`.
    pub fn random_in_box(&mut self, half: Vec3) -> Vec3 {
        Vec3::new(
            self.random_range(-half.x, half.x),
            self.random_range(-half.y, half.y),
            self.random_range(-half.z, half.z),
        )
    }
}
