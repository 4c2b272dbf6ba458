//! Per-kind drawing rules and snow motion.
//!
//! Tree lights twinkle on a hard threshold, the tree body shimmers in its
//! green channel, and snow brightens as it comes closer. Small points are
//! drawn as squares and larger ones as circles; lights switch to circles
//! earlier than the body does.

use crate::particle::{Particle, ParticleKind, Rgb};
use crate::projection::{Projected, Viewport};
use crate::spawn::SpawnRng;
use crate::surface::{DrawSurface, Rgba};

/// Lights below this projected size are squares.
pub const LIGHT_CIRCLE_THRESHOLD: f32 = 1.2;
/// Body points below this projected size are squares.
pub const BODY_CIRCLE_THRESHOLD: f32 = 1.5;

const LIGHT_ALPHA_OFF: f32 = 0.1;
const LIGHT_ALPHA_ON: f32 = 0.6;
const LIGHT_BLINK_CUTOFF: f32 = 0.1;
const BODY_ALPHA: f32 = 0.4;

/// Horizontal spread of recycled snow, as a fraction of the viewport width.
const SNOW_RESPAWN_SPREAD: f32 = 1.0 / 1.5;

/// Alpha of a tree light: mostly on, briefly dim once per blink cycle.
#[inline]
pub fn light_alpha(life: f32, ix: f32) -> f32 {
    let blink = (life * 2.0 + ix).sin() * 0.5 + 0.5;
    if blink < LIGHT_BLINK_CUTOFF {
        LIGHT_ALPHA_OFF
    } else {
        LIGHT_ALPHA_ON
    }
}

/// Green-channel multiplier for a body point, in `[0.6, 1.0]`.
#[inline]
pub fn body_shimmer(life: f32, iy: f32) -> f32 {
    (life + iy).sin() * 0.2 + 0.8
}

/// Snowflake alpha; closer (larger scale) flakes are more opaque.
#[inline]
pub fn snow_alpha(scale: f32) -> f32 {
    (0.4 + scale * 0.4).min(1.0)
}

/// Display colour of a tree particle for its current `life`.
pub fn tree_color(particle: &Particle) -> Rgba {
    let Rgb { r, g, b } = particle.base_color;
    let (r, g, b) = (r as f32, g as f32, b as f32);
    match particle.kind {
        ParticleKind::TreeLight => Rgba::from_rgb8(r, g, b, light_alpha(particle.life, particle.target.x)),
        ParticleKind::TreeBody => {
            let shimmer = body_shimmer(particle.life, particle.target.y);
            Rgba::from_rgb8(r, g * shimmer, b, BODY_ALPHA)
        }
        ParticleKind::Snow => Rgba::from_rgb8(r, g, b, 1.0),
    }
}

/// Draw a projected tree particle.
pub fn draw_tree_particle<S: DrawSurface + ?Sized>(surface: &mut S, particle: &Particle, at: Projected) {
    let threshold = match particle.kind {
        ParticleKind::TreeLight => LIGHT_CIRCLE_THRESHOLD,
        ParticleKind::TreeBody => BODY_CIRCLE_THRESHOLD,
        ParticleKind::Snow => return,
    };
    let size = particle.size * at.scale;
    let color = tree_color(particle);
    if size < threshold {
        surface.fill_rect(at.screen.x, at.screen.y, size, size, color);
    } else {
        surface.fill_circle(at.screen.x, at.screen.y, size, color);
    }
}

/// Draw a projected snowflake as a translucent white circle.
pub fn draw_snow<S: DrawSurface + ?Sized>(surface: &mut S, particle: &Particle, at: Projected) {
    let Rgb { r, g, b } = particle.base_color;
    let color = Rgba::from_rgb8(r as f32, g as f32, b as f32, snow_alpha(at.scale));
    surface.fill_circle(at.screen.x, at.screen.y, particle.size * at.scale, color);
}

/// Move a snowflake one frame and recycle it above the top edge once it
/// has fallen `margin` pixels past the bottom.
///
/// Returns whether the flake was recycled.
pub fn advance_snow(particle: &mut Particle, viewport: Viewport, margin: f32, rng: &mut SpawnRng) -> bool {
    particle.position.x += particle.velocity.x;
    particle.position.y += particle.velocity.y;

    if particle.position.y > viewport.height / 2.0 + margin {
        let spread = viewport.width * SNOW_RESPAWN_SPREAD;
        particle.position.y = -viewport.height / 2.0 - margin;
        particle.position.x = rng.random_range(-spread, spread);
        true
    } else {
        false
    }
}
