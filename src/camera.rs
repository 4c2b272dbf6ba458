//! Camera for the tree view: two rotation angles and a zoom factor.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::config::SceneConfig;

/// Orbit-style camera state.
///
/// `rotation.x` is pitch (tilt toward/away from the viewer) and is clamped
/// so the view never flips past vertical. `rotation.y` is yaw and is kept
/// in `[0, TAU)`; only its sine and cosine are ever used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Pitch (x) and yaw (y) in radians.
    pub rotation: Vec2,
    /// Projection scale multiplier.
    pub zoom: f32,
    pitch_limit: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl Camera {
    /// Level camera at zoom 1 with the limits from `config`.
    ///
    /// Limits that would make clamping ill-defined (NaN, a negative pitch
    /// limit, an empty zoom range) fall back to the defaults.
    pub fn new(config: &SceneConfig) -> Self {
        let defaults = SceneConfig::default();

        let pitch_limit = if config.pitch_limit >= 0.0 && config.pitch_limit.is_finite() {
            config.pitch_limit
        } else {
            log::warn!("Unusable pitch_limit {}, using {}", config.pitch_limit, defaults.pitch_limit);
            defaults.pitch_limit
        };

        let zoom_usable = config.zoom_min > 0.0
            && config.zoom_min <= config.zoom_max
            && config.zoom_max.is_finite();
        let (zoom_min, zoom_max) = if zoom_usable {
            (config.zoom_min, config.zoom_max)
        } else {
            log::warn!(
                "Unusable zoom range {}..{}, using {}..{}",
                config.zoom_min,
                config.zoom_max,
                defaults.zoom_min,
                defaults.zoom_max
            );
            (defaults.zoom_min, defaults.zoom_max)
        };

        Self {
            rotation: Vec2::ZERO,
            zoom: 1.0_f32.clamp(zoom_min, zoom_max),
            pitch_limit,
            zoom_min,
            zoom_max,
        }
    }

    /// Turn by `yaw` and tilt by `pitch` radians; pitch is clamped.
    ///
    /// A non-finite component is ignored on its own axis.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() {
            self.turn(yaw);
        }
        if pitch.is_finite() {
            self.rotation.x = (self.rotation.x + pitch).clamp(-self.pitch_limit, self.pitch_limit);
        }
    }

    /// Change zoom by `delta`, clamped to the configured range.
    pub fn zoom_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.zoom = (self.zoom + delta).clamp(self.zoom_min, self.zoom_max);
    }

    /// Idle spin for one frame.
    ///
    /// The spin starts at `1 + boost` times `speed` while the intro is
    /// fresh (`ease = 0`) and settles to `speed` once it completes.
    pub fn auto_rotate(&mut self, speed: f32, boost: f32, ease: f32) {
        let step = speed * (1.0 + (1.0 - ease) * boost);
        if step.is_finite() {
            self.turn(step);
        }
    }

    fn turn(&mut self, yaw: f32) {
        self.rotation.y = (self.rotation.y + yaw).rem_euclid(TAU);
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
