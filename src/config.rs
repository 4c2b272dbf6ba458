//! Scene configuration.
//!
//! Every tunable constant of the scene lives in [`SceneConfig`]. Defaults
//! reproduce the classic look; a TOML file can override any subset:
//!
//! ```toml
//! tree_count = 20000
//! snow_count = 3000
//! intro_duration_ms = 2500.0
//! seed = 7
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Population sizes, tree geometry, camera limits and timing for a scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Points in the tree-body cloud.
    pub tree_count: usize,
    /// Points in the double-helix garland.
    pub garland_count: usize,
    /// Ornaments near the tree surface.
    pub ornament_count: usize,
    /// Snowflakes.
    pub snow_count: usize,

    /// Tree height as a fraction of viewport height.
    pub tree_height_ratio: f32,
    /// Base width as a fraction of viewport width on wide viewports.
    pub base_width_ratio: f32,
    /// Base width as a fraction of viewport width below `mobile_breakpoint`.
    pub mobile_base_width_ratio: f32,
    /// Viewports narrower than this use the mobile ratio.
    pub mobile_breakpoint: f32,
    /// Full turns of the garland from apex to base.
    pub garland_loops: f32,
    /// Half-width of the band the garland progress is jittered within.
    pub garland_thickness: f32,

    /// Idle yaw advance per frame, in radians.
    pub rotation_speed: f32,
    /// Extra spin multiplier at the start of the intro (decays with the ease).
    pub intro_spin_boost: f32,
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Zoom change per unit of wheel delta.
    pub zoom_sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Perspective constant: `scale = fov / (fov + z)`.
    pub fov: f32,

    /// Length of the scatter-to-tree animation.
    pub intro_duration_ms: f64,
    /// Phase advance per frame driving blink and shimmer.
    pub blink_speed: f32,
    /// Distance past the viewport edge at which snow wraps around.
    pub snow_recycle_margin: f32,

    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_count: 45_000,
            garland_count: 5_000,
            ornament_count: 600,
            snow_count: 1_500,

            tree_height_ratio: 0.75,
            base_width_ratio: 0.45,
            mobile_base_width_ratio: 0.85,
            mobile_breakpoint: 768.0,
            garland_loops: 6.0,
            garland_thickness: 0.05,

            rotation_speed: 0.003,
            intro_spin_boost: 5.0,
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.001,
            pitch_limit: 1.0,
            zoom_min: 0.5,
            zoom_max: 3.0,
            fov: 800.0,

            intro_duration_ms: 4000.0,
            blink_speed: 0.05,
            snow_recycle_margin: 100.0,

            seed: None,
        }
    }
}

impl SceneConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Check that values are usable.
    ///
    /// Every float must be finite; comparisons are written so NaN fails them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tree_height_ratio", self.tree_height_ratio),
            ("base_width_ratio", self.base_width_ratio),
            ("mobile_base_width_ratio", self.mobile_base_width_ratio),
            ("mobile_breakpoint", self.mobile_breakpoint),
            ("garland_loops", self.garland_loops),
            ("garland_thickness", self.garland_thickness),
            ("rotation_speed", self.rotation_speed),
            ("intro_spin_boost", self.intro_spin_boost),
            ("drag_sensitivity", self.drag_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("pitch_limit", self.pitch_limit),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("fov", self.fov),
            ("blink_speed", self.blink_speed),
            ("snow_recycle_margin", self.snow_recycle_margin),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {}", value)));
            }
        }
        if !(self.fov > 0.0) {
            return Err(invalid("fov", format!("must be positive, got {}", self.fov)));
        }
        if !(self.intro_duration_ms > 0.0 && self.intro_duration_ms.is_finite()) {
            return Err(invalid(
                "intro_duration_ms",
                format!("must be positive, got {}", self.intro_duration_ms),
            ));
        }
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return Err(invalid(
                "zoom_min",
                format!("need 0 < zoom_min <= zoom_max, got {}..{}", self.zoom_min, self.zoom_max),
            ));
        }
        if !(self.pitch_limit >= 0.0) {
            return Err(invalid("pitch_limit", format!("must not be negative, got {}", self.pitch_limit)));
        }
        if !(0.0..=1.0).contains(&self.tree_height_ratio) {
            return Err(invalid(
                "tree_height_ratio",
                format!("must be within 0..=1, got {}", self.tree_height_ratio),
            ));
        }
        Ok(())
    }

    /// Total number of particles a generation produces.
    pub fn total_particles(&self) -> usize {
        self.tree_count + self.garland_count + self.ornament_count + self.snow_count
    }

    /// Set the tree-body particle count.
    pub fn with_tree_count(mut self, count: usize) -> Self {
        self.tree_count = count;
        self
    }

    /// Set the garland particle count.
    pub fn with_garland_count(mut self, count: usize) -> Self {
        self.garland_count = count;
        self
    }

    /// Set the ornament count.
    pub fn with_ornament_count(mut self, count: usize) -> Self {
        self.ornament_count = count;
        self
    }

    /// Set the snowflake count.
    pub fn with_snow_count(mut self, count: usize) -> Self {
        self.snow_count = count;
        self
    }

    /// Set the intro animation length in milliseconds.
    pub fn with_intro_duration_ms(mut self, duration: f64) -> Self {
        self.intro_duration_ms = duration;
        self
    }

    /// Seed the RNG for reproducible scenes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_total() {
        let config = SceneConfig::default();
        assert_eq!(config.total_particles(), 52_100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml_str("snow_count = 10\nseed = 3\n").unwrap();
        assert_eq!(config.snow_count, 10);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.tree_count, 45_000);
        assert_eq!(config.fov, 800.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SceneConfig::from_toml_str("tree_cuont = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let err = SceneConfig::from_toml_str("zoom_min = 4.0\nzoom_max = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom_min", .. }));
    }

    #[test]
    fn test_nan_limits_rejected() {
        let err = SceneConfig::from_toml_str("zoom_max = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom_max", .. }));

        let err = SceneConfig::from_toml_str("pitch_limit = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pitch_limit", .. }));
    }

    #[test]
    fn test_negative_pitch_limit_rejected() {
        let err = SceneConfig::from_toml_str("pitch_limit = -0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pitch_limit", .. }));
    }

    #[test]
    fn test_non_finite_motion_rejected() {
        for field in [
            "rotation_speed",
            "intro_spin_boost",
            "blink_speed",
            "drag_sensitivity",
            "zoom_sensitivity",
        ] {
            let err = SceneConfig::from_toml_str(&format!("{field} = inf")).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: f, .. } if f == field),
                "{field} accepted"
            );
        }
    }

    #[test]
    fn test_builder() {
        let config = SceneConfig::new()
            .with_tree_count(10)
            .with_garland_count(4)
            .with_ornament_count(2)
            .with_snow_count(1)
            .with_seed(9);
        assert_eq!(config.total_particles(), 17);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
