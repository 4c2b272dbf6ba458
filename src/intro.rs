//! Intro animation: particles fly in from scatter positions and settle into
//! the tree.

use glam::Vec3;

/// Progress of the intro at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroPhase {
    /// Linear progress, clamped to `[0, 1]`.
    pub progress: f32,
    /// Cubic ease-out of `progress`.
    pub ease: f32,
}

impl IntroPhase {
    pub const START: IntroPhase = IntroPhase { progress: 0.0, ease: 0.0 };
    pub const DONE: IntroPhase = IntroPhase { progress: 1.0, ease: 1.0 };

    /// Phase for a linear progress value (clamped).
    pub fn at(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            progress,
            ease: ease_out_cubic(progress),
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    /// Where a tree particle sits at this phase.
    ///
    /// Once the intro is done the target is returned untouched rather than
    /// lerped, so the formed tree is exact.
    #[inline]
    pub fn position(&self, start: Vec3, target: Vec3) -> Vec3 {
        if self.is_done() {
            target
        } else {
            start + (target - start) * self.ease
        }
    }
}

/// `1 - (1 - t)^3`: fast departure, gentle arrival.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// One-shot clock for the intro, started by the first frame after a
/// regeneration.
#[derive(Debug, Clone)]
pub struct IntroAnimator {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl IntroAnimator {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            started_at: None,
        }
    }

    /// Forget the start time; the next frame starts the intro over.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Phase at `now_ms`, starting the clock if this is the first frame.
    pub fn sample(&mut self, now_ms: f64) -> IntroPhase {
        let started = *self.started_at.get_or_insert(now_ms);
        let elapsed = (now_ms - started).max(0.0);
        IntroPhase::at((elapsed / self.duration_ms) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_ease_runs_ahead_of_progress() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(ease_out_cubic(t) > t);
        }
    }

    #[test]
    fn test_position_at_start_is_start() {
        let start = Vec3::new(-700.0, 300.0, 950.0);
        let target = Vec3::new(12.0, -40.0, 3.0);
        let pos = IntroPhase::START.position(start, target);
        assert!((pos - start).length() < 1e-4);
    }

    #[test]
    fn test_position_when_done_is_exact_target() {
        let start = Vec3::new(-700.1, 300.3, 950.7);
        let target = Vec3::new(12.345, -40.001, 3.3333);
        assert_eq!(IntroPhase::DONE.position(start, target), target);
        assert_eq!(IntroPhase::at(5.0).position(start, target), target);
    }

    #[test]
    fn test_clock_starts_on_first_sample() {
        let mut intro = IntroAnimator::new(4000.0);
        assert!(!intro.has_started());

        let phase = intro.sample(10_000.0);
        assert_eq!(phase.progress, 0.0);
        assert!(intro.has_started());

        let phase = intro.sample(12_000.0);
        assert!((phase.progress - 0.5).abs() < 1e-6);
        assert!((phase.ease - 0.875).abs() < 1e-6);

        assert!(intro.sample(14_000.0).is_done());
        assert!(intro.sample(99_000.0).is_done());
    }

    #[test]
    fn test_reset_restarts() {
        let mut intro = IntroAnimator::new(1000.0);
        intro.sample(0.0);
        assert!(intro.sample(2000.0).is_done());

        intro.reset();
        assert_eq!(intro.sample(5000.0).progress, 0.0);
    }

    #[test]
    fn test_clock_going_backwards_clamps() {
        let mut intro = IntroAnimator::new(1000.0);
        intro.sample(500.0);
        assert_eq!(intro.sample(100.0).progress, 0.0);
    }
}
