//! Frame clock for the windowed driver.
//!
//! ```ignore
//! let mut time = Time::new();
//!
//! // Once per frame:
//! time.update();
//! scene.step(time.elapsed_ms(), &mut canvas);
//! if time.fps_updated() {
//!     window.set_title(&format!("tannenbaum - {:.0} fps", time.fps()));
//! }
//! ```

use std::time::{Duration, Instant};

/// Elapsed time, frame delta, frame count and a periodically refreshed FPS.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created or last reset.
    start: Instant,
    /// When the previous frame was recorded.
    last_frame: Instant,
    /// Milliseconds from `start` to the last update.
    elapsed_ms: f64,
    /// Seconds between the last two updates.
    delta_secs: f32,
    /// Updates since `start`.
    frame_count: u64,
    /// Frames per second over the last measurement window.
    fps: f32,
    /// `frame_count` when the FPS was last measured.
    fps_frame_count: u64,
    /// When the FPS was last measured.
    fps_update_time: Instant,
    /// How often the FPS is refreshed.
    fps_update_interval: Duration,
    /// Whether the last update refreshed `fps`.
    fps_updated: bool,
}

impl Time {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_ms: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fps_updated: false,
        }
    }

    /// Advance to now. Call once per frame.
    pub fn update(&mut self) {
        self.advance_to(Instant::now());
    }

    fn advance_to(&mut self, now: Instant) {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_ms = now.saturating_duration_since(self.start).as_secs_f64() * 1000.0;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        self.fps_updated = fps_elapsed >= self.fps_update_interval;
        if self.fps_updated {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            log::debug!("{:.1} fps", self.fps);
        }
    }

    /// Milliseconds since creation or the last [`reset`](Self::reset), as of
    /// the last update.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Seconds between the last two updates.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Number of updates so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every 500 ms.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the last update refreshed [`fps`](Self::fps).
    #[inline]
    pub fn fps_updated(&self) -> bool {
        self.fps_updated
    }

    /// Restart the clock from now.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed_ms(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_advance() {
        let mut time = Time::new();
        let start = time.start;
        time.advance_to(start + Duration::from_millis(20));
        assert_eq!(time.frame(), 1);
        assert!((time.elapsed_ms() - 20.0).abs() < 1e-6);
        assert!((time.delta() - 0.02).abs() < 1e-6);
        assert!(!time.fps_updated());
    }

    #[test]
    fn test_fps_refresh() {
        let mut time = Time::new();
        let start = time.start;
        for i in 1..=30 {
            time.advance_to(start + Duration::from_millis(20 * i));
        }
        // The 25th frame crossed 500 ms.
        assert!((time.fps() - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_reset() {
        let mut time = Time::new();
        let start = time.start;
        time.advance_to(start + Duration::from_millis(100));
        time.reset();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed_ms(), 0.0);
    }
}
