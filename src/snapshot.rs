//! Headless rendering on a synthetic clock.
//!
//! Runs the scene into a [`PixelCanvas`] without a window or GPU, stepping a
//! fixed number of frames at a fixed frame interval. Useful for previews,
//! tests and benchmarks.

use crate::canvas::PixelCanvas;
use crate::config::SceneConfig;
use crate::error::SnapshotError;
use crate::scene::Scene;

/// Nominal 60 Hz frame interval.
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

/// Render `frames` frames of a fresh scene at `width × height` and return
/// the canvas holding the last one.
///
/// Frame `i` is stepped at `i × frame_ms`, so with the default intro
/// duration 240 frames at 60 Hz land on the fully formed tree.
pub fn render_snapshot(
    config: SceneConfig,
    width: u32,
    height: u32,
    frames: u32,
    frame_ms: f64,
) -> Result<PixelCanvas, SnapshotError> {
    if width == 0 || height == 0 {
        return Err(SnapshotError::ZeroSize { width, height });
    }
    config.validate()?;

    let mut canvas = PixelCanvas::new(0, 0);
    let mut scene = Scene::new(config);
    scene.resize(&mut canvas, width, height);

    for frame in 0..frames.max(1) {
        scene.step(frame as f64 * frame_ms, &mut canvas);
    }
    scene.shutdown();

    log::debug!("Rendered {} headless frames at {}x{}", frames.max(1), width, height);
    Ok(canvas)
}
