//! CPU RGBA8 canvas implementing [`DrawSurface`].
//!
//! Shapes are anti-aliased by area coverage: a rectangle covering a quarter
//! of a pixel contributes a quarter of its alpha there. Circles use a one
//! pixel soft edge; circles smaller than a pixel are drawn as a square of
//! equal area so tiny points keep the right brightness.

use std::path::Path;

use image::RgbaImage;

use crate::error::SnapshotError;
use crate::surface::{BlendMode, DrawSurface, Rgba};

/// Circles below this radius are drawn as equal-area squares.
const SUBPIXEL_RADIUS: f32 = 0.5;

/// An in-memory RGBA image that the scene can render into.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    blend: BlendMode,
}

impl PixelCanvas {
    /// A transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            blend: BlendMode::Alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Raw RGBA8 rows, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Sum of the RGB channels over the whole canvas; handy for checking
    /// that something was drawn.
    pub fn total_brightness(&self) -> u64 {
        self.pixels
            .iter()
            .map(|p| p[0] as u64 + p[1] as u64 + p[2] as u64)
            .sum()
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_image(&self) -> Result<RgbaImage, SnapshotError> {
        RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec()).ok_or(
            SnapshotError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        self.to_image()?.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Wrote {}x{} snapshot to {}", self.width, self.height, path.display());
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Composite `color` at `alpha × coverage` onto one pixel.
    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let dst = self.pixels[idx];
        let src = [color.r, color.g, color.b];
        let mut out = [0u8; 4];

        match self.blend {
            BlendMode::Alpha => {
                for c in 0..3 {
                    let d = dst[c] as f32 / 255.0;
                    out[c] = to_u8(src[c] * alpha + d * (1.0 - alpha));
                }
                let da = dst[3] as f32 / 255.0;
                out[3] = to_u8(alpha + da * (1.0 - alpha));
            }
            BlendMode::Additive => {
                for c in 0..3 {
                    let d = dst[c] as f32 / 255.0;
                    out[c] = to_u8(d + src[c] * alpha);
                }
                let da = dst[3] as f32 / 255.0;
                out[3] = to_u8(da + alpha);
            }
        }

        self.pixels[idx] = out;
    }

    /// Clip a span `[start, end)` to `[0, limit)` and yield each touched
    /// pixel with how much of it the span covers.
    fn covered_span(start: f32, end: f32, limit: u32) -> impl Iterator<Item = (u32, f32)> {
        let lo = start.max(0.0);
        let hi = end.min(limit as f32);
        let (first, last) = if hi > lo {
            (lo.floor() as u32, hi.ceil() as u32)
        } else {
            (0, 0)
        };
        (first..last).filter_map(move |px| {
            let cell = px as f32;
            let cover = hi.min(cell + 1.0) - lo.max(cell);
            (cover > 0.0).then_some((px, cover))
        })
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn fill_background(&mut self, color: Rgba) {
        if self.blend == BlendMode::Alpha && color.a >= 1.0 {
            self.pixels.fill([to_u8(color.r), to_u8(color.g), to_u8(color.b), 255]);
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        if !(width > 0.0 && height > 0.0 && color.a > 0.0) {
            return;
        }
        for (px, cover_x) in Self::covered_span(x, x + width, self.width) {
            for (py, cover_y) in Self::covered_span(y, y + height, self.height) {
                self.blend_pixel(px, py, color, cover_x * cover_y);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if !(radius > 0.0 && color.a > 0.0) {
            return;
        }
        if radius < SUBPIXEL_RADIUS {
            let side = radius * std::f32::consts::PI.sqrt();
            self.fill_rect(cx - side / 2.0, cy - side / 2.0, side, side, color);
            return;
        }

        let reach = radius + 0.5;
        for (py, _) in Self::covered_span(cy - reach, cy + reach, self.height) {
            let dy = py as f32 + 0.5 - cy;
            for (px, _) in Self::covered_span(cx - reach, cx + reach, self.width) {
                let dx = px as f32 + 0.5 - cx;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(px, py, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(canvas.total_brightness(), 0);
        assert_eq!(canvas.pixel(3, 2), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_background_fill() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_background(Rgba::BLACK);
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_full_pixel_rect() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_background(Rgba::BLACK);
        canvas.fill_rect(1.0, 1.0, 2.0, 1.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(canvas.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(2, 1), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(3, 1), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_partial_coverage() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_background(Rgba::BLACK);
        canvas.fill_rect(0.0, 0.0, 0.5, 0.5, Rgba::new(1.0, 1.0, 1.0, 1.0));
        // A quarter of the pixel is covered.
        assert_eq!(canvas.pixel(0, 0), Some([64, 64, 64, 255]));
    }

    #[test]
    fn test_fractional_rect_weights_each_cell() {
        let mut canvas = PixelCanvas::new(3, 3);
        canvas.fill_background(Rgba::BLACK);
        canvas.fill_rect(0.5, 0.5, 2.0, 1.5, Rgba::new(1.0, 1.0, 1.0, 1.0));
        // Corner cells are a quarter covered, edges half, the inside cell fully.
        assert_eq!(canvas.pixel(0, 0).map(|p| p[0]), Some(64));
        assert_eq!(canvas.pixel(1, 0).map(|p| p[0]), Some(128));
        assert_eq!(canvas.pixel(2, 0).map(|p| p[0]), Some(64));
        assert_eq!(canvas.pixel(0, 1).map(|p| p[0]), Some(128));
        assert_eq!(canvas.pixel(1, 1).map(|p| p[0]), Some(255));
        assert_eq!(canvas.pixel(2, 1).map(|p| p[0]), Some(128));
        assert_eq!(canvas.pixel(1, 2).map(|p| p[0]), Some(0));
    }

    #[test]
    fn test_additive_accumulates() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_background(Rgba::BLACK);
        canvas.set_blend_mode(BlendMode::Additive);
        let dim = Rgba::new(1.0, 0.0, 0.0, 0.4);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, dim);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, dim);
        assert_eq!(canvas.pixel(0, 0).map(|p| p[0]), Some(204));

        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, dim);
        assert_eq!(canvas.pixel(0, 0).map(|p| p[0]), Some(255));
    }

    #[test]
    fn test_alpha_does_not_accumulate_past_source() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_background(Rgba::BLACK);
        let half = Rgba::new(1.0, 0.0, 0.0, 0.5);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, half);
        assert_eq!(canvas.pixel(0, 0).map(|p| p[0]), Some(128));
        for _ in 0..20 {
            canvas.fill_rect(0.0, 0.0, 1.0, 1.0, half);
        }
        let red = canvas.pixel(0, 0).map(|p| p[0]).unwrap();
        assert!(red >= 253);

        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, Rgba::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(canvas.pixel(0, 0).map(|p| p[1]), Some(128));
    }

    #[test]
    fn test_circle_center_and_outside() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_background(Rgba::BLACK);
        canvas.fill_circle(10.0, 10.0, 4.0, Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(canvas.pixel(10, 10), Some([0, 255, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 16), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(-50.0, -50.0, 10.0, 10.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        canvas.fill_circle(100.0, 2.0, 3.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        canvas.fill_rect(3.5, 3.5, 10.0, 10.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert!(canvas.pixel(3, 3).map(|p| p[0] > 0).unwrap_or(false));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.resize(5, 7);
        assert_eq!(canvas.size(), (5, 7));
        assert_eq!(canvas.as_bytes().len(), 5 * 7 * 4);
        canvas.resize(0, 0);
        assert!(!canvas.is_drawable());
    }

    #[test]
    fn test_to_image() {
        let mut canvas = PixelCanvas::new(3, 2);
        canvas.fill_background(Rgba::new(1.0, 0.0, 0.0, 1.0));
        let img = canvas.to_image().unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }
}
