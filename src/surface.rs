//! The 2D drawing surface the scene renders into.
//!
//! Anything that can fill a background, rectangles, and circles, and switch
//! between normal and additive compositing can host the scene. The crate
//! ships [`PixelCanvas`](crate::canvas::PixelCanvas), a CPU RGBA buffer.

/// How drawn colour combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over alpha blending (default).
    #[default]
    Alpha,

    /// Additive blending.
    ///
    /// Colour times alpha is added to the destination, so overlapping
    /// particles brighten instead of covering each other.
    Additive,
}

/// A colour with straight (non-premultiplied) alpha, channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From 0–255 channel values (which may be fractional after modulation).
    pub fn from_rgb8(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a)
    }
}

/// A 2D render target.
///
/// Coordinates are pixels with the origin at the top-left corner.
pub trait DrawSurface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Change the backing size. Contents after a resize are unspecified.
    fn resize(&mut self, width: u32, height: u32);

    fn blend_mode(&self) -> BlendMode;

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Cover the whole surface with `color`, respecting the blend mode.
    fn fill_background(&mut self, color: Rgba);

    /// Fill the axis-aligned rectangle with its top-left at `(x, y)`.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// Fill a circle centred at `(cx, cy)`.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    /// Whether the surface has any pixels to draw into.
    fn is_drawable(&self) -> bool {
        let (w, h) = self.size();
        w > 0 && h > 0
    }
}
