//! Rotation and perspective projection from scene space to screen pixels.
//!
//! Scene space is centred on the viewport, x to the right, y down, z away
//! from the viewer. A point is turned around the vertical axis (yaw) first,
//! then tilted around the horizontal axis (pitch), then scaled by
//! `fov / (fov + z) × zoom` and offset to the viewport centre.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Whether anything can be drawn into this viewport.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A point mapped to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in pixels.
    pub screen: Vec2,
    /// Perspective scale including zoom; multiplies particle size.
    pub scale: f32,
}

/// Per-frame projection state: camera trig is evaluated once, not per point.
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    cos_yaw: f32,
    sin_yaw: f32,
    cos_pitch: f32,
    sin_pitch: f32,
    zoom: f32,
    fov: f32,
    center: Vec2,
}

impl ViewTransform {
    pub fn new(camera: &Camera, viewport: Viewport, fov: f32) -> Self {
        let (sin_yaw, cos_yaw) = camera.yaw().sin_cos();
        let (sin_pitch, cos_pitch) = camera.pitch().sin_cos();
        Self {
            cos_yaw,
            sin_yaw,
            cos_pitch,
            sin_pitch,
            zoom: camera.zoom,
            fov,
            center: viewport.center(),
        }
    }

    /// Yaw, then pitch. The order is fixed; swapping it tilts the tree's
    /// axis instead of the camera.
    #[inline]
    pub fn rotate(&self, p: Vec3) -> Vec3 {
        let x1 = p.x * self.cos_yaw - p.z * self.sin_yaw;
        let z1 = p.x * self.sin_yaw + p.z * self.cos_yaw;
        let y1 = p.y;

        let y2 = y1 * self.cos_pitch - z1 * self.sin_pitch;
        let z2 = y1 * self.sin_pitch + z1 * self.cos_pitch;
        Vec3::new(x1, y2, z2)
    }

    /// Perspective scale for a depth, or `None` when the point is at or
    /// behind the projection singularity.
    #[inline]
    pub fn scale_at(&self, z: f32) -> Option<f32> {
        let scale = (self.fov / (self.fov + z)) * self.zoom;
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }

    /// Rotate and project a tree point.
    #[inline]
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        self.project_flat(self.rotate(p))
    }

    /// Project without rotation; snow falls in screen space.
    #[inline]
    pub fn project_flat(&self, p: Vec3) -> Option<Projected> {
        let scale = self.scale_at(p.z)?;
        Some(Projected {
            screen: Vec2::new(p.x, p.y) * scale + self.center,
            scale,
        })
    }
}
