//! Pointer input: drag to rotate, wheel to zoom, touch mirrors mouse.
//!
//! Raw winit events are first reduced to [`PointerEvent`]s, which the
//! [`InputController`] turns into camera changes. Everything else (keys,
//! focus, IME) is ignored here.
//!
//! winit reports physical pixels; positions and pixel wheel deltas are
//! divided by the window scale factor so drags and zoom feel the same on
//! high-DPI displays.
//!
//! ```ignore
//! let mut input = InputController::new(&config);
//! input.on_drag_start(100.0, 100.0);
//! input.on_drag_move(&mut camera, 140.0, 90.0); // yaw += 0.2, pitch -= 0.05
//! input.on_drag_end();
//! input.on_zoom(&mut camera, -250.0);           // zoom += 0.25
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

use crate::camera::Camera;
use crate::config::SceneConfig;

/// Pixels per wheel "line", matching what browsers report for one notch.
const LINE_HEIGHT_PX: f32 = 100.0;

/// A pointer event reduced to what the camera cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button or finger went down at a position.
    Down { x: f32, y: f32 },
    /// Pointer moved to a position.
    Move { x: f32, y: f32 },
    /// Button released or pointer left the surface.
    Up,
    /// Wheel scrolled; positive is "scroll down" (zoom out).
    Wheel { delta_y: f32 },
    /// A finger touched down.
    TouchStart { id: u64, x: f32, y: f32 },
    /// A finger moved.
    TouchMove { id: u64, x: f32, y: f32 },
    /// A finger lifted or the touch was cancelled.
    TouchEnd { id: u64 },
}

/// Drag and wheel state feeding the [`Camera`].
#[derive(Debug, Clone)]
pub struct InputController {
    dragging: bool,
    last_pointer: Vec2,
    /// Latest cursor position, needed because button events carry none.
    cursor: Vec2,
    /// Touch id currently driving the drag, if any.
    primary_touch: Option<u64>,
    /// Physical pixels per logical pixel.
    scale_factor: f32,
    drag_sensitivity: f32,
    zoom_sensitivity: f32,
}

impl InputController {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            dragging: false,
            last_pointer: Vec2::ZERO,
            cursor: Vec2::ZERO,
            primary_touch: None,
            scale_factor: 1.0,
            drag_sensitivity: config.drag_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
        }
    }

    /// Whether a drag is in progress (auto-rotation is suspended).
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the window scale factor used to convert winit positions.
    /// Non-positive or non-finite values are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        let scale_factor = scale_factor as f32;
        if scale_factor > 0.0 && scale_factor.is_finite() {
            self.scale_factor = scale_factor;
        }
    }

    /// Start dragging from `(x, y)`.
    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_pointer = Vec2::new(x, y);
    }

    /// Rotate by the pointer delta since the last call. No-op unless dragging.
    ///
    /// Horizontal motion turns (yaw), vertical motion tilts (pitch, clamped).
    pub fn on_drag_move(&mut self, camera: &mut Camera, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let pointer = Vec2::new(x, y);
        let delta = (pointer - self.last_pointer) * self.drag_sensitivity;
        camera.rotate(delta.x, delta.y);
        self.last_pointer = pointer;
    }

    /// Stop dragging.
    pub fn on_drag_end(&mut self) {
        self.dragging = false;
        self.primary_touch = None;
    }

    /// Zoom by a wheel delta in pixels; positive zooms out.
    pub fn on_zoom(&mut self, camera: &mut Camera, delta_y: f32) {
        camera.zoom_by(-delta_y * self.zoom_sensitivity);
    }

    /// Apply a reduced pointer event.
    pub fn apply(&mut self, camera: &mut Camera, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.on_drag_start(x, y),
            PointerEvent::Move { x, y } => self.on_drag_move(camera, x, y),
            PointerEvent::Up => self.on_drag_end(),
            PointerEvent::Wheel { delta_y } => self.on_zoom(camera, delta_y),
            PointerEvent::TouchStart { id, x, y } => {
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(id);
                    self.on_drag_start(x, y);
                }
            }
            PointerEvent::TouchMove { id, x, y } => {
                if self.primary_touch == Some(id) {
                    self.on_drag_move(camera, x, y);
                }
            }
            PointerEvent::TouchEnd { id } => {
                if self.primary_touch == Some(id) {
                    self.on_drag_end();
                }
            }
        }
    }

    /// Reduce a winit event to a [`PointerEvent`], tracking the cursor.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32) / self.scale_factor;
                Some(PointerEvent::Move {
                    x: self.cursor.x,
                    y: self.cursor.y,
                })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => PointerEvent::Down {
                    x: self.cursor.x,
                    y: self.cursor.y,
                },
                ElementState::Released => PointerEvent::Up,
            }),
            WindowEvent::CursorLeft { .. } => Some(PointerEvent::Up),
            WindowEvent::MouseWheel { delta, .. } => Some(PointerEvent::Wheel {
                delta_y: wheel_delta_px(*delta, self.scale_factor),
            }),
            WindowEvent::Touch(touch) => {
                let x = touch.location.x as f32 / self.scale_factor;
                let y = touch.location.y as f32 / self.scale_factor;
                let id = touch.id;
                Some(match touch.phase {
                    TouchPhase::Started => PointerEvent::TouchStart { id, x, y },
                    TouchPhase::Moved => PointerEvent::TouchMove { id, x, y },
                    TouchPhase::Ended | TouchPhase::Cancelled => PointerEvent::TouchEnd { id },
                })
            }
            _ => None,
        }
    }

    /// Translate and apply a winit event. Returns whether it was a pointer event.
    pub fn handle_event(&mut self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match self.translate(event) {
            Some(pointer) => {
                self.apply(camera, pointer);
                true
            }
            None => false,
        }
    }
}

/// Browser-style wheel delta: logical pixels, positive when scrolling down.
pub fn wheel_delta_px(delta: MouseScrollDelta, scale_factor: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / scale_factor,
    }
}
