//! Converts raw platform events into navigation gestures.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position,
//! held buttons, shift) and is the only thing between raw window events and
//! the live navigation binding.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};

/// A camera gesture recognized from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationGesture {
    /// Orbit by `delta` pixels of drag.
    Rotate(Vec2),
    /// Pan by `delta` pixels of drag.
    Pan(Vec2),
    /// Zoom by scroll units (positive = in).
    Zoom(f32),
}

/// Drag interpretation: left drag orbits, shift+left, right or middle drag
/// pans, the wheel zooms.
#[derive(Debug, Default)]
pub struct InputProcessor {
    last_cursor: Option<Vec2>,
    left_pressed: bool,
    pan_pressed: bool,
    shift_pressed: bool,
}

impl InputProcessor {
    /// Processor with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any navigation button is held.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.left_pressed || self.pan_pressed
    }

    /// Forget held buttons, e.g. when the navigation binding is replaced
    /// mid-drag.
    pub fn release_buttons(&mut self) {
        self.left_pressed = false;
        self.pan_pressed = false;
    }

    /// Process a raw input event and return zero or one gestures.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<NavigationGesture> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right | MouseButton::Middle => {
                        self.pan_pressed = pressed;
                    }
                }
                None
            }
            InputEvent::Scroll { delta } => Some(NavigationGesture::Zoom(delta)),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved: compute the delta and maybe produce a drag gesture.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<NavigationGesture> {
        let current = Vec2::new(x, y);
        let delta = self
            .last_cursor
            .map_or(Vec2::ZERO, |last| current - last);
        self.last_cursor = Some(current);

        if delta == Vec2::ZERO {
            return None;
        }
        if self.pan_pressed || (self.left_pressed && self.shift_pressed) {
            return Some(NavigationGesture::Pan(delta));
        }
        if self.left_pressed {
            return Some(NavigationGesture::Rotate(delta));
        }
        None
    }
}
