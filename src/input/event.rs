/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor), which
/// turns pointer drags and scrolling into [`NavigationGesture`]s for the live
/// navigation binding.
///
/// # Example
///
/// ```ignore
/// view.handle_input(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// view.handle_input(InputEvent::Scroll { delta: 1.0 });
/// ```
///
/// [`NavigationGesture`]: super::NavigationGesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in wheel lines.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl MouseButton {
    /// Map a winit button. Buttons with no navigation gesture (back,
    /// forward, extra) map to `None`.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Back
            | winit::event::MouseButton::Forward
            | winit::event::MouseButton::Other(_) => None,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::event::MouseButton as WinitButton;

    use super::*;

    #[test]
    fn navigation_buttons_map_through() {
        assert_eq!(
            MouseButton::from_winit(WinitButton::Left),
            Some(MouseButton::Left)
        );
        assert_eq!(
            MouseButton::from_winit(WinitButton::Right),
            Some(MouseButton::Right)
        );
        assert_eq!(
            MouseButton::from_winit(WinitButton::Middle),
            Some(MouseButton::Middle)
        );
    }

    #[test]
    fn extra_buttons_are_dropped() {
        assert_eq!(MouseButton::from_winit(WinitButton::Back), None);
        assert_eq!(MouseButton::from_winit(WinitButton::Forward), None);
        assert_eq!(MouseButton::from_winit(WinitButton::Other(7)), None);
    }
}
