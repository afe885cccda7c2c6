//! Input handling: event types, key actions, listener attachment, and the
//! processor that converts raw window events into navigation gestures.

/// Platform-agnostic input events.
pub mod event;
/// Bindable viewer actions.
pub mod keyboard;
/// Listener attachment bookkeeping for navigation bindings.
pub mod listeners;
/// Converts raw events into navigation gestures.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use listeners::{InputListeners, ListenerHandle};
pub use processor::{InputProcessor, NavigationGesture};
