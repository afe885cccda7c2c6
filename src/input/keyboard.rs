use serde::{Deserialize, Serialize};

use crate::camera::PrincipalAxis;
use crate::engine::command::ViewCommand;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// side_view = "KeyX"
/// toggle_projection = "KeyC"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Switch to the free perspective view.
    PerspectiveView,
    /// Orthographic view along X.
    SideView,
    /// Orthographic view along Y.
    TopView,
    /// Orthographic view along Z.
    FrontView,
    /// Flip between perspective and the last orthographic axis.
    ToggleProjection,
    /// Pause or resume trajectory playback.
    TogglePlayback,
}

impl KeyAction {
    /// The view command this action issues, if it is a direct view switch.
    #[must_use]
    pub const fn view_command(self) -> Option<ViewCommand> {
        match self {
            Self::PerspectiveView => Some(ViewCommand::ToPerspective),
            Self::SideView => Some(ViewCommand::ToOrthographic(PrincipalAxis::X)),
            Self::TopView => Some(ViewCommand::ToOrthographic(PrincipalAxis::Y)),
            Self::FrontView => {
                Some(ViewCommand::ToOrthographic(PrincipalAxis::Z))
            }
            Self::ToggleProjection | Self::TogglePlayback => None,
        }
    }
}
