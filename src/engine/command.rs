//! The view-switch vocabulary.
//!
//! Every view change, whether triggered by a key press, a command line flag,
//! or a programmatic call, is a `ViewCommand` handed to
//! [`ViewController::request_view`](super::ViewController::request_view).

use std::fmt;
use std::str::FromStr;

use crate::camera::{PrincipalAxis, ViewState};
use crate::error::TrackviewError;

/// A request to change the active view.
///
/// ```ignore
/// view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::Y));
/// view.request_view("perspective".parse()?);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewCommand {
    /// Switch to the free perspective camera.
    ToPerspective,
    /// Switch to the orthographic camera locked to an axis.
    ToOrthographic(PrincipalAxis),
}

impl ViewCommand {
    /// The view state this command leads to, from any state.
    #[must_use]
    pub const fn target(self) -> ViewState {
        match self {
            Self::ToPerspective => ViewState::Perspective,
            Self::ToOrthographic(axis) => ViewState::Orthographic(axis),
        }
    }
}

impl fmt::Display for ViewCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToPerspective => f.write_str("perspective"),
            Self::ToOrthographic(axis) => write!(f, "ortho-{axis}"),
        }
    }
}

/// Accepts `perspective` and `ortho-<axis>` / `orthographic-<axis>` (with
/// `-` or `:` as separator), case-insensitively.
impl FromStr for ViewCommand {
    type Err = TrackviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "perspective" || name == "persp" {
            return Ok(Self::ToPerspective);
        }
        let axis = ["ortho-", "ortho:", "orthographic-", "orthographic:"]
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
            .ok_or_else(|| TrackviewError::InvalidCommand(s.to_owned()))?;
        Ok(Self::ToOrthographic(axis.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_commands() {
        assert_eq!(
            "perspective".parse::<ViewCommand>().unwrap(),
            ViewCommand::ToPerspective
        );
        assert_eq!(
            "Ortho-Y".parse::<ViewCommand>().unwrap(),
            ViewCommand::ToOrthographic(PrincipalAxis::Y)
        );
        assert_eq!(
            "orthographic:z".parse::<ViewCommand>().unwrap(),
            ViewCommand::ToOrthographic(PrincipalAxis::Z)
        );
    }

    #[test]
    fn display_round_trips() {
        for cmd in [
            ViewCommand::ToPerspective,
            ViewCommand::ToOrthographic(PrincipalAxis::X),
        ] {
            assert_eq!(cmd.to_string().parse::<ViewCommand>().unwrap(), cmd);
        }
    }

    #[test]
    fn rejects_unknown_commands_and_axes() {
        assert!(matches!(
            "isometric".parse::<ViewCommand>(),
            Err(TrackviewError::InvalidCommand(_))
        ));
        assert!(matches!(
            "ortho-w".parse::<ViewCommand>(),
            Err(TrackviewError::InvalidAxis(_))
        ));
    }
}
