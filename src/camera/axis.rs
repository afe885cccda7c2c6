use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::TrackviewError;

/// One of the three orthogonal reference directions that define a canonical
/// orthographic viewpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalAxis {
    /// Side view, looking from +X toward the origin.
    #[default]
    X,
    /// Top view, looking from +Y down toward the origin.
    Y,
    /// Front view, looking from +Z toward the origin.
    Z,
}

impl PrincipalAxis {
    /// All three axes in X, Y, Z order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Unit vector along the axis.
    #[must_use]
    pub const fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    /// Up vector for the orthographic view along this axis.
    ///
    /// The top view cannot use +Y (it is the viewing axis), so it uses -Z:
    /// +X then points right and +Z points toward the bottom of the screen.
    #[must_use]
    pub const fn up(self) -> Vec3 {
        match self {
            Self::X | Self::Z => Vec3::Y,
            Self::Y => Vec3::NEG_Z,
        }
    }

    /// Lowercase axis name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for PrincipalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<char> for PrincipalAxis {
    type Error = TrackviewError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'x' => Ok(Self::X),
            'y' => Ok(Self::Y),
            'z' => Ok(Self::Z),
            _ => Err(TrackviewError::InvalidAxis(c.to_string())),
        }
    }
}

impl FromStr for PrincipalAxis {
    type Err = TrackviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(TrackviewError::InvalidAxis(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_vectors_are_never_parallel_to_the_axis() {
        for axis in PrincipalAxis::ALL {
            let cross = axis.unit().cross(axis.up());
            assert!(cross.length() > 0.99, "degenerate up for {axis}");
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("x".parse::<PrincipalAxis>().ok(), Some(PrincipalAxis::X));
        assert_eq!(" Y ".parse::<PrincipalAxis>().ok(), Some(PrincipalAxis::Y));
        assert_eq!(PrincipalAxis::try_from('Z').ok(), Some(PrincipalAxis::Z));
    }

    #[test]
    fn rejects_unknown_axes_instead_of_defaulting() {
        assert!(matches!(
            "w".parse::<PrincipalAxis>(),
            Err(TrackviewError::InvalidAxis(v)) if v == "w"
        ));
        assert!("xy".parse::<PrincipalAxis>().is_err());
        assert!("".parse::<PrincipalAxis>().is_err());
    }
}
