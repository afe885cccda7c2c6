//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the trackview crate.
#[derive(Debug)]
pub enum TrackviewError {
    /// A principal axis name or character that is not `x`, `y` or `z`.
    InvalidAxis(String),
    /// A view command name that does not map to any view.
    InvalidCommand(String),
    /// A frame was requested before the view controller was initialized.
    NotInitialized,
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The presentation surface failed to hand out a frame.
    Surface(wgpu::SurfaceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Recorded trajectory file could not be decoded.
    TrajectoryParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TrackviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAxis(value) => {
                write!(f, "invalid principal axis: {value:?}")
            }
            Self::InvalidCommand(value) => {
                write!(f, "invalid view command: {value:?}")
            }
            Self::NotInitialized => {
                write!(f, "render requested before view initialization")
            }
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TrajectoryParse(msg) => {
                write!(f, "trajectory parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TrackviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for TrackviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<wgpu::SurfaceError> for TrackviewError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<std::io::Error> for TrackviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_rejected_value() {
        let err = TrackviewError::InvalidAxis("w".into());
        assert_eq!(err.to_string(), "invalid principal axis: \"w\"");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = TrackviewError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(std::error::Error::source(&err).is_some());
        assert!(
            std::error::Error::source(&TrackviewError::NotInitialized)
                .is_none()
        );
    }
}
