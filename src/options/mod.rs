//! Centralized viewer options with TOML preset support.
//!
//! Camera projection, per-projection navigation profiles, the boundary
//! volume, display colors and key bindings are consolidated here. Options
//! serialize to/from TOML so a partial file only overrides what it names.

mod camera;
mod display;
mod keybindings;
mod navigation;
mod volume;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use navigation::{NavigationOptions, NavigationProfile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use volume::VolumeOptions;

use crate::error::TrackviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[volume]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Navigation behavior per projection.
    pub navigation: NavigationOptions,
    /// Simulation boundary appearance.
    pub volume: VolumeOptions,
    /// Colors and frame pacing.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TrackviewError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| TrackviewError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TrackviewError> {
        let content =
            std::fs::read_to_string(path).map_err(TrackviewError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TrackviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrackviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TrackviewError::Io)?;
        }
        std::fs::write(path, content).map_err(TrackviewError::Io)
    }
}
