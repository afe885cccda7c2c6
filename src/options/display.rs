use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Scene colors and frame pacing.
pub struct DisplayOptions {
    /// Clear color (linear RGB).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Color of appended trajectory lines (linear RGB).
    #[schemars(skip)]
    pub trajectory_color: [f32; 3],
    /// Trajectory points fed to the scene per frame during playback.
    #[schemars(title = "Playback Speed", range(min = 1, max = 1000))]
    pub points_per_frame: usize,
    /// Frame-rate cap (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 1000))]
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.067, 0.067, 0.067],
            trajectory_color: [0.95, 0.75, 0.2],
            points_per_frame: 4,
            target_fps: 0,
        }
    }
}
