use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Volume", inline)]
#[serde(default)]
/// Appearance of the simulation boundary box.
pub struct VolumeOptions {
    /// Draw the boundary at startup.
    #[schemars(title = "Show Volume")]
    pub visible: bool,
    /// Cube edge length.
    #[schemars(title = "Size", range(min = 1.0, max = 5000.0))]
    pub size: f32,
    /// Opacity of the translucent fill.
    #[schemars(title = "Fill Opacity", range(min = 0.0, max = 1.0))]
    pub opacity: f32,
    /// Wireframe edge color (linear RGB).
    #[schemars(skip)]
    pub edge_color: [f32; 3],
    /// Fill color (linear RGB).
    #[schemars(skip)]
    pub fill_color: [f32; 3],
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self {
            visible: true,
            size: 500.0,
            opacity: 0.2,
            edge_color: [0.333, 0.333, 0.333],
            fill_color: [0.133, 0.133, 0.133],
        }
    }
}
