use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Projection parameters shared by the perspective and orthographic cameras.
pub struct CameraOptions {
    /// Perspective vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 10.0, max = 120.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Where the perspective camera starts, looking at the origin.
    #[schemars(skip)]
    pub perspective_position: [f32; 3],
    /// Half of the orthographic view height at zoom 1.
    #[schemars(title = "Orthographic Size", range(min = 1.0, max = 5000.0))]
    pub ortho_half_size: f32,
    /// Distance of the orthographic eye from the origin along its axis.
    #[schemars(skip)]
    pub ortho_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 40.0,
            znear: 0.1,
            zfar: 10_000.0,
            perspective_position: [400.0, 400.0, 1100.0],
            ortho_half_size: 400.0,
            ortho_distance: 1000.0,
        }
    }
}
