use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraProjection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
/// Navigation behavior for one projection.
pub struct NavigationProfile {
    /// Let rotation and panning coast to a stop.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of pending motion dropped per frame while damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0))]
    pub damping_factor: f32,
    /// Allow orbiting around the target.
    #[schemars(title = "Rotate")]
    pub enable_rotate: bool,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0))]
    pub rotate_speed: f32,
    /// Allow panning.
    #[schemars(title = "Pan")]
    pub enable_pan: bool,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0))]
    pub pan_speed: f32,
    /// Pan in the screen plane rather than the plane orthogonal to up.
    #[schemars(skip)]
    pub screen_space_panning: bool,
    /// Allow zooming.
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 4.0))]
    pub zoom_speed: f32,
    /// Lower zoom bound: eye distance for perspective, zoom factor for
    /// orthographic.
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Upper zoom bound, in the same measure as `min_zoom`.
    #[schemars(skip)]
    pub max_zoom: f32,
}

impl NavigationProfile {
    /// Free orbiting with inertia.
    #[must_use]
    pub fn perspective() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            enable_rotate: true,
            rotate_speed: 0.8,
            enable_pan: true,
            pan_speed: 1.0,
            screen_space_panning: true,
            enable_zoom: true,
            zoom_speed: 1.0,
            min_zoom: 10.0,
            max_zoom: 5000.0,
        }
    }

    /// Axis-locked inspection: no rotation, no inertia.
    #[must_use]
    pub fn orthographic() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            enable_rotate: false,
            rotate_speed: 0.8,
            enable_pan: true,
            pan_speed: 1.0,
            screen_space_panning: true,
            enable_zoom: true,
            zoom_speed: 1.0,
            min_zoom: 0.1,
            max_zoom: 20.0,
        }
    }
}

impl Default for NavigationProfile {
    fn default() -> Self {
        Self::perspective()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Navigation profiles per projection.
pub struct NavigationOptions {
    /// Used while the perspective camera is active.
    pub perspective: NavigationProfile,
    /// Used while an orthographic axis view is active.
    pub orthographic: NavigationProfile,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            perspective: NavigationProfile::perspective(),
            orthographic: NavigationProfile::orthographic(),
        }
    }
}

impl NavigationOptions {
    /// Profile for the given projection.
    #[must_use]
    pub fn profile(&self, projection: CameraProjection) -> &NavigationProfile {
        match projection {
            CameraProjection::Perspective => &self.perspective,
            CameraProjection::Orthographic => &self.orthographic,
        }
    }
}
