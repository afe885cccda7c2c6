use glam::Vec3;

use crate::camera::axis::PrincipalAxis;
use crate::camera::core::{
    aspect_ratio, Camera, CameraProjection, OrthographicCamera,
    PerspectiveCamera, Pose,
};
use crate::options::CameraOptions;

/// Which camera is active and, for orthographic views, along which axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Free perspective view.
    Perspective,
    /// Axis-locked orthographic view.
    Orthographic(PrincipalAxis),
}

impl ViewState {
    /// Projection model of this state.
    #[must_use]
    pub const fn projection(self) -> CameraProjection {
        match self {
            Self::Perspective => CameraProjection::Perspective,
            Self::Orthographic(_) => CameraProjection::Orthographic,
        }
    }
}

/// Owns the perspective and orthographic cameras and tracks which is active.
///
/// Neither camera is ever recreated: switching only changes the active tag
/// and, for orthographic views, where the orthographic camera sits.
#[derive(Debug, Clone)]
pub struct CameraManager {
    perspective: PerspectiveCamera,
    orthographic: OrthographicCamera,
    state: ViewState,
    /// Axis the orthographic camera was last placed on.
    ortho_axis: PrincipalAxis,
    ortho_distance: f32,
}

impl CameraManager {
    /// Build both cameras for a viewport of the given aspect ratio. The
    /// perspective camera starts active.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let perspective = PerspectiveCamera::new(
            options.fovy,
            aspect,
            options.znear,
            options.zfar,
            Vec3::from_array(options.perspective_position),
        );
        let ortho_axis = PrincipalAxis::X;
        let orthographic = OrthographicCamera::new(
            options.ortho_half_size,
            aspect,
            options.znear,
            options.zfar,
            ortho_axis,
            options.ortho_distance,
        );
        Self {
            perspective,
            orthographic,
            state: ViewState::Perspective,
            ortho_axis,
            ortho_distance: options.ortho_distance,
        }
    }

    /// Build both cameras sized for a `width` x `height` viewport.
    #[must_use]
    pub fn for_viewport(options: &CameraOptions, width: u32, height: u32) -> Self {
        Self::new(options, aspect_ratio(width, height))
    }

    /// Toggle between perspective and orthographic. The orthographic camera
    /// comes back wherever it was last placed.
    pub fn switch_projection(&mut self) {
        self.state = match self.state {
            ViewState::Perspective => ViewState::Orthographic(self.ortho_axis),
            ViewState::Orthographic(_) => ViewState::Perspective,
        };
    }

    /// Activate the orthographic camera and snap it to the canonical
    /// viewpoint for `axis`. Zoom and any panning are reset, so repeated
    /// calls with the same axis leave the same pose.
    pub fn set_orthographic(&mut self, axis: PrincipalAxis) {
        self.orthographic.pose = Pose::on_axis(axis, self.ortho_distance);
        self.orthographic.zoom = 1.0;
        self.ortho_axis = axis;
        self.state = ViewState::Orthographic(axis);
    }

    /// Activate the perspective camera without touching its pose.
    pub fn set_perspective(&mut self) {
        self.state = ViewState::Perspective;
    }

    /// The camera currently used for rendering.
    #[must_use]
    pub fn active_camera(&self) -> &dyn Camera {
        match self.state {
            ViewState::Perspective => &self.perspective,
            ViewState::Orthographic(_) => &self.orthographic,
        }
    }

    /// Mutable access to the active camera, for navigation.
    pub fn active_camera_mut(&mut self) -> &mut dyn Camera {
        match self.state {
            ViewState::Perspective => &mut self.perspective,
            ViewState::Orthographic(_) => &mut self.orthographic,
        }
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Projection of the active camera.
    #[must_use]
    pub fn active_projection(&self) -> CameraProjection {
        self.state.projection()
    }

    /// Axis the orthographic camera was last placed on.
    #[must_use]
    pub fn ortho_axis(&self) -> PrincipalAxis {
        self.ortho_axis
    }

    /// The perspective camera, active or not.
    #[must_use]
    pub fn perspective(&self) -> &PerspectiveCamera {
        &self.perspective
    }

    /// The orthographic camera, active or not.
    #[must_use]
    pub fn orthographic(&self) -> &OrthographicCamera {
        &self.orthographic
    }

    /// Recompute aspect-dependent parameters of both cameras.
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect = aspect_ratio(width, height);
        self.perspective.set_aspect(aspect);
        self.orthographic.set_aspect(aspect);
    }
}
