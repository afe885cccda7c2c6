use glam::{Mat4, Vec3};

use crate::camera::axis::PrincipalAxis;

/// Smallest aspect ratio a camera accepts. Degenerate viewports clamp here.
pub const MIN_ASPECT: f32 = 1.0e-3;

/// Aspect ratio (width / height) of a viewport, tolerant of zero-sized
/// dimensions.
#[must_use]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        log::debug!("degenerate viewport {width}x{height}, clamping aspect");
    }
    (width.max(1) as f32 / height.max(1) as f32).max(MIN_ASPECT)
}

/// Camera projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraProjection {
    /// Depth-foreshortened projection.
    Perspective,
    /// Parallel projection with no foreshortening.
    Orthographic,
}

/// Position and orientation of a camera, expressed as a look-at triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at (the orbit center for navigation).
    pub target: Vec3,
    /// Reference up direction. Never parallel to the view direction.
    pub up: Vec3,
}

impl Pose {
    /// Pose looking from `position` at `target`.
    #[must_use]
    pub const fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
        }
    }

    /// Canonical orthographic viewpoint for `axis` at `distance` from the
    /// origin.
    #[must_use]
    pub fn on_axis(axis: PrincipalAxis, distance: f32) -> Self {
        Self::looking_at(axis.unit() * distance, Vec3::ZERO, axis.up())
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Screen-right direction in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Screen-up direction in world space (orthogonal to `forward`).
    #[must_use]
    pub fn screen_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Distance from the eye to the target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Behavior shared by both camera kinds.
///
/// Navigation bindings drive cameras through this trait so the same orbit
/// logic works for both projections; the projection-specific parts (how far a
/// pixel of drag moves the view, what zoom means) live in the implementations.
pub trait Camera {
    /// Which projection model this camera uses.
    fn projection(&self) -> CameraProjection;

    /// Current pose.
    fn pose(&self) -> &Pose;

    /// Mutable pose, for navigation.
    fn pose_mut(&mut self) -> &mut Pose;

    /// Viewport aspect ratio (width / height).
    fn aspect(&self) -> f32;

    /// Update aspect-dependent parameters for a new viewport shape.
    fn set_aspect(&mut self, aspect: f32);

    /// Projection matrix with wgpu's [0, 1] depth range.
    fn projection_matrix(&self) -> Mat4;

    /// World units covered by one pixel of drag at the orbit target, for a
    /// viewport `viewport_height` pixels tall.
    fn units_per_pixel(&self, viewport_height: f32) -> f32;

    /// Zoom in by `scale` (> 1 zooms in, < 1 zooms out), clamped to
    /// `[min, max]` in the camera's own zoom measure.
    fn zoom_by(&mut self, scale: f32, min: f32, max: f32);

    /// World-to-view matrix.
    fn view_matrix(&self) -> Mat4 {
        self.pose().view_matrix()
    }

    /// Combined view-projection matrix.
    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Perspective camera with a freely navigable pose.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Eye, target and up.
    pub pose: Pose,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl PerspectiveCamera {
    /// Camera at `position` looking at the origin with +Y up.
    #[must_use]
    pub fn new(
        fovy: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        position: Vec3,
    ) -> Self {
        Self {
            pose: Pose::looking_at(position, Vec3::ZERO, Vec3::Y),
            fovy,
            aspect: aspect.max(MIN_ASPECT),
            znear,
            zfar,
        }
    }
}

impl Camera for PerspectiveCamera {
    fn projection(&self) -> CameraProjection {
        CameraProjection::Perspective
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(MIN_ASPECT);
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    fn units_per_pixel(&self, viewport_height: f32) -> f32 {
        let half_fov = (self.fovy.to_radians() / 2.0).tan();
        2.0 * self.pose.distance() * half_fov / viewport_height.max(1.0)
    }

    /// Dolly toward the target; `min`/`max` bound the eye-target distance.
    fn zoom_by(&mut self, scale: f32, min: f32, max: f32) {
        if scale <= 0.0 {
            return;
        }
        let offset = self.pose.position - self.pose.target;
        let distance = (offset.length() / scale).clamp(min, max);
        self.pose.position =
            self.pose.target + offset.normalize_or_zero() * distance;
    }
}

/// Orthographic camera that snaps to axis-aligned viewpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    /// Eye, target and up.
    pub pose: Pose,
    /// Half of the visible height at zoom 1. The half-width is this times
    /// the aspect ratio.
    pub half_size: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Magnification factor; the visible extent shrinks as it grows.
    pub zoom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl OrthographicCamera {
    /// Camera on the canonical `axis` viewpoint at `distance`.
    #[must_use]
    pub fn new(
        half_size: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        axis: PrincipalAxis,
        distance: f32,
    ) -> Self {
        Self {
            pose: Pose::on_axis(axis, distance),
            half_size,
            aspect: aspect.max(MIN_ASPECT),
            zoom: 1.0,
            znear,
            zfar,
        }
    }

    /// Half of the visible width at the current zoom.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.half_size * self.aspect / self.zoom
    }

    /// Half of the visible height at the current zoom.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.half_size / self.zoom
    }
}

impl Camera for OrthographicCamera {
    fn projection(&self) -> CameraProjection {
        CameraProjection::Orthographic
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(MIN_ASPECT);
    }

    fn projection_matrix(&self) -> Mat4 {
        let (hw, hh) = (self.half_width(), self.half_height());
        Mat4::orthographic_rh(-hw, hw, -hh, hh, self.znear, self.zfar)
    }

    fn units_per_pixel(&self, viewport_height: f32) -> f32 {
        2.0 * self.half_height() / viewport_height.max(1.0)
    }

    /// Magnify; `min`/`max` bound the zoom factor.
    fn zoom_by(&mut self, scale: f32, min: f32, max: f32) {
        if scale <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * scale).clamp(min, max);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Uniform with an identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &dyn Camera) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.position = camera.pose().position.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn aspect_ratio_tolerates_zero_dimensions() {
        assert!(approx(aspect_ratio(800, 600), 4.0 / 3.0));
        assert!(aspect_ratio(0, 600).is_finite());
        assert!(aspect_ratio(800, 0).is_finite());
        assert!(aspect_ratio(0, 0) >= MIN_ASPECT);
    }

    #[test]
    fn ortho_extent_follows_aspect_and_zoom() {
        let mut cam = OrthographicCamera::new(
            400.0,
            2.0,
            0.1,
            10_000.0,
            PrincipalAxis::X,
            1000.0,
        );
        assert!(approx(cam.half_width(), 800.0));
        assert!(approx(cam.half_height(), 400.0));

        cam.zoom_by(2.0, 0.1, 10.0);
        assert!(approx(cam.half_height(), 200.0));
        assert!(approx(cam.half_width() / cam.half_height(), 2.0));

        cam.zoom_by(1000.0, 0.1, 10.0);
        assert!(approx(cam.zoom, 10.0));
    }

    #[test]
    fn perspective_zoom_dollies_toward_target() {
        let mut cam = PerspectiveCamera::new(
            40.0,
            1.0,
            0.1,
            10_000.0,
            Vec3::new(0.0, 0.0, 100.0),
        );
        let forward = cam.pose.forward();
        cam.zoom_by(2.0, 1.0, 1000.0);
        assert!(approx(cam.pose.distance(), 50.0));
        assert!(cam.pose.forward().abs_diff_eq(forward, 1e-5));

        cam.zoom_by(0.001, 1.0, 1000.0);
        assert!(approx(cam.pose.distance(), 1000.0));
    }

    #[test]
    fn screen_basis_is_orthonormal() {
        for axis in PrincipalAxis::ALL {
            let pose = Pose::on_axis(axis, 1000.0);
            assert!(approx(pose.forward().dot(pose.right()), 0.0));
            assert!(approx(pose.forward().dot(pose.screen_up()), 0.0));
            assert!(approx(pose.screen_up().length(), 1.0));
        }
    }
}
