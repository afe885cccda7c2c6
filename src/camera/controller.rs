//! Orbit-style navigation binding.
//!
//! A [`NavigationBinding`] turns drag and scroll gestures into camera pose
//! changes: rotation about the target, screen-space panning, and zoom. It is
//! built for one projection with one [`NavigationProfile`] and is replaced,
//! never reconfigured, when the view changes.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec2, Vec3};

use crate::camera::core::{Camera, CameraProjection};
use crate::input::listeners::{InputListeners, ListenerHandle};
use crate::options::NavigationProfile;

/// Keeps the polar angle away from the poles, where the orbit frame flips.
const POLAR_EPSILON: f32 = 1.0e-6;

/// Wheel zoom step base: one scroll unit at zoom speed 1 scales by 1/0.95.
const ZOOM_STEP: f32 = 0.95;

/// Squared pending deltas below this are treated as settled.
const SETTLE_EPSILON: f32 = 1.0e-10;

/// Stateful input handler bound to the active camera.
///
/// Gestures accumulate into pending deltas; [`update`](Self::update) applies
/// them to a camera once per frame. With damping enabled each update applies
/// `damping_factor` of the pending rotation and pan and keeps the rest,
/// so motion coasts to a stop and the total still matches the gesture.
/// Without damping they are consumed in a single update.
#[derive(Debug)]
pub struct NavigationBinding {
    projection: CameraProjection,
    profile: NavigationProfile,
    listener: ListenerHandle,
    viewport_height: f32,
    /// Pending (azimuth, polar) rotation in radians.
    rotate_delta: Vec2,
    /// Pending pan in screen pixels (x right, y down).
    pan_delta: Vec2,
    /// Pending zoom factor (> 1 zooms in).
    zoom_scale: f32,
}

impl NavigationBinding {
    /// Attach a new binding for a camera with the given projection.
    #[must_use]
    pub fn attach(
        listeners: &InputListeners,
        projection: CameraProjection,
        profile: NavigationProfile,
        viewport_height: u32,
    ) -> Self {
        log::debug!("attaching {projection:?} navigation binding");
        Self {
            projection,
            profile,
            listener: listeners.attach(),
            viewport_height: viewport_height.max(1) as f32,
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            zoom_scale: 1.0,
        }
    }

    /// Detach from the surface. Any pending motion is discarded.
    pub fn release(self) {
        log::debug!("releasing {:?} navigation binding", self.projection);
        drop(self.listener);
    }

    /// Projection of the camera this binding was built for.
    #[must_use]
    pub fn projection(&self) -> CameraProjection {
        self.projection
    }

    /// Configuration this binding was built with.
    #[must_use]
    pub fn profile(&self) -> &NavigationProfile {
        &self.profile
    }

    /// Track the viewport height used to scale drag distances.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Whether any motion is still pending.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.rotate_delta.length_squared() > SETTLE_EPSILON
            || self.pan_delta.length_squared() > SETTLE_EPSILON
            || (self.zoom_scale - 1.0).abs() > SETTLE_EPSILON
    }

    /// Queue a rotation for `delta` pixels of drag. Ignored when rotation
    /// is disabled. Returns whether the input was accepted.
    pub fn rotate(&mut self, delta: Vec2) -> bool {
        if !self.profile.enable_rotate {
            return false;
        }
        let per_pixel = TAU * self.profile.rotate_speed / self.viewport_height;
        self.rotate_delta -= delta * per_pixel;
        true
    }

    /// Queue a pan for `delta` pixels of drag. Returns whether the input was
    /// accepted.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if !self.profile.enable_pan {
            return false;
        }
        self.pan_delta += delta * self.profile.pan_speed;
        true
    }

    /// Queue a zoom for `delta` scroll units (positive zooms in). Returns
    /// whether the input was accepted.
    pub fn zoom(&mut self, delta: f32) -> bool {
        if !self.profile.enable_zoom {
            return false;
        }
        self.zoom_scale *= ZOOM_STEP.powf(-delta * self.profile.zoom_speed);
        true
    }

    /// Apply pending motion to `camera` and advance damping by one step.
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut dyn Camera) -> bool {
        let mut moved = false;
        let step = if self.profile.enable_damping {
            self.profile.damping_factor
        } else {
            1.0
        };

        if self.rotate_delta != Vec2::ZERO {
            orbit(camera, self.rotate_delta * step);
            moved = true;
        }

        if self.pan_delta != Vec2::ZERO {
            let pan = self.pan_delta * step;
            let units = camera.units_per_pixel(self.viewport_height);
            let pose = camera.pose_mut();
            let right = pose.right();
            let up = if self.profile.screen_space_panning {
                pose.screen_up()
            } else {
                pose.up.normalize_or_zero().cross(right)
            };
            let offset = (right * -pan.x + up * pan.y) * units;
            pose.position += offset;
            pose.target += offset;
            moved = true;
        }

        if (self.zoom_scale - 1.0).abs() > f32::EPSILON {
            camera.zoom_by(
                self.zoom_scale,
                self.profile.min_zoom,
                self.profile.max_zoom,
            );
            moved = true;
        }
        self.zoom_scale = 1.0;

        let keep = 1.0 - step;
        self.rotate_delta *= keep;
        self.pan_delta *= keep;
        if self.rotate_delta.length_squared() < SETTLE_EPSILON {
            self.rotate_delta = Vec2::ZERO;
        }
        if self.pan_delta.length_squared() < SETTLE_EPSILON {
            self.pan_delta = Vec2::ZERO;
        }

        moved
    }
}

/// Rotate the eye about the target by (azimuth, polar) radians, measured in a
/// frame where the camera's up vector is +Y.
fn orbit(camera: &mut dyn Camera, delta: Vec2) {
    let pose = camera.pose_mut();
    let to_y_up = Quat::from_rotation_arc(pose.up.normalize_or_zero(), Vec3::Y);
    let offset = to_y_up * (pose.position - pose.target);

    let radius = offset.length();
    if radius <= f32::EPSILON {
        return;
    }
    let theta = offset.x.atan2(offset.z) + delta.x;
    let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + delta.y)
        .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

    let rotated = Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    );
    pose.position = pose.target + to_y_up.inverse() * rotated;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::axis::PrincipalAxis;
    use crate::camera::core::{OrthographicCamera, PerspectiveCamera};
    use crate::options::NavigationOptions;

    fn perspective() -> PerspectiveCamera {
        PerspectiveCamera::new(
            40.0,
            4.0 / 3.0,
            0.1,
            10_000.0,
            Vec3::new(400.0, 400.0, 1100.0),
        )
    }

    fn orthographic() -> OrthographicCamera {
        OrthographicCamera::new(
            400.0,
            4.0 / 3.0,
            0.1,
            10_000.0,
            PrincipalAxis::X,
            1000.0,
        )
    }

    fn binding(
        listeners: &InputListeners,
        projection: CameraProjection,
    ) -> NavigationBinding {
        let options = NavigationOptions::default();
        NavigationBinding::attach(
            listeners,
            projection,
            options.profile(projection).clone(),
            600,
        )
    }

    #[test]
    fn release_detaches_listener() {
        let listeners = InputListeners::new();
        let nav = binding(&listeners, CameraProjection::Perspective);
        assert_eq!(listeners.attached(), 1);
        nav.release();
        assert_eq!(listeners.attached(), 0);
    }

    #[test]
    fn rotation_keeps_orbit_radius() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Perspective);
        let mut cam = perspective();
        let radius = cam.pose.distance();

        assert!(nav.rotate(Vec2::new(40.0, -25.0)));
        assert!(nav.update(&mut cam));
        assert!((cam.pose.distance() - radius).abs() < 1e-2);
        assert_eq!(cam.pose.target, Vec3::ZERO);
    }

    #[test]
    fn damping_coasts_then_settles() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Perspective);
        let mut cam = perspective();

        let _ = nav.rotate(Vec2::new(30.0, 0.0));
        let _ = nav.update(&mut cam);
        let after_first = cam.pose.position;
        assert!(nav.is_moving());
        let _ = nav.update(&mut cam);
        assert_ne!(cam.pose.position, after_first);

        for _ in 0..1000 {
            let _ = nav.update(&mut cam);
        }
        assert!(!nav.is_moving());
    }

    /// Run `update` until the binding settles.
    fn settle(nav: &mut NavigationBinding, cam: &mut PerspectiveCamera) {
        for _ in 0..2000 {
            let _ = nav.update(cam);
        }
        assert!(!nav.is_moving());
    }

    fn undamped(listeners: &InputListeners) -> NavigationBinding {
        let mut profile = NavigationOptions::default()
            .profile(CameraProjection::Perspective)
            .clone();
        profile.enable_damping = false;
        NavigationBinding::attach(
            listeners,
            CameraProjection::Perspective,
            profile,
            600,
        )
    }

    fn azimuth(cam: &PerspectiveCamera) -> f32 {
        let offset = cam.pose.position - cam.pose.target;
        offset.x.atan2(offset.z)
    }

    #[test]
    fn damped_rotation_totals_the_drag() {
        let listeners = InputListeners::new();
        let mut damped = binding(&listeners, CameraProjection::Perspective);
        let mut plain = undamped(&listeners);
        let mut damped_cam = perspective();
        let mut plain_cam = perspective();
        let start = azimuth(&plain_cam);

        assert!(damped.rotate(Vec2::new(-5.0, 0.0)));
        assert!(plain.rotate(Vec2::new(-5.0, 0.0)));
        settle(&mut damped, &mut damped_cam);
        settle(&mut plain, &mut plain_cam);

        let expected = azimuth(&plain_cam) - start;
        let actual = azimuth(&damped_cam) - start;
        assert!(expected.abs() > 1e-2);
        assert!((actual - expected).abs() < 1e-4, "{actual} vs {expected}");
    }

    #[test]
    fn damped_pan_totals_the_drag() {
        let listeners = InputListeners::new();
        let mut damped = binding(&listeners, CameraProjection::Perspective);
        let mut plain = undamped(&listeners);
        let mut damped_cam = perspective();
        let mut plain_cam = perspective();

        assert!(damped.pan(Vec2::new(-8.0, 3.0)));
        assert!(plain.pan(Vec2::new(-8.0, 3.0)));
        settle(&mut damped, &mut damped_cam);
        settle(&mut plain, &mut plain_cam);

        assert!(plain_cam.pose.target.length() > 1.0);
        assert!(
            damped_cam.pose.target.abs_diff_eq(plain_cam.pose.target, 1e-2),
            "{} vs {}",
            damped_cam.pose.target,
            plain_cam.pose.target
        );
    }

    #[test]
    fn orthographic_ignores_rotation() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Orthographic);
        let mut cam = orthographic();
        let before = cam.pose;

        assert!(!nav.rotate(Vec2::new(120.0, 80.0)));
        assert!(!nav.update(&mut cam));
        assert_eq!(cam.pose, before);
    }

    #[test]
    fn orthographic_pan_is_screen_space_and_undamped() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Orthographic);
        let mut cam = orthographic();
        let forward = cam.pose.forward();

        assert!(nav.pan(Vec2::new(0.0, 60.0)));
        assert!(nav.update(&mut cam));
        // Dragging down moves the view up along +Y, staying on the X axis.
        assert!(cam.pose.target.y > 0.0);
        assert!(cam.pose.target.x.abs() < 1e-3);
        assert!(cam.pose.forward().abs_diff_eq(forward, 1e-5));
        assert!(!nav.is_moving());

        let settled = cam.pose;
        assert!(!nav.update(&mut cam));
        assert_eq!(cam.pose, settled);
    }

    #[test]
    fn orthographic_zoom_scales_extent() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Orthographic);
        let mut cam = orthographic();
        let before = cam.half_height();

        assert!(nav.zoom(3.0));
        let _ = nav.update(&mut cam);
        assert!(cam.half_height() < before);
        assert_eq!(cam.pose.position, Vec3::new(1000.0, 0.0, 0.0));
    }

    #[test]
    fn perspective_zoom_moves_eye() {
        let listeners = InputListeners::new();
        let mut nav = binding(&listeners, CameraProjection::Perspective);
        let mut cam = perspective();
        let before = cam.pose.distance();

        let _ = nav.zoom(-2.0);
        let _ = nav.update(&mut cam);
        assert!(cam.pose.distance() > before);
    }
}
