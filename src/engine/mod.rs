//! View controller and render loop.
//!
//! [`ViewController`] owns the scene root, the render surface, the camera
//! manager and the single live [`NavigationBinding`]. [`RenderLoop`] drives
//! it once per frame, feeding in new trajectory points first.

pub mod command;
mod frame_loop;
mod surface;

pub use command::ViewCommand;
pub use frame_loop::{FrameSource, RenderLoop};
use glam::Vec3;
pub use surface::RenderSurface;

use crate::camera::{
    Camera, CameraManager, CameraProjection, NavigationBinding, ViewState,
};
use crate::error::TrackviewError;
use crate::input::{InputEvent, InputListeners, InputProcessor, NavigationGesture};
use crate::options::{NavigationOptions, Options, VolumeOptions};
use crate::scene::{bounding_volume, Scene};

/// Owns everything needed to draw a frame and mediates every camera switch.
///
/// # Frame loop
///
/// Call [`render_frame`](Self::render_frame) once per frame after any scene
/// mutation for that frame (e.g. [`append_points`](Self::append_points)).
/// Call [`resize`](Self::resize) when the viewport changes.
///
/// # View switching
///
/// [`request_view`](Self::request_view) releases the live navigation binding,
/// switches the camera manager, then attaches a fresh binding configured for
/// the new projection. Exactly one binding is attached between calls.
pub struct ViewController<S: RenderSurface> {
    surface: S,
    scene: Scene,
    cameras: CameraManager,
    navigation: NavigationOptions,
    volume: VolumeOptions,
    trajectory_color: [f32; 3],
    listeners: InputListeners,
    binding: Option<NavigationBinding>,
    input: InputProcessor,
}

impl<S: RenderSurface> ViewController<S> {
    /// Build the scene root, size both cameras to `surface`, and attach the
    /// first navigation binding to whichever camera is active.
    #[must_use]
    pub fn initialize(
        surface: S,
        mut cameras: CameraManager,
        options: &Options,
    ) -> Self {
        let (width, height) = surface.size();
        cameras.resize(width, height);

        let mut view = Self {
            surface,
            scene: Scene::new(options.display.background),
            cameras,
            navigation: options.navigation.clone(),
            volume: options.volume.clone(),
            trajectory_color: options.display.trajectory_color,
            listeners: InputListeners::new(),
            binding: None,
            input: InputProcessor::new(),
        };
        view.attach_binding();
        log::info!(
            "view initialized at {width}x{height} in {:?}",
            view.cameras.state()
        );
        view
    }

    /// Switch views with the release-then-construct protocol.
    ///
    /// Self-transitions still replace the binding, which resets any pending
    /// navigation motion.
    pub fn request_view(&mut self, command: ViewCommand) {
        self.release_binding();
        match command {
            ViewCommand::ToPerspective => self.cameras.set_perspective(),
            ViewCommand::ToOrthographic(axis) => {
                self.cameras.set_orthographic(axis);
            }
        }
        self.attach_binding();
        log::info!("view switched to {:?}", self.cameras.state());
    }

    /// Flip between perspective and the orthographic camera where it was
    /// last placed, with the same binding protocol as
    /// [`request_view`](Self::request_view).
    pub fn toggle_projection(&mut self) {
        self.release_binding();
        self.cameras.switch_projection();
        self.attach_binding();
        log::info!("projection toggled to {:?}", self.cameras.state());
    }

    /// Add the wireframe and translucent fill of the simulation boundary.
    pub fn add_bounding_volume(&mut self, size: f32, opacity: f32) {
        for node in bounding_volume(
            size,
            opacity,
            self.volume.edge_color,
            self.volume.fill_color,
        ) {
            self.scene.add(node);
        }
    }

    /// Append one trajectory line through `points`, in order. Returns
    /// whether geometry was added.
    pub fn append_points(&mut self, points: &[Vec3]) -> bool {
        self.scene.append_trajectory(points, self.trajectory_color)
    }

    /// Advance the navigation binding one step, then draw the scene through
    /// the active camera.
    pub fn render_frame(&mut self) -> Result<(), TrackviewError> {
        if let Some(binding) = &mut self.binding {
            debug_assert_eq!(
                binding.projection(),
                self.cameras.active_projection()
            );
            let _ = binding.update(self.cameras.active_camera_mut());
        }
        self.surface.render(&self.scene, self.cameras.active_camera())
    }

    /// Resize the surface and recompute both cameras' aspect-dependent
    /// parameters.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.cameras.resize(width, height);
        if let Some(binding) = &mut self.binding {
            binding.set_viewport_height(height);
        }
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Route a pointer event to the live binding. Returns `true` if it
    /// produced camera motion.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let Some(gesture) = self.input.handle_event(event) else {
            return false;
        };
        let Some(binding) = &mut self.binding else {
            return false;
        };
        match gesture {
            NavigationGesture::Rotate(delta) => binding.rotate(delta),
            NavigationGesture::Pan(delta) => binding.pan(delta),
            NavigationGesture::Zoom(delta) => binding.zoom(delta),
        }
    }

    /// Current view state.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.cameras.state()
    }

    /// The camera currently used for rendering.
    #[must_use]
    pub fn active_camera(&self) -> &dyn Camera {
        self.cameras.active_camera()
    }

    /// The camera manager.
    #[must_use]
    pub fn camera_manager(&self) -> &CameraManager {
        &self.cameras
    }

    /// The scene root.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The render surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The live navigation binding.
    #[must_use]
    pub fn binding(&self) -> Option<&NavigationBinding> {
        self.binding.as_ref()
    }

    /// Number of navigation bindings attached to the surface.
    #[must_use]
    pub fn attached_bindings(&self) -> usize {
        self.listeners.attached()
    }

    fn release_binding(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.release();
        }
        // A drag in progress belongs to the old binding.
        self.input.release_buttons();
    }

    fn attach_binding(&mut self) {
        debug_assert_eq!(self.listeners.attached(), 0);
        let projection: CameraProjection = self.cameras.active_projection();
        let (_, height) = self.surface.size();
        self.binding = Some(NavigationBinding::attach(
            &self.listeners,
            projection,
            self.navigation.profile(projection).clone(),
            height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::surface::recording::RecordingSurface;
    use super::*;
    use crate::camera::PrincipalAxis;
    use crate::input::MouseButton;

    fn view() -> ViewController<RecordingSurface> {
        let options = Options::default();
        let cameras = CameraManager::new(&options.camera, 1.0);
        ViewController::initialize(
            RecordingSurface::new(800, 600),
            cameras,
            &options,
        )
    }

    fn drag(view: &mut ViewController<RecordingSurface>, delta: (f32, f32)) {
        let _ = view.handle_input(InputEvent::CursorMoved { x: 100.0, y: 100.0 });
        let _ = view.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let _ = view.handle_input(InputEvent::CursorMoved {
            x: 100.0 + delta.0,
            y: 100.0 + delta.1,
        });
        let _ = view.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
    }

    #[test]
    fn starts_in_perspective_with_damped_binding() {
        let view = view();
        assert_eq!(view.view_state(), ViewState::Perspective);
        assert_eq!(view.attached_bindings(), 1);
        let binding = view.binding().unwrap();
        assert_eq!(binding.projection(), CameraProjection::Perspective);
        assert!(binding.profile().enable_damping);
        assert!(binding.profile().enable_rotate);
        assert!((view.active_camera().aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    /// Every way the view can be changed: the four view commands plus the
    /// projection toggle.
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Request(ViewCommand),
        Toggle,
    }

    const STEPS: [Step; 5] = [
        Step::Request(ViewCommand::ToPerspective),
        Step::Request(ViewCommand::ToOrthographic(PrincipalAxis::X)),
        Step::Request(ViewCommand::ToOrthographic(PrincipalAxis::Y)),
        Step::Request(ViewCommand::ToOrthographic(PrincipalAxis::Z)),
        Step::Toggle,
    ];

    fn apply(view: &mut ViewController<RecordingSurface>, step: Step) {
        match step {
            Step::Request(cmd) => {
                view.request_view(cmd);
                assert_eq!(view.view_state(), cmd.target(), "{step:?}");
            }
            Step::Toggle => view.toggle_projection(),
        }
        assert_eq!(view.attached_bindings(), 1, "{step:?}");
        assert_eq!(
            view.binding().unwrap().projection(),
            view.active_camera().projection(),
            "{step:?}"
        );
    }

    #[test]
    fn at_most_one_binding_for_any_command_sequence() {
        // Every ordered pair from a fresh view, then all pairs chained
        // on one view so every transition is also taken from every state.
        let mut chained = view();
        for first in STEPS {
            for second in STEPS {
                let mut fresh = view();
                apply(&mut fresh, first);
                apply(&mut fresh, second);

                apply(&mut chained, first);
                apply(&mut chained, second);
            }
        }
    }

    #[test]
    fn ortho_x_is_axis_locked() {
        let mut view = view();
        view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::X));

        let cam = view.active_camera();
        assert_eq!(cam.projection(), CameraProjection::Orthographic);
        assert!(cam.pose().position.abs_diff_eq(Vec3::new(1000.0, 0.0, 0.0), 1e-3));
        assert_eq!(cam.pose().target, Vec3::ZERO);
        let before = *cam.pose();

        drag(&mut view, (150.0, -90.0));
        view.render_frame().unwrap();
        assert_eq!(*view.active_camera().pose(), before);

        let binding = view.binding().unwrap();
        assert!(!binding.profile().enable_damping);
        assert!(!binding.profile().enable_rotate);
        assert!(binding.profile().enable_pan);
        assert!(binding.profile().enable_zoom);
    }

    #[test]
    fn perspective_pose_survives_orthographic_detour() {
        let mut view = view();
        drag(&mut view, (80.0, 30.0));
        for _ in 0..5 {
            view.render_frame().unwrap();
        }
        let navigated = view.camera_manager().perspective().pose;
        assert_ne!(
            navigated.position,
            Vec3::new(400.0, 400.0, 1100.0),
            "drag should have moved the camera"
        );

        view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::Y));
        view.render_frame().unwrap();
        view.request_view(ViewCommand::ToPerspective);
        assert_eq!(*view.active_camera().pose(), navigated);

        // The coasting motion died with the old binding.
        view.render_frame().unwrap();
        assert_eq!(*view.active_camera().pose(), navigated);
    }

    #[test]
    fn reselecting_an_axis_resets_orthographic_navigation() {
        let mut view = view();
        view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::Z));
        let canonical = *view.active_camera().pose();

        let _ = view.handle_input(InputEvent::Scroll { delta: 2.0 });
        let _ = view.handle_input(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = view.handle_input(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        let _ = view.handle_input(InputEvent::CursorMoved { x: 40.0, y: 0.0 });
        view.render_frame().unwrap();
        assert_ne!(*view.active_camera().pose(), canonical);

        view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::Z));
        assert_eq!(*view.active_camera().pose(), canonical);
        assert!((view.camera_manager().orthographic().zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn appended_points_render_as_one_line() {
        let mut view = view();
        let points = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
        assert!(view.append_points(&points));
        view.render_frame().unwrap();

        let lines: Vec<_> = view.scene().lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points, points.to_vec());
        assert_eq!(view.surface().draws.last().unwrap().nodes, 1);
    }

    #[test]
    fn bounding_volume_adds_edges_and_fill() {
        let mut view = view();
        view.add_bounding_volume(500.0, 0.2);
        assert_eq!(view.scene().lines().count(), 1);
        let fill = view.scene().meshes().next().unwrap();
        assert!((fill.opacity - 0.2).abs() < 1e-6);
        assert_eq!(view.attached_bindings(), 1);
    }

    #[test]
    fn resize_updates_both_cameras() {
        let mut view = view();
        view.resize(400, 800);
        assert_eq!(view.surface().size(), (400, 800));
        let cams = view.camera_manager();
        assert!((cams.perspective().aspect - 0.5).abs() < 1e-6);
        let ortho = cams.orthographic();
        assert!((ortho.half_width() / ortho.half_height() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_resize_is_tolerated() {
        let mut view = view();
        view.resize(0, 0);
        view.render_frame().unwrap();
        let draw = view.surface().draws.last().unwrap();
        assert!(draw.view_proj.is_finite());
    }

    #[test]
    fn frames_render_through_the_active_camera() {
        let mut view = view();
        view.render_frame().unwrap();
        view.request_view(ViewCommand::ToOrthographic(PrincipalAxis::Y));
        view.render_frame().unwrap();
        let projections: Vec<_> =
            view.surface().draws.iter().map(|d| d.projection).collect();
        assert_eq!(
            projections,
            vec![CameraProjection::Perspective, CameraProjection::Orthographic]
        );
    }
}
