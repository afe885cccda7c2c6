//! Standalone trajectory window backed by winit.
//!
//! ```no_run
//! # use trackview::Viewer;
//! Viewer::builder()
//!     .with_trajectory("tracks.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::camera::CameraManager;
use crate::engine::{RenderLoop, ViewCommand, ViewController};
use crate::error::TrackviewError;
use crate::gpu::{GpuSurface, RenderContext};
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::util::trajectory::TrajectoryFeed;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    trajectory: Option<PathBuf>,
    options: Option<Options>,
    initial_view: Option<ViewCommand>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            trajectory: None,
            options: None,
            initial_view: None,
            title: "Trackview".into(),
        }
    }

    /// Replay recorded tracks from a JSON file.
    #[must_use]
    pub fn with_trajectory(mut self, path: impl Into<PathBuf>) -> Self {
        self.trajectory = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// View to switch to once the window is up.
    #[must_use]
    pub fn with_initial_view(mut self, view: ViewCommand) -> Self {
        self.initial_view = Some(view);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            trajectory: self.trajectory,
            options: self.options.unwrap_or_default(),
            initial_view: self.initial_view,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the simulation volume and any replayed tracks.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    trajectory: Option<PathBuf>,
    options: Options,
    initial_view: Option<ViewCommand>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Unreadable trajectory files and event-loop failures.
    pub fn run(self) -> Result<(), TrackviewError> {
        let feed = self
            .trajectory
            .as_deref()
            .map(|path| {
                TrajectoryFeed::load(path, self.options.display.points_per_frame)
            })
            .transpose()?;

        let event_loop = EventLoop::new()
            .map_err(|e| TrackviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut frames = RenderLoop::new(self.options.display.target_fps);
        if let Some(feed) = feed {
            frames.set_source(Box::new(feed));
        }
        let mut app = ViewerApp {
            window: None,
            frames,
            options: self.options,
            initial_view: self.initial_view,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TrackviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    frames: RenderLoop<GpuSurface>,
    options: Options,
    initial_view: Option<ViewCommand>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn create_view(
        &self,
        window: &Arc<Window>,
    ) -> Result<ViewController<GpuSurface>, TrackviewError> {
        let (width, height) = viewport_size(window.inner_size());
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(window),
            (width, height),
        ))?;
        let surface = GpuSurface::new(context)?;
        let cameras =
            CameraManager::for_viewport(&self.options.camera, width, height);

        let mut view =
            ViewController::initialize(surface, cameras, &self.options);
        let volume = &self.options.volume;
        if volume.visible {
            view.add_bounding_volume(volume.size, volume.opacity);
        }
        if let Some(command) = self.initial_view {
            view.request_view(command);
        }
        Ok(view)
    }

    fn forward_input(&mut self, event: InputEvent) {
        if let Some(view) = self.frames.view_mut() {
            if view.handle_input(event) {
                self.request_redraw();
            }
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.create_view(&window) {
            Ok(view) => self.frames.initialize(view),
            Err(e) => {
                log::error!("failed to initialize view: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(view) = self.frames.view_mut() {
                    view.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if self.frames.should_render() {
                    if let Err(e) = self.frames.frame() {
                        log::error!("render error: {e}");
                        if matches!(
                            e,
                            TrackviewError::Surface(
                                wgpu::SurfaceError::OutOfMemory
                            )
                        ) {
                            event_loop.exit();
                            return;
                        }
                    }
                }
                self.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let Some(button) = MouseButton::from_winit(button) else {
                    return;
                };
                self.forward_input(InputEvent::MouseButton {
                    button,
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.forward_input(InputEvent::Scroll { delta });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.forward_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if let Some(action) = self.options.keybindings.lookup(&key) {
                    log::debug!("{key} -> {action:?}");
                    if self.frames.handle_key(action) {
                        self.request_redraw();
                    }
                }
            }

            _ => (),
        }
    }
}
