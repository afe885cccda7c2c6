use glam::Vec3;

use super::{RenderSurface, ViewController};
use crate::error::TrackviewError;
use crate::input::KeyAction;
use crate::util::frame_timing::FrameTiming;

/// Frames between smoothed-FPS log lines.
const FPS_REPORT_INTERVAL: u64 = 600;

/// Supplies the trajectory points to append on each frame.
pub trait FrameSource {
    /// Points to append this frame, in order. An empty vector appends
    /// nothing.
    fn next_points(&mut self) -> Vec<Vec3>;

    /// Pause or resume playback.
    fn toggle_playback(&mut self) {}
}

/// Per-frame driver: pulls new points from the source, appends them, then
/// renders.
///
/// The view controller is optional so the loop can exist before the window
/// and GPU surface do; frames requested before
/// [`initialize`](Self::initialize) fail with
/// [`TrackviewError::NotInitialized`].
pub struct RenderLoop<S: RenderSurface> {
    view: Option<ViewController<S>>,
    source: Option<Box<dyn FrameSource>>,
    timing: FrameTiming,
}

impl<S: RenderSurface> RenderLoop<S> {
    /// Loop with no view yet, capped at `target_fps` (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            view: None,
            source: None,
            timing: FrameTiming::new(target_fps, FPS_REPORT_INTERVAL),
        }
    }

    /// Install the view controller. Replaces any previous one.
    pub fn initialize(&mut self, view: ViewController<S>) {
        if self.view.replace(view).is_some() {
            log::warn!("render loop re-initialized; previous view dropped");
        }
    }

    /// Set the per-frame point source.
    pub fn set_source(&mut self, source: Box<dyn FrameSource>) {
        self.source = Some(source);
    }

    /// The view controller, if initialized.
    #[must_use]
    pub fn view(&self) -> Option<&ViewController<S>> {
        self.view.as_ref()
    }

    /// Mutable access to the view controller, if initialized.
    pub fn view_mut(&mut self) -> Option<&mut ViewController<S>> {
        self.view.as_mut()
    }

    /// Whether the frame-rate cap allows drawing now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.timing.should_render()
    }

    /// Run one frame: append this frame's points, then render.
    ///
    /// # Errors
    ///
    /// [`TrackviewError::NotInitialized`] if no view is installed, or any
    /// error from the surface.
    pub fn frame(&mut self) -> Result<(), TrackviewError> {
        let view = self.view.as_mut().ok_or(TrackviewError::NotInitialized)?;

        if let Some(source) = &mut self.source {
            let points = source.next_points();
            let _ = view.append_points(&points);
        }
        view.render_frame()?;

        self.timing.end_frame();
        if self.timing.report_due() {
            log::debug!(
                "{:.1} fps after {} frames",
                self.timing.fps(),
                self.timing.frames()
            );
        }
        Ok(())
    }

    /// Apply a bound key action. Returns `true` if it was handled.
    pub fn handle_key(&mut self, action: KeyAction) -> bool {
        if action == KeyAction::TogglePlayback {
            return self.source.as_mut().is_some_and(|source| {
                source.toggle_playback();
                true
            });
        }
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        match action.view_command() {
            Some(command) => view.request_view(command),
            None => view.toggle_projection(),
        }
        true
    }
}
