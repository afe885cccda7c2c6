use crate::camera::Camera;
use crate::error::TrackviewError;
use crate::scene::Scene;

/// A drawable target the view controller renders into.
///
/// [`GpuSurface`](crate::gpu::GpuSurface) is the windowed implementation.
pub trait RenderSurface {
    /// Current size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Resize to the given viewport. Zero dimensions must be tolerated.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw `scene` through `camera` and present it.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &dyn Camera,
    ) -> Result<(), TrackviewError>;
}

/// Headless surface that records what it was asked to draw.
#[cfg(test)]
pub(crate) mod recording {
    use glam::Mat4;

    use super::RenderSurface;
    use crate::camera::{Camera, CameraProjection};
    use crate::error::TrackviewError;
    use crate::scene::Scene;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct DrawCall {
        pub(crate) projection: CameraProjection,
        pub(crate) view_proj: Mat4,
        pub(crate) nodes: usize,
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) width: u32,
        pub(crate) height: u32,
        pub(crate) draws: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub(crate) fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                draws: Vec::new(),
            }
        }
    }

    impl RenderSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }

        fn render(
            &mut self,
            scene: &Scene,
            camera: &dyn Camera,
        ) -> Result<(), TrackviewError> {
            self.draws.push(DrawCall {
                projection: camera.projection(),
                view_proj: camera.view_projection(),
                nodes: scene.len(),
            });
            Ok(())
        }
    }
}
