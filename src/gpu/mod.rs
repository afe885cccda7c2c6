//! GPU backend: wgpu device and surface setup, shader composition, scene
//! geometry upload, and the windowed [`GpuSurface`].

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
pub mod geometry;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
pub mod surface;
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use surface::GpuSurface;
