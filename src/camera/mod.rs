//! Camera system for viewing the simulation volume.
//!
//! Provides the perspective and orthographic cameras, the manager that owns
//! both and tracks which is active, and the orbit-style navigation binding.

/// Principal axes for orthographic viewpoints.
pub mod axis;
/// Orbit navigation binding: rotation, pan, zoom and damping.
pub mod controller;
/// Camera structs, the shared camera trait, and GPU uniform types.
pub mod core;
/// Active-camera bookkeeping.
pub mod manager;

pub use axis::PrincipalAxis;
pub use controller::NavigationBinding;
pub use self::core::{
    aspect_ratio, Camera, CameraProjection, CameraUniform, OrthographicCamera,
    PerspectiveCamera, Pose,
};
pub use manager::{CameraManager, ViewState};
