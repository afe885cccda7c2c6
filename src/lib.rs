// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera and view management for a 3D trajectory viewer, built on wgpu.
//!
//! Trackview shows a cubic simulation volume and particle trajectories
//! appended frame by frame. It offers a free perspective view plus three
//! axis-locked orthographic views, each with navigation tuned to its
//! projection.
//!
//! # Key entry points
//!
//! - [`engine::ViewController`] - owns the scene, the render surface, the
//!   cameras and the single live navigation binding
//! - [`camera::CameraManager`] - the two cameras and which one is active
//! - [`camera::NavigationBinding`] - orbit, pan and zoom for one camera
//! - [`engine::RenderLoop`] - per-frame glue: append points, then render
//! - [`options::Options`] - runtime configuration loaded from TOML
//!
//! # View switching
//!
//! Every switch goes through [`engine::ViewController::request_view`],
//! which releases the current binding before switching cameras and
//! attaching a new one. At most one binding listens to input at any time.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use camera::{CameraManager, PrincipalAxis, ViewState};
pub use engine::{RenderLoop, RenderSurface, ViewCommand, ViewController};
pub use error::TrackviewError;
pub use input::{InputEvent, KeyAction, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
