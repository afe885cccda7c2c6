//! Frame pacing and recorded-trajectory playback.

/// Frame-rate cap and smoothed FPS.
pub mod frame_timing;
pub mod trajectory;
