use web_time::{Duration, Instant};

/// Smoothing weight of the newest frame in the FPS moving average.
const FPS_SMOOTHING: f32 = 0.05;

/// Frame pacing and smoothed FPS.
///
/// Stands in for an on-screen stats panel: the render loop asks
/// [`report_due`](Self::report_due) and logs [`fps`](Self::fps) when it is.
#[derive(Debug)]
pub struct FrameTiming {
    /// Minimum frame duration (zero = unlimited).
    min_frame_duration: Duration,
    last_frame: Instant,
    smoothed_fps: f32,
    frames: u64,
    /// Frames between FPS reports (0 = never).
    report_every: u64,
}

impl FrameTiming {
    /// Timer capped at `target_fps` (0 = unlimited) that reports every
    /// `report_every` frames.
    #[must_use]
    pub fn new(target_fps: u32, report_every: u64) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            frames: 0,
            report_every,
        }
    }

    /// Whether enough time has passed since the last frame to draw another.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.min_frame_duration.is_zero()
            || self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record a finished frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - FPS_SMOOTHING)
                + FPS_SMOOTHING / frame_time;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the frame just recorded should trigger an FPS report.
    #[must_use]
    pub fn report_due(&self) -> bool {
        self.report_every > 0
            && self.frames > 0
            && self.frames % self.report_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0, 0);
        assert!(timing.should_render());
    }

    #[test]
    fn capped_waits_for_frame_budget() {
        let mut timing = FrameTiming::new(1, 0);
        timing.end_frame();
        assert!(!timing.should_render());
    }

    #[test]
    fn reports_on_interval() {
        let mut timing = FrameTiming::new(0, 3);
        let mut due = Vec::new();
        for _ in 0..6 {
            timing.end_frame();
            due.push(timing.report_due());
        }
        assert_eq!(due, vec![false, false, true, false, false, true]);
        assert_eq!(timing.frames(), 6);
        assert!(timing.fps() > 0.0);
    }
}
