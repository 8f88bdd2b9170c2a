//! Frame timing
//!
//! Tracks delta time between redraws and produces a frames-per-second
//! sample once per reporting interval.

use std::time::{Duration, Instant};

/// Largest delta time handed out, so a stalled frame (window drag, focus
/// loss) does not produce a huge jump
pub const MAX_FRAME_DT: f32 = 0.25;

/// Result of recording one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous frame, capped at [`MAX_FRAME_DT`]
    pub dt: f32,
    /// Set when a reporting interval just completed
    pub fps: Option<f32>,
}

/// Counts frames and reports the frame rate periodically
pub struct FrameCounter {
    last_frame: Instant,
    interval_start: Instant,
    frames_in_interval: u32,
    report_interval: Duration,
    total_frames: u64,
}

impl FrameCounter {
    /// Create a counter reporting once per second
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a counter whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            interval_start: now,
            frames_in_interval: 0,
            report_interval: Duration::from_secs(1),
            total_frames: 0,
        }
    }

    /// Builder: set how often an FPS sample is produced
    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Record a frame happening now
    pub fn frame(&mut self) -> FrameTick {
        self.frame_at(Instant::now())
    }

    /// Record a frame happening at `now`
    pub fn frame_at(&mut self, now: Instant) -> FrameTick {
        let dt = now
            .saturating_duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;
        self.frames_in_interval += 1;
        self.total_frames += 1;

        let elapsed = now.saturating_duration_since(self.interval_start);
        let fps = if elapsed >= self.report_interval && !elapsed.is_zero() {
            let fps = self.frames_in_interval as f32 / elapsed.as_secs_f32();
            self.frames_in_interval = 0;
            self.interval_start = now;
            Some(fps)
        } else {
            None
        };

        FrameTick { dt, fps }
    }

    /// Frames recorded since creation
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_fps_after_interval() {
        let start = Instant::now();
        let mut counter = FrameCounter::starting_at(start);

        for i in 1..60 {
            let tick = counter.frame_at(start + Duration::from_millis(i * 16));
            assert_eq!(tick.fps, None);
        }

        let tick = counter.frame_at(start + Duration::from_secs(1));
        let fps = tick.fps.expect("interval elapsed");
        assert!((fps - 60.0).abs() < 0.01, "fps = {}", fps);
        assert_eq!(counter.total_frames(), 60);
    }

    #[test]
    fn test_dt_is_capped() {
        let start = Instant::now();
        let mut counter = FrameCounter::starting_at(start);
        let tick = counter.frame_at(start + Duration::from_secs(5));
        assert_eq!(tick.dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_dt_between_frames() {
        let start = Instant::now();
        let mut counter = FrameCounter::starting_at(start);
        counter.frame_at(start + Duration::from_millis(10));
        let tick = counter.frame_at(start + Duration::from_millis(30));
        assert!((tick.dt - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_custom_interval() {
        let start = Instant::now();
        let mut counter =
            FrameCounter::starting_at(start).with_report_interval(Duration::from_millis(100));
        let tick = counter.frame_at(start + Duration::from_millis(100));
        assert!(tick.fps.is_some());
    }
}
