//! Per-frame animation system
//!
//! Runs the CPU side of every redraw:
//! - Frame timing and FPS sampling
//! - Animation clock tick (the shader `time` uniform)
//! - Orbit controller update

use std::time::Instant;
use orbsky_core::{AnimationClock, FrameCounter};
use orbsky_input::OrbitController;
use orbsky_render::PerspectiveCamera;

/// Result of one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    /// Clock value to upload this frame
    pub time: f32,
    /// Set once per reporting interval
    pub fps: Option<f32>,
    /// Whether the controller moved the camera
    pub camera_moved: bool,
}

/// Drives the clock and camera between redraws
pub struct AnimationSystem {
    frames: FrameCounter,
    clock: AnimationClock,
    last_fps: Option<f32>,
}

impl AnimationSystem {
    pub fn new(clock: AnimationClock) -> Self {
        Self::starting_at(clock, Instant::now())
    }

    /// Create a system whose frame timing starts at `now`
    pub fn starting_at(clock: AnimationClock, now: Instant) -> Self {
        Self {
            frames: FrameCounter::starting_at(now),
            clock,
            last_fps: None,
        }
    }

    /// Run one frame now
    pub fn update(
        &mut self,
        camera: &mut PerspectiveCamera,
        controller: &mut OrbitController,
    ) -> FrameUpdate {
        self.update_at(Instant::now(), camera, controller)
    }

    /// Run one frame at `now`
    pub fn update_at(
        &mut self,
        now: Instant,
        camera: &mut PerspectiveCamera,
        controller: &mut OrbitController,
    ) -> FrameUpdate {
        let tick = self.frames.frame_at(now);
        let time = self.clock.tick();
        let camera_moved = controller.update(camera);

        if let Some(fps) = tick.fps {
            self.last_fps = Some(fps);
            log::debug!("{:.1} FPS ({} frames total)", fps, self.frames.total_frames());
        }

        FrameUpdate {
            time,
            fps: tick.fps,
            camera_moved,
        }
    }

    /// Pause or resume the clock, returning whether it is now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.clock.toggle_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Most recent FPS sample, held between reporting intervals
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use winit::event::MouseScrollDelta;

    fn setup() -> (AnimationSystem, PerspectiveCamera, OrbitController) {
        (
            AnimationSystem::new(AnimationClock::default()),
            PerspectiveCamera::default(),
            OrbitController::new(),
        )
    }

    #[test]
    fn test_time_cycles_through_clock() {
        let (mut system, mut camera, mut controller) = setup();
        let start = Instant::now();

        let times: Vec<f32> = (0..12)
            .map(|i| {
                let now = start + Duration::from_millis(16 * i);
                system.update_at(now, &mut camera, &mut controller).time
            })
            .collect();

        assert_eq!(times[0], 0.0);
        assert!((times[9] - 0.9).abs() < 1e-6);
        assert_eq!(times[10], 0.0);
        assert!(times.iter().all(|t| (0.0..1.0).contains(t)));
    }

    #[test]
    fn test_paused_clock_holds_time() {
        let (mut system, mut camera, mut controller) = setup();
        system.update(&mut camera, &mut controller);
        assert!(system.toggle_pause());

        let a = system.update(&mut camera, &mut controller).time;
        let b = system.update(&mut camera, &mut controller).time;
        assert_eq!(a, b);
        assert!(system.is_paused());
    }

    #[test]
    fn test_controller_applied_each_frame() {
        let (mut system, mut camera, mut controller) = setup();
        let start = Instant::now();

        let idle = system.update_at(start, &mut camera, &mut controller);
        assert!(!idle.camera_moved);

        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        let zoomed = system.update_at(start + Duration::from_millis(16), &mut camera, &mut controller);
        assert!(zoomed.camera_moved);
        assert!(camera.position.z < 75.0);
    }

    #[test]
    fn test_fps_reported_after_interval() {
        let start = Instant::now();
        let mut system = AnimationSystem::starting_at(AnimationClock::default(), start);
        let mut camera = PerspectiveCamera::default();
        let mut controller = OrbitController::new();

        let mut reported = None;
        for i in 1..=70u64 {
            let now = start + Duration::from_millis(16 * i);
            if let Some(fps) = system.update_at(now, &mut camera, &mut controller).fps {
                reported = Some(fps);
                break;
            }
        }
        let fps = reported.expect("no FPS sample within 70 frames");
        assert!(fps > 50.0 && fps < 70.0, "fps = {}", fps);
    }

    #[test]
    fn test_last_fps_survives_pause_toggle() {
        let start = Instant::now();
        let mut system = AnimationSystem::starting_at(AnimationClock::default(), start);
        let mut camera = PerspectiveCamera::default();
        let mut controller = OrbitController::new();
        assert_eq!(system.last_fps(), None);

        let mut i = 0u64;
        let sample = loop {
            i += 1;
            let now = start + Duration::from_millis(16 * i);
            if let Some(fps) = system.update_at(now, &mut camera, &mut controller).fps {
                break fps;
            }
            assert!(i < 70, "no FPS sample within 70 frames");
        };

        // Frames between samples report no FPS but the last sample is kept
        let next = system.update_at(start + Duration::from_millis(16 * (i + 1)), &mut camera, &mut controller);
        assert_eq!(next.fps, None);
        assert!(system.toggle_pause());
        assert_eq!(system.last_fps(), Some(sample));
    }
}
