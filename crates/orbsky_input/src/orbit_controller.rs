//! Orbit controller with damping
//!
//! Controls:
//! - Left drag: orbit around the target
//! - Middle drag: dolly in/out
//! - Right drag: pan in the view plane
//! - Scroll wheel: zoom
//! - Arrow keys: pan
//!
//! Input events only accumulate deltas. [`OrbitController::update`] applies
//! them to the camera once per frame. With damping enabled each update
//! applies `damping_factor` of the pending motion and keeps the rest, so the
//! camera keeps gliding for a few frames after the input stops.

use std::f32::consts::PI;

use orbsky_math::{Spherical, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Motion below this (squared distance) is not reported as a camera change
const MOTION_EPSILON: f32 = 0.000_001;

/// Active mouse drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Dolly,
    Pan,
}

/// Orbit-style camera controller
pub struct OrbitController {
    // Pending motion
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vec3,
    /// Pan requested in pixels, converted to world units in `update`
    pending_pan: (f32, f32),

    // Mouse state
    drag: Option<DragMode>,
    last_cursor: Option<(f64, f64)>,
    viewport_height: f32,

    /// Eye and target restored by `reset`
    saved: Option<(Vec3, Vec3)>,

    // Configuration
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Pixels panned per arrow key press
    pub key_pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians (0 = looking down from +Y)
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            pending_pan: (0.0, 0.0),

            drag: None,
            last_cursor: None,
            viewport_height: 540.0,

            saved: None,

            enable_damping: true,
            damping_factor: 0.5,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            key_pan_speed: 7.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }

    /// Remember the camera's current eye/target as the reset state
    pub fn save_state<C: CameraControl>(&mut self, camera: &C) {
        self.saved = Some((camera.eye(), camera.target()));
    }

    /// Restore the saved eye/target and drop pending motion
    ///
    /// Returns false if no state was saved.
    pub fn reset<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        self.clear_motion();
        self.drag = None;
        match self.saved {
            Some((eye, target)) => {
                camera.set_eye_target(eye, target);
                true
            }
            None => false,
        }
    }

    /// Viewport height in physical pixels; drag distances are relative to it
    pub fn set_viewport_height(&mut self, height: u32) {
        if height > 0 {
            self.viewport_height = height as f32;
        }
    }

    /// Currently active drag, if any
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if state == ElementState::Released {
            self.drag = None;
            return;
        }

        self.drag = match button {
            MouseButton::Left => Some(DragMode::Rotate),
            MouseButton::Middle => Some(DragMode::Dolly),
            MouseButton::Right => Some(DragMode::Pan),
            _ => self.drag,
        };
    }

    /// Process an absolute cursor position (physical pixels)
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        if let (Some(mode), Some((last_x, last_y))) = (self.drag, self.last_cursor) {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            match mode {
                DragMode::Rotate => self.rotate_pixels(dx, dy),
                DragMode::Dolly => {
                    if dy > 0.0 {
                        self.dolly_out(self.zoom_scale());
                    } else if dy < 0.0 {
                        self.dolly_in(self.zoom_scale());
                    }
                }
                DragMode::Pan => self.pan_pixels(dx * self.pan_speed, dy * self.pan_speed),
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Cursor left the window; the next move starts a fresh delta
    pub fn process_cursor_left(&mut self) {
        self.last_cursor = None;
    }

    /// Process scroll wheel input
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
        };
        if notches != 0.0 {
            // Scrolling up (positive) moves the camera closer
            self.scale *= 0.95f32.powf(self.zoom_speed * notches);
        }
    }

    /// Process keyboard input; returns true if the key was consumed
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        let speed = self.key_pan_speed;
        match key {
            KeyCode::ArrowUp => { self.pan_pixels(0.0, speed); true }
            KeyCode::ArrowDown => { self.pan_pixels(0.0, -speed); true }
            KeyCode::ArrowLeft => { self.pan_pixels(speed, 0.0); true }
            KeyCode::ArrowRight => { self.pan_pixels(-speed, 0.0); true }
            _ => false,
        }
    }

    /// Apply pending motion to the camera
    ///
    /// Returns true if the camera moved.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        let eye = camera.eye();
        let mut target = camera.target();
        let offset = eye - target;
        let mut spherical = Spherical::from_vec3(offset);

        self.resolve_pending_pan(offset, camera.fov_y());

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };

        spherical.theta += self.theta_delta * factor;
        spherical.phi += self.phi_delta * factor;
        spherical.phi = clamp_between(spherical.phi, self.min_polar_angle, self.max_polar_angle);
        spherical = spherical.make_safe();
        spherical.radius =
            clamp_between(spherical.radius * self.scale, self.min_distance, self.max_distance);

        target += self.pan_offset * factor;
        let new_eye = target + spherical.to_vec3();

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = (new_eye - eye).length_squared() > MOTION_EPSILON
            || (target - camera.target()).length_squared() > MOTION_EPSILON;
        if moved {
            camera.set_eye_target(new_eye, target);
        }
        moved
    }

    /// Builder: enable or disable damping
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Builder: set rotate, zoom and pan speeds
    pub fn with_speeds(mut self, rotate: f32, zoom: f32, pan: f32) -> Self {
        self.rotate_speed = rotate;
        self.zoom_speed = zoom;
        self.pan_speed = pan;
        self
    }

    /// Builder: set arrow key pan speed in pixels
    pub fn with_key_pan_speed(mut self, speed: f32) -> Self {
        self.key_pan_speed = speed;
        self
    }

    /// Builder: set the allowed eye/target distance
    ///
    /// Swapped bounds are reordered; NaN bounds leave that side unlimited.
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        let (min, max) = ordered(min, max);
        self.min_distance = if min.is_nan() { 0.0 } else { min.max(0.0) };
        self.max_distance = if max.is_nan() { f32::INFINITY } else { max };
        self
    }

    /// Builder: set the allowed polar angle range in radians
    ///
    /// Bounds are reordered and kept within `[0, PI]`.
    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        let (min, max) = ordered(min, max);
        self.min_polar_angle = if min.is_nan() { 0.0 } else { min.clamp(0.0, PI) };
        self.max_polar_angle = if max.is_nan() { PI } else { max.clamp(0.0, PI) };
        self
    }

    fn rotate_pixels(&mut self, dx: f32, dy: f32) {
        let height = self.viewport_height;
        self.theta_delta -= 2.0 * PI * dx / height * self.rotate_speed;
        self.phi_delta -= 2.0 * PI * dy / height * self.rotate_speed;
    }

    fn pan_pixels(&mut self, dx: f32, dy: f32) {
        self.pending_pan.0 += dx;
        self.pending_pan.1 += dy;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    /// Convert pixel pan into a world-space offset in the camera plane
    ///
    /// One viewport height of drag moves the target by the visible height at
    /// the target's distance.
    fn resolve_pending_pan(&mut self, offset: Vec3, fov_y: f32) {
        let (dx, dy) = self.pending_pan;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.pending_pan = (0.0, 0.0);

        let target_distance = offset.length() * (fov_y / 2.0).tan();
        let forward = (-offset).normalized();
        let right = forward.cross(Vec3::Y).normalized();
        let up = right.cross(forward);

        let left_amount = 2.0 * dx * target_distance / self.viewport_height;
        let up_amount = 2.0 * dy * target_distance / self.viewport_height;
        self.pan_offset += right * -left_amount + up * up_amount;
    }

    fn clear_motion(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
        self.pending_pan = (0.0, 0.0);
    }
}

/// `value` limited to the range spanned by `a` and `b`, in either order
///
/// Unlike `f32::clamp` this never panics: a NaN bound is ignored.
fn clamp_between(value: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = ordered(a, b);
    value.max(lo).min(hi)
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    fn eye(&self) -> Vec3;
    fn target(&self) -> Vec3;
    /// Vertical field of view in radians
    fn fov_y(&self) -> f32;
    fn set_eye_target(&mut self, eye: Vec3, target: Vec3);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCamera {
        eye: Vec3,
        target: Vec3,
    }

    impl TestCamera {
        fn new() -> Self {
            Self { eye: Vec3::new(0.0, 0.0, 75.0), target: Vec3::ZERO }
        }
    }

    impl CameraControl for TestCamera {
        fn eye(&self) -> Vec3 { self.eye }
        fn target(&self) -> Vec3 { self.target }
        fn fov_y(&self) -> f32 { 45f32.to_radians() }
        fn set_eye_target(&mut self, eye: Vec3, target: Vec3) {
            self.eye = eye;
            self.target = target;
        }
    }

    fn drag(controller: &mut OrbitController, button: MouseButton, dx: f64, dy: f64) {
        controller.process_mouse_button(button, ElementState::Pressed);
        controller.process_cursor_moved(100.0, 100.0);
        controller.process_cursor_moved(100.0 + dx, 100.0 + dy);
        controller.process_mouse_button(button, ElementState::Released);
    }

    #[test]
    fn test_no_input_no_motion() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new();
        assert!(!controller.update(&mut camera));
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 75.0));
    }

    #[test]
    fn test_rotate_quarter_turn_without_damping() {
        let mut controller = OrbitController::new().with_damping(false, 0.0);
        controller.set_viewport_height(400);
        let mut camera = TestCamera::new();

        // A quarter of the viewport height is a quarter turn
        drag(&mut controller, MouseButton::Left, 100.0, 0.0);
        assert!(controller.update(&mut camera));

        assert!(camera.eye.approx_eq(Vec3::new(-75.0, 0.0, 0.0), 1e-3), "{:?}", camera.eye);
        assert_eq!(camera.target, Vec3::ZERO);
        // Nothing left over
        assert!(!controller.update(&mut camera));
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let mut controller = OrbitController::new().with_damping(true, 0.5);
        controller.set_viewport_height(400);
        let mut camera = TestCamera::new();

        drag(&mut controller, MouseButton::Left, 100.0, 0.0);

        // First frame applies half the quarter turn
        controller.update(&mut camera);
        let theta = Spherical::from_vec3(camera.eye).theta;
        assert!((theta + PI / 4.0).abs() < 1e-4, "theta = {}", theta);

        // Later frames keep gliding towards the full turn
        for _ in 0..30 {
            controller.update(&mut camera);
        }
        let theta = Spherical::from_vec3(camera.eye).theta;
        assert!((theta + PI / 2.0).abs() < 1e-3, "theta = {}", theta);
        assert!((camera.eye.length() - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_zooms_in() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new();

        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!(controller.update(&mut camera));
        assert!((camera.eye.length() - 75.0 * 0.95).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let mut controller = OrbitController::new().with_distance_limits(50.0, 100.0);
        let mut camera = TestCamera::new();

        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 100.0));
        controller.update(&mut camera);
        assert!((camera.eye.length() - 50.0).abs() < 1e-3);

        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, -100.0));
        controller.update(&mut camera);
        assert!((camera.eye.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_never_flips_over_pole() {
        let mut controller = OrbitController::new().with_damping(false, 0.0);
        let mut camera = TestCamera::new();

        // Drag far enough to pass over the top several times
        drag(&mut controller, MouseButton::Left, 0.0, 5000.0);
        controller.update(&mut camera);

        let s = Spherical::from_vec3(camera.eye);
        assert!(s.phi > 0.0);
        assert!(camera.eye.y > 74.9, "{:?}", camera.eye);
    }

    #[test]
    fn test_polar_limits() {
        let mut controller = OrbitController::new()
            .with_damping(false, 0.0)
            .with_polar_limits(PI / 4.0, PI / 2.0);
        let mut camera = TestCamera::new();

        drag(&mut controller, MouseButton::Left, 0.0, 5000.0);
        controller.update(&mut camera);
        let phi = Spherical::from_vec3(camera.eye).phi;
        assert!((phi - PI / 4.0).abs() < 1e-4, "phi = {}", phi);
    }

    #[test]
    fn test_arrow_key_pans_target_and_eye_together() {
        let mut controller = OrbitController::new().with_damping(false, 0.0);
        let mut camera = TestCamera::new();

        assert!(controller.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed));
        assert!(controller.update(&mut camera));

        assert!(camera.target.x < 0.0, "{:?}", camera.target);
        assert!(camera.target.y.abs() < 1e-5);
        let offset = camera.eye - camera.target;
        assert!(offset.approx_eq(Vec3::new(0.0, 0.0, 75.0), 1e-3));
    }

    #[test]
    fn test_right_drag_pans_up() {
        let mut controller = OrbitController::new().with_damping(false, 0.0);
        let mut camera = TestCamera::new();

        drag(&mut controller, MouseButton::Right, 0.0, 50.0);
        controller.update(&mut camera);
        assert!(camera.target.y > 0.0);
        assert!(camera.target.x.abs() < 1e-4);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut controller = OrbitController::new();
        assert!(!controller.process_keyboard(KeyCode::ArrowUp, ElementState::Released));
        assert!(!controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    }

    #[test]
    fn test_cursor_without_drag_does_nothing() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new();
        controller.process_cursor_moved(0.0, 0.0);
        controller.process_cursor_moved(300.0, 300.0);
        assert!(!controller.update(&mut camera));
        assert_eq!(controller.drag_mode(), None);
    }

    #[test]
    fn test_inverted_distance_limits_reordered() {
        let controller = OrbitController::new().with_distance_limits(100.0, 50.0);
        assert_eq!(controller.min_distance, 50.0);
        assert_eq!(controller.max_distance, 100.0);

        let mut controller = controller.with_damping(false, 0.0);
        let mut camera = TestCamera::new();
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut camera);
        assert!((camera.eye.length() - 71.25).abs() < 1e-3);
    }

    #[test]
    fn test_inverted_polar_limits_reordered() {
        let controller = OrbitController::new()
            .with_polar_limits(120f32.to_radians(), 60f32.to_radians());
        assert!((controller.min_polar_angle - 60f32.to_radians()).abs() < 1e-6);
        assert!((controller.max_polar_angle - 120f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_update_survives_bad_limits_set_directly() {
        let mut controller = OrbitController::new().with_damping(false, 0.0);
        controller.min_distance = 100.0;
        controller.max_distance = 50.0;
        controller.min_polar_angle = 2.0;
        controller.max_polar_angle = f32::NAN;
        let mut camera = TestCamera::new();

        drag(&mut controller, MouseButton::Left, 0.0, 40.0);
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut camera);

        let s = Spherical::from_vec3(camera.eye);
        assert!((s.radius - 71.25).abs() < 1e-3, "radius {}", s.radius);
        assert!(s.phi >= 2.0 - 1e-4, "phi {}", s.phi);
    }

    #[test]
    fn test_nan_limits_fall_back_to_unlimited() {
        let controller = OrbitController::new()
            .with_distance_limits(f32::NAN, f32::NAN)
            .with_polar_limits(f32::NAN, f32::NAN);
        assert_eq!(controller.min_distance, 0.0);
        assert_eq!(controller.max_distance, f32::INFINITY);
        assert_eq!(controller.min_polar_angle, 0.0);
        assert_eq!(controller.max_polar_angle, PI);
    }

    #[test]
    fn test_reset_restores_saved_state() {
        let mut controller = OrbitController::new();
        let mut camera = TestCamera::new();
        assert!(!controller.reset(&mut camera));

        controller.save_state(&camera);
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 3.0));
        controller.update(&mut camera);
        assert!(camera.eye.z < 75.0);

        assert!(controller.reset(&mut camera));
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 75.0));
        assert!(!controller.update(&mut camera));
    }
}
