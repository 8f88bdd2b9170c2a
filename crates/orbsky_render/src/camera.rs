//! Perspective camera
//!
//! Holds the eye, the point it looks at and the projection intrinsics.
//! The projection matrix is cached and only rebuilt when an intrinsic
//! changes, mirroring how the aspect ratio is only touched on resize.

use orbsky_input::CameraControl;
use orbsky_math::{mat4, Mat4, Vec3};

/// Perspective camera looking from `position` at `target`
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(45.0, 960.0 / 540.0, 1.0, 10000.0).with_position(Vec3::new(0.0, 0.0, 75.0))
    }
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y_degrees,
            aspect,
            near,
            far,
            projection: mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Builder: set the eye position, keeping the origin as target
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.target = Vec3::ZERO;
        self
    }

    /// Builder: set the look-at target
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Rebuild the cached projection from the current intrinsics
    pub fn update_projection_matrix(&mut self) {
        self.projection = mat4::perspective(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    /// Set the aspect ratio and rebuild the projection
    ///
    /// Returns false (and leaves the camera untouched) for zero, negative or
    /// non-finite ratios, e.g. from a minimised window.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !aspect.is_finite() || aspect <= 0.0 {
            return false;
        }
        self.aspect = aspect;
        self.update_projection_matrix();
        true
    }

    /// Set the aspect ratio from a viewport size in pixels
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.set_aspect(width as f32 / height as f32)
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Cached projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, self.up)
    }

    /// Combined projection * view
    pub fn view_projection(&self) -> Mat4 {
        mat4::mul(self.projection, self.view_matrix())
    }
}

impl CameraControl for PerspectiveCamera {
    fn eye(&self) -> Vec3 {
        self.position
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn fov_y(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    fn set_eye_target(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye;
        self.target = target;
    }
}
