//! Spherical coordinates around the Y axis
//!
//! `phi` is the polar angle measured from +Y, `theta` the azimuth measured
//! from +Z towards +X. This is the parameterisation the orbit controller
//! rotates in.

use crate::Vec3;

/// Distance from the poles kept by [`Spherical::make_safe`]
///
/// Large enough that `cos(POLE_EPSILON)` is still below 1.0 in f32, so a
/// clamped angle survives a trip through cartesian coordinates.
pub const POLE_EPSILON: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert an offset vector into spherical coordinates
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Convert back into a cartesian offset
    pub fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` strictly between the poles so the view's up vector stays defined
    pub fn make_safe(mut self) -> Self {
        self.phi = self
            .phi
            .clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        self
    }
}
