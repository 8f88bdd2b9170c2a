//! Orbsky Mathematics Library
//!
//! Small 3D math toolkit used by the camera, the orbit controller and the
//! GPU uniform layouts.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - column-major 4x4 matrix plus projection/view helpers
//! - [`Color`] - linear RGB color built from `0xRRGGBB` literals
//! - [`Spherical`] - radius/polar/azimuth coordinates for orbiting

mod vec3;
mod color;
pub mod mat4;
pub mod spherical;

pub use vec3::Vec3;
pub use color::Color;
pub use mat4::Mat4;
pub use spherical::Spherical;
