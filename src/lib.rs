//! Orbsky - orbiting a shader-lit sphere under a gradient sky
//!
//! The binary wires these modules into a winit application; they are exposed
//! as a library so integration tests can reach the configuration.

pub mod config;
pub mod input;
pub mod systems;
