//! Orbit camera input
//!
//! Turns mouse drags, scroll and arrow keys into orbit/zoom/pan motion
//! around a target point, with optional damping.

mod orbit_controller;

pub use orbit_controller::{CameraControl, DragMode, OrbitController};
