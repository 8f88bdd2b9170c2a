//! Application systems
//!
//! The window, the GPU and the per-frame animation, kept out of main.rs.

mod animation;
mod render;
mod window;

pub use animation::{AnimationSystem, FrameUpdate};
pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
