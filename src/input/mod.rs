//! Input handling module
//!
//! Maps raw key events to application-level actions. Camera input goes to
//! the orbit controller instead.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
