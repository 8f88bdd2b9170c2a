//! Input mapping from raw events to semantic actions
//!
//! Arrow keys and mouse input are NOT mapped here - they go directly to the
//! OrbitController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by application keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Restore the starting camera (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Pause or resume the animation clock (Space)
    TogglePause,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and for keys the controller handles
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Space => Some(InputAction::TogglePause),
            _ => None,
        }
    }
}
