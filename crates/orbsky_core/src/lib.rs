//! Core types for Orbsky
//!
//! - [`AnimationClock`] - fixed-step clock behind the `time` shader uniform
//! - [`FrameCounter`] - delta time and periodic FPS samples
//! - [`Scene`] - meshes, materials and lights, loadable from RON

mod clock;
mod frame;
mod scene;

pub use clock::{AnimationClock, ClockError};
pub use frame::{FrameCounter, FrameTick, MAX_FRAME_DT};
pub use scene::{
    AmbientLight, DirectionalLight, Material, MeshDesc, Scene, SceneLoadError, SceneSaveError,
    SceneValidationError, Side, SkyMaterial, SphereGeometryDesc, SphereMaterial,
};

// Re-export commonly used types from orbsky_math for convenience
pub use orbsky_math::{Color, Vec3};
