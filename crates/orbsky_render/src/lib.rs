//! Orbsky Rendering Library
//!
//! This crate provides the wgpu-based rendering of the sphere and the sky
//! dome.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - eye/target camera with cached projection
//! - [`geometry::SphereGeometry`] - UV sphere mesh generation
//! - [`pipeline`] - uniform layouts, mesh buffers and material pipelines
//! - [`renderer::SceneRenderer`] - draws a [`Scene`] in one pass

pub mod context;
pub mod camera;
pub mod geometry;
pub mod pipeline;
pub mod renderer;

// Re-export core types for convenience
pub use orbsky_core::{Material, MeshDesc, Scene, Side};
pub use orbsky_math::{Color, Vec3};

pub use camera::PerspectiveCamera;
pub use context::{ContextError, RenderContext};
pub use geometry::SphereGeometry;
pub use renderer::{RendererError, SceneRenderer};
