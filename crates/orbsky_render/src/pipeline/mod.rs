//! Rendering pipeline components
//!
//! GPU data layouts, mesh buffers, the depth target and the per-material
//! render pipelines.

pub mod types;
pub mod mesh;
pub mod depth;
pub mod material_pipeline;

// Re-export types
pub use types::{MeshVertex, CameraUniforms, SphereUniforms, SkyUniforms};

pub use mesh::{GpuMesh, vertex_buffer_layout};
pub use depth::{DepthTexture, DEPTH_FORMAT};
pub use material_pipeline::{MaterialKind, create_material_pipeline, cull_mode_for, uniform_bind_group_layout};
