//! GPU-compatible data types for the mesh pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use orbsky_core::{AmbientLight, DirectionalLight, SkyMaterial, SphereMaterial};
use orbsky_math::mat4;

use crate::camera::PerspectiveCamera;

/// A mesh vertex with normal and texture coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Camera uniforms shared by every material (group 0)
/// Layout: 144 bytes (must match `Camera` in the WGSL shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Eye position + padding (16 bytes)
    pub camera_position: [f32; 3],
    pub _padding: f32,
}

impl CameraUniforms {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        Self {
            view_matrix: camera.view_matrix(),
            projection_matrix: camera.projection_matrix(),
            camera_position: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            camera_position: [0.0; 3],
            _padding: 0.0,
        }
    }
}

/// Sphere material uniforms (group 1 of the sphere pipeline)
/// Layout: 128 bytes (must match `SphereMaterial` in sphere.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereUniforms {
    pub diffuse: [f32; 4],
    pub emissive: [f32; 4],
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    /// Ambient color premultiplied by intensity
    pub ambient_light: [f32; 4],
    /// Directional light color premultiplied by intensity
    pub light_color: [f32; 4],
    /// Unit vector towards the directional light
    pub light_direction: [f32; 4],
    /// Animation clock value
    pub time: f32,
    pub _padding: [f32; 3],
}

impl SphereUniforms {
    pub fn new(
        material: &SphereMaterial,
        directional: &DirectionalLight,
        ambient: &AmbientLight,
        time: f32,
    ) -> Self {
        let dir = directional.direction();
        Self {
            diffuse: material.diffuse.to_rgba(1.0),
            emissive: material.emissive.to_rgba(1.0),
            color1: material.color1.to_rgba(1.0),
            color2: material.color2.to_rgba(1.0),
            ambient_light: ambient.color.scaled(ambient.intensity).to_rgba(1.0),
            light_color: directional.color.scaled(directional.intensity).to_rgba(1.0),
            light_direction: [dir.x, dir.y, dir.z, 0.0],
            time,
            _padding: [0.0; 3],
        }
    }
}

/// Sky material uniforms (group 1 of the sky pipeline)
/// Layout: 48 bytes (must match `SkyMaterial` in sky.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SkyUniforms {
    pub top_color: [f32; 4],
    pub bottom_color: [f32; 4],
    pub offset: f32,
    pub exponent: f32,
    pub _padding: [f32; 2],
}

impl From<&SkyMaterial> for SkyUniforms {
    fn from(material: &SkyMaterial) -> Self {
        Self {
            top_color: material.top_color.to_rgba(1.0),
            bottom_color: material.bottom_color.to_rgba(1.0),
            offset: material.offset,
            exponent: material.exponent,
            _padding: [0.0; 2],
        }
    }
}
