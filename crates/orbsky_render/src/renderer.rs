//! Scene renderer
//!
//! Turns a [`Scene`] into GPU meshes with per-mesh material uniforms and
//! draws them in one render pass. Pipelines are built once per
//! (material, side) pair and shared between meshes.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use orbsky_core::{Material, Scene, Side};

use crate::camera::PerspectiveCamera;
use crate::geometry::SphereGeometry;
use crate::pipeline::{
    create_material_pipeline, uniform_bind_group_layout, CameraUniforms, DepthTexture, GpuMesh,
    MaterialKind, SkyUniforms, SphereUniforms,
};

/// One mesh ready to draw
struct MeshDraw {
    name: String,
    material: Material,
    kind: MaterialKind,
    side: Side,
    mesh: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every mesh of a scene
pub struct SceneRenderer {
    scene: Scene,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    pipelines: HashMap<(MaterialKind, Side), wgpu::RenderPipeline>,
    /// Sorted by draw order (sky first)
    draws: Vec<MeshDraw>,
    depth: DepthTexture,
}

impl SceneRenderer {
    /// Build GPU resources for `scene`
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene: &Scene,
        width: u32,
        height: u32,
    ) -> Self {
        let camera_layout = uniform_bind_group_layout(device, "Camera Bind Group Layout");
        let material_layout = uniform_bind_group_layout(device, "Material Bind Group Layout");

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let mut pipelines = HashMap::new();
        let mut draws = Vec::with_capacity(scene.meshes.len());

        for desc in &scene.meshes {
            let kind = MaterialKind::of(&desc.material);
            pipelines.entry((kind, desc.side)).or_insert_with(|| {
                create_material_pipeline(
                    device,
                    surface_format,
                    &camera_layout,
                    &material_layout,
                    kind,
                    desc.side,
                )
            });

            let geometry = SphereGeometry::from_desc(&desc.geometry);
            let mesh = GpuMesh::from_sphere(device, &desc.name, &geometry);

            let contents = material_bytes(scene, &desc.material, 0.0);
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Material Buffer", desc.name)),
                contents: &contents,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} Material Bind Group", desc.name)),
                layout: &material_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            log::info!(
                "Mesh '{}': {:?} material, {} vertices, {} triangles",
                desc.name,
                kind,
                geometry.vertex_count(),
                geometry.triangle_count()
            );

            draws.push(MeshDraw {
                name: desc.name.clone(),
                material: desc.material,
                kind,
                side: desc.side,
                mesh,
                uniform_buffer,
                bind_group,
            });
        }

        // Stable sort keeps scene order within a material
        draws.sort_by_key(|d| d.kind.draw_order());

        let mut depth = DepthTexture::new();
        depth.ensure(device, width, height);

        Self {
            scene: scene.clone(),
            camera_buffer,
            camera_bind_group,
            pipelines,
            draws,
            depth,
        }
    }

    /// Follow a surface resize
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.ensure(device, width, height);
    }

    /// Upload this frame's camera and time-dependent material uniforms
    pub fn update(&self, queue: &wgpu::Queue, camera: &PerspectiveCamera, time: f32) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms::from_camera(camera)),
        );

        for draw in self.draws.iter().filter(|d| d.kind == MaterialKind::Sphere) {
            queue.write_buffer(
                &draw.uniform_buffer,
                0,
                &material_bytes(&self.scene, &draw.material, time),
            );
        }
    }

    /// Record the scene into `encoder`, clearing `view` first
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) -> Result<(), RendererError> {
        let depth_view = self.depth.view().ok_or(RendererError::NoDepthTexture)?;

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for draw in &self.draws {
            let pipeline = self
                .pipelines
                .get(&(draw.kind, draw.side))
                .ok_or_else(|| RendererError::MissingPipeline(draw.name.clone()))?;
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &draw.bind_group, &[]);
            draw.mesh.draw(&mut render_pass);
        }

        Ok(())
    }

    /// Number of meshes drawn per frame
    pub fn mesh_count(&self) -> usize {
        self.draws.len()
    }
}

/// Uniform bytes for a material at the given clock value
fn material_bytes(scene: &Scene, material: &Material, time: f32) -> Vec<u8> {
    match material {
        Material::Sphere(m) => bytemuck::bytes_of(&SphereUniforms::new(
            m,
            &scene.directional_light,
            &scene.ambient_light,
            time,
        ))
        .to_vec(),
        Material::Sky(m) => bytemuck::bytes_of(&SkyUniforms::from(m)).to_vec(),
    }
}

/// Failure while recording a frame
#[derive(Debug, Clone, PartialEq)]
pub enum RendererError {
    NoDepthTexture,
    MissingPipeline(String),
}

impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererError::NoDepthTexture => write!(f, "Depth texture not created"),
            RendererError::MissingPipeline(mesh) => write!(f, "No pipeline for mesh '{}'", mesh),
        }
    }
}

impl std::error::Error for RendererError {}
