//! Render pipelines for the two shader materials
//!
//! Every pipeline shares the same bind group layout shape:
//! group 0 holds the camera uniforms, group 1 the material uniforms.
//! Pipelines differ in shader, culled face and depth writes.

use orbsky_core::{Material, Side};

use super::depth::DEPTH_FORMAT;
use super::mesh::vertex_buffer_layout;

/// Which shader a mesh is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Lit sphere with time-animated bands
    Sphere,
    /// Vertical gradient sky
    Sky,
}

impl MaterialKind {
    pub fn of(material: &Material) -> Self {
        match material {
            Material::Sphere(_) => MaterialKind::Sphere,
            Material::Sky(_) => MaterialKind::Sky,
        }
    }

    fn shader_source(self) -> &'static str {
        match self {
            MaterialKind::Sphere => include_str!("../shaders/sphere.wgsl"),
            MaterialKind::Sky => include_str!("../shaders/sky.wgsl"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            MaterialKind::Sphere => "Sphere",
            MaterialKind::Sky => "Sky",
        }
    }

    /// Sky is a backdrop: it is tested against depth but never occludes
    fn writes_depth(self) -> bool {
        matches!(self, MaterialKind::Sphere)
    }

    /// Draw order; lower draws first
    pub fn draw_order(self) -> u8 {
        match self {
            MaterialKind::Sky => 0,
            MaterialKind::Sphere => 1,
        }
    }
}

/// Face culled for the side that should stay visible
pub fn cull_mode_for(side: Side) -> wgpu::Face {
    match side {
        Side::Front => wgpu::Face::Back,
        Side::Back => wgpu::Face::Front,
    }
}

/// Layout for a single uniform buffer at binding 0
pub fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Create the pipeline drawing `kind` with `side` visible
pub fn create_material_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    camera_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
    kind: MaterialKind,
    side: Side,
) -> wgpu::RenderPipeline {
    let label = kind.label();

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", label)),
        bind_group_layouts: &[camera_layout, material_layout],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} Shader", label)),
        source: wgpu::ShaderSource::Wgsl(kind.shader_source().into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline ({:?})", label, side)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(cull_mode_for(side)),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: kind.writes_depth(),
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
