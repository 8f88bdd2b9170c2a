//! Depth buffer that follows the surface size

/// Depth format used by every pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth texture recreated whenever the surface size changes
#[derive(Default)]
pub struct DepthTexture {
    view: Option<wgpu::TextureView>,
    size: (u32, u32),
}

impl DepthTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure depth texture exists and is the right size
    ///
    /// Returns true if a new texture was created.
    pub fn ensure(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        let width = width.max(1);
        let height = height.max(1);
        if self.view.is_some() && self.size == (width, height) {
            return false;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.size = (width, height);
        log::debug!("Depth texture resized to {}x{}", width, height);
        true
    }

    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }
}
