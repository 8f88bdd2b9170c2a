//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene renderer (pipelines, meshes, depth buffer)
//! - Resize handling and frame submission

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;
use orbsky_core::Scene;
use orbsky_render::{
    ContextError, PerspectiveCamera, RenderContext, RendererError, SceneRenderer,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU could not be initialised
    Context(ContextError),
    /// Surface was lost or outdated; it has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Frame could not be recorded
    Frame(RendererError),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU initialisation failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Frame(e) => write!(f, "Frame error: {}", e),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl From<RendererError> for RenderError {
    fn from(e: RendererError) -> Self {
        RenderError::Frame(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system for `window` drawing `scene`
    pub fn new(
        window: Arc<Window>,
        scene: &Scene,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let renderer = SceneRenderer::new(
            &context.device,
            context.config.format,
            scene,
            context.config.width,
            context.config.height,
        );

        log::info!(
            "Scene '{}' ready: {} meshes",
            scene.name,
            renderer.mesh_count()
        );

        Ok(Self {
            context,
            renderer,
            clear_color: render_config.wgpu_clear_color(),
        })
    }

    /// Handle window resize
    ///
    /// Reconfigures the surface, resizes the depth buffer and updates the
    /// camera aspect. Zero-sized windows are ignored; returns whether
    /// anything changed.
    pub fn resize(&mut self, size: PhysicalSize<u32>, camera: &mut PerspectiveCamera) -> bool {
        if !self.context.resize(size) {
            log::debug!("Ignoring resize to {}x{}", size.width, size.height);
            return false;
        }
        self.renderer
            .resize(&self.context.device, size.width, size.height);
        camera.set_aspect(self.context.aspect_ratio());
        log::debug!("Resized to {}x{}", size.width, size.height);
        true
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        camera: &PerspectiveCamera,
        time: f32,
    ) -> Result<(), RenderError> {
        self.renderer.update(&self.context.queue, camera, time);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, self.clear_color)?;

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_render_error_from_context() {
        let err: RenderError = ContextError::NoAdapter.into();
        assert_eq!(
            format!("{}", err),
            "GPU initialisation failed: No suitable GPU adapter found"
        );
    }

    #[test]
    fn test_render_error_from_frame() {
        let err: RenderError = RendererError::NoDepthTexture.into();
        assert!(matches!(err, RenderError::Frame(RendererError::NoDepthTexture)));
    }
}
