//! Orbsky - orbit a shader-lit sphere under a gradient sky
//!
//! Left drag orbits, right drag or arrow keys pan, the wheel zooms.
//! R resets the camera, F toggles fullscreen, Space pauses the animation,
//! Escape quits.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orbsky::config::AppConfig;
use orbsky::input::{InputAction, InputMapper};
use orbsky::systems::{AnimationSystem, RenderError, RenderSystem, WindowSystem};
use orbsky_core::{AnimationClock, Scene};
use orbsky_input::OrbitController;
use orbsky_render::PerspectiveCamera;

/// Main application state
struct App {
    config: AppConfig,
    scene: Scene,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    camera: PerspectiveCamera,
    controller: OrbitController,
    animation: AnimationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = match &config.scene.path {
            Some(path) => Scene::load(path).unwrap_or_else(|e| {
                log::warn!("Failed to load scene {}: {}. Using built-in scene.", path.display(), e);
                Scene::default_scene()
            }),
            None => Scene::default_scene(),
        };

        let camera = config
            .camera
            .build_camera(config.window.width, config.window.height);

        let mut controller = config.controls.build_controller();
        controller.save_state(&camera);

        let clock = config.animation.build_clock().unwrap_or_else(|e| {
            log::warn!("{}. Using default animation clock.", e);
            AnimationClock::default()
        });

        Self {
            config,
            scene,
            window: None,
            render: None,
            camera,
            controller,
            animation: AnimationSystem::new(clock),
        }
    }

    /// FPS to show in the title, if enabled and sampled yet
    fn title_fps(&self) -> Option<f32> {
        if self.config.debug.show_fps {
            self.animation.last_fps()
        } else {
            None
        }
    }

    /// Follow a new drawable size
    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if let Some(render) = &mut self.render {
            if render.resize(size, &mut self.camera) {
                self.controller.set_viewport_height(size.height);
            }
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                if self.controller.reset(&mut self.camera) {
                    log::info!("Camera reset");
                }
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::TogglePause => {
                let paused = self.animation.toggle_pause();
                log::info!("Animation {}", if paused { "paused" } else { "resumed" });
                if let Some(window) = &self.window {
                    window.update_title(self.title_fps(), paused);
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self
            .animation
            .update(&mut self.camera, &mut self.controller);

        if frame.fps.is_some() {
            if let Some(window) = &self.window {
                window.update_title(self.title_fps(), self.animation.is_paused());
            }
        }

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.camera, frame.time) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => log::debug!("Surface reconfigured"),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            &self.scene,
            &self.config.rendering,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);

        // Replace the configured size with the real one straight away
        self.resize(size);
        log::info!("Window ready: {}x{}", size.width, size.height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let action = if event.repeat {
                        None
                    } else {
                        InputMapper::map_keyboard(key, event.state)
                    };
                    match action {
                        Some(action) => self.handle_action(action, event_loop),
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.controller.process_cursor_left();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface before the window it was created from
        self.render.take();
        self.window.take();
        log::info!("Shut down");
    }
}

fn main() {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded
        .unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        })
        .sanitized();
    log::info!("Starting Orbsky");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
