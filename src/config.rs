//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORBSKY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use orbsky_core::{AnimationClock, ClockError};
use orbsky_input::OrbitController;
use orbsky_math::Vec3;
use orbsky_render::PerspectiveCamera;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit controls configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Animation clock configuration
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Scene source
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORBSKY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORBSKY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORBSKY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Replace every section that fails validation with its defaults
    ///
    /// Each replaced section is reported with a warning.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.camera.validate() {
            log::warn!("{}. Using default camera settings.", e);
            self.camera = CameraConfig::default();
        }
        if let Err(e) = self.controls.validate() {
            log::warn!("{}. Using default controls.", e);
            self.controls = ControlsConfig::default();
        }
        if let Err(e) = self.animation.validate() {
            log::warn!("{}. Using default animation clock.", e);
            self.animation = AnimationConfig::default();
        }
        self
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbsky".to_string(),
            width: 960,
            height: 540,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub position: [f32; 3],
    /// Orbit target [x, y, z]
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 75.0],
            target: [0.0, 0.0, 0.0],
            fov: 45.0,
            near: 1.0,
            far: 10000.0,
        }
    }
}

impl CameraConfig {
    /// Reject settings that would produce a degenerate projection or view
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::invalid("camera", format!("fov {} not in (0, 180)", self.fov)));
        }
        if !(self.near > 0.0 && self.near.is_finite()) {
            return Err(ConfigError::invalid("camera", format!("near {} must be positive", self.near)));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::invalid(
                "camera",
                format!("far {} must exceed near {}", self.far, self.near),
            ));
        }
        let position = Vec3::from_array(self.position);
        let target = Vec3::from_array(self.target);
        if !((position - target).length() > 0.0 && (position - target).length().is_finite()) {
            return Err(ConfigError::invalid("camera", "position must differ from target"));
        }
        Ok(())
    }

    /// Build a camera for a viewport of the given size
    pub fn build_camera(&self, width: u32, height: u32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(self.fov, 960.0 / 540.0, self.near, self.far)
            .with_position(Vec3::from_array(self.position))
            .looking_at(Vec3::from_array(self.target));
        camera.set_viewport(width, height);
        camera
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Keep gliding after input stops
    pub enable_damping: bool,
    /// Share of pending motion applied per frame (0..=1)
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Pixels panned per arrow key press
    pub key_pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in degrees (0 = looking down from above)
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.5,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            key_pan_speed: 7.0,
            min_distance: 0.0,
            max_distance: 10000.0,
            min_polar_angle: 0.0,
            max_polar_angle: 180.0,
        }
    }
}

impl ControlsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(ConfigError::invalid(
                "controls",
                format!("damping_factor {} not in [0, 1]", self.damping_factor),
            ));
        }
        for (name, speed) in [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
            ("key_pan_speed", self.key_pan_speed),
        ] {
            if !speed.is_finite() {
                return Err(ConfigError::invalid("controls", format!("{} is {}", name, speed)));
            }
        }
        if !(self.min_distance >= 0.0 && self.max_distance >= self.min_distance) {
            return Err(ConfigError::invalid(
                "controls",
                format!(
                    "distance range [{}, {}] is empty or negative",
                    self.min_distance, self.max_distance
                ),
            ));
        }
        if !(self.min_polar_angle >= 0.0
            && self.max_polar_angle >= self.min_polar_angle
            && self.max_polar_angle <= 180.0)
        {
            return Err(ConfigError::invalid(
                "controls",
                format!(
                    "polar range [{}, {}] must lie within [0, 180] in order",
                    self.min_polar_angle, self.max_polar_angle
                ),
            ));
        }
        Ok(())
    }

    /// Build an orbit controller with these settings
    pub fn build_controller(&self) -> OrbitController {
        OrbitController::new()
            .with_damping(self.enable_damping, self.damping_factor)
            .with_speeds(self.rotate_speed, self.zoom_speed, self.pan_speed)
            .with_key_pan_speed(self.key_pan_speed)
            .with_distance_limits(self.min_distance, self.max_distance)
            .with_polar_limits(
                self.min_polar_angle.to_radians(),
                self.max_polar_angle.to_radians(),
            )
    }
}

/// Animation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Clock increment per frame
    pub time_step: f32,
    /// Clock wraps to zero when reaching this value
    pub period: f32,
    /// Start with the clock paused
    pub paused: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            period: 1.0,
            paused: false,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_clock()
            .map(|_| ())
            .map_err(|e| ConfigError::invalid("animation", e.to_string()))
    }

    pub fn build_clock(&self) -> Result<AnimationClock, ClockError> {
        Ok(AnimationClock::new(self.time_step, self.period)?.with_paused(self.paused))
    }
}

/// Scene source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene file; the built-in scene is used when unset
    pub path: Option<PathBuf>,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Clear color [r, g, b, a], visible only where the sky does not cover
    pub clear_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderingConfig {
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let c = &self.clear_color;
        wgpu::Color {
            r: c[0] as f64,
            g: c[1] as f64,
            b: c[2] as f64,
            a: c[3] as f64,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show frames per second in the window title
    pub show_fps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// A value that parsed but cannot be used
    pub fn invalid(section: &str, message: impl Into<String>) -> Self {
        ConfigError {
            message: format!("[{}] {}", section, message.into()),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
