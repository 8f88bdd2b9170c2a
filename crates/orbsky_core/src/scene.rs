//! Scene description
//!
//! A scene is a flat list of sphere meshes, each paired with one of the two
//! shader materials, plus the lights the sphere shader reads. Scenes can be
//! built in code ([`Scene::default_scene`]) or loaded from RON files.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use orbsky_math::{Color, Vec3};

/// UV sphere parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereGeometryDesc {
    pub radius: f32,
    /// Number of segments around the equator
    pub width_segments: u32,
    /// Number of segments from pole to pole
    pub height_segments: u32,
}

impl SphereGeometryDesc {
    /// Largest segment count accepted along either axis
    ///
    /// At this size the mesh has about a million vertices and its vertex and
    /// index counts still fit in `u32`.
    pub const MAX_SEGMENTS: u32 = 1024;

    pub const fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self { radius, width_segments, height_segments }
    }

    /// Vertex count of the generated mesh, or `None` if it overflows `u32`
    pub fn vertex_count(&self) -> Option<u32> {
        self.width_segments
            .checked_add(1)?
            .checked_mul(self.height_segments.checked_add(1)?)
    }
}

/// Which side of a mesh's triangles are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Outward-facing triangles (normal meshes)
    #[default]
    Front,
    /// Inward-facing triangles (the inside of a dome)
    Back,
}

/// Uniforms of the lit, time-animated sphere shader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereMaterial {
    pub diffuse: Color,
    pub emissive: Color,
    /// First band color
    pub color1: Color,
    /// Second band color
    pub color2: Color,
}

impl Default for SphereMaterial {
    fn default() -> Self {
        Self {
            diffuse: Color::from_hex(0xffffff),
            emissive: Color::from_hex(0x000000),
            color1: Color::from_hex(0xffffff),
            color2: Color::from_hex(0xcccccc),
        }
    }
}

/// Uniforms of the vertical gradient sky shader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyMaterial {
    pub top_color: Color,
    pub bottom_color: Color,
    /// Added to the world position's height before normalizing
    pub offset: f32,
    /// Gradient curve; below 1.0 pushes the top color towards the horizon
    pub exponent: f32,
}

impl Default for SkyMaterial {
    fn default() -> Self {
        Self {
            top_color: Color::from_hex(0xcdcdcd),
            bottom_color: Color::from_hex(0xffffff),
            offset: 0.0,
            exponent: 0.6,
        }
    }
}

/// Shader material of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    Sphere(SphereMaterial),
    Sky(SkyMaterial),
}

/// Parallel light shining from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalized()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffffff),
            intensity: 0.21,
            position: Vec3::new(10.0, 10.0, 10.0),
        }
    }
}

/// Uniform light applied to every surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffffff),
            intensity: 0.5,
        }
    }
}

/// A mesh in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDesc {
    pub name: String,
    pub geometry: SphereGeometryDesc,
    pub material: Material,
    #[serde(default)]
    pub side: Side,
}

impl MeshDesc {
    pub fn new(name: impl Into<String>, geometry: SphereGeometryDesc, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            side: Side::Front,
        }
    }

    /// Builder: set the drawn side
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    pub meshes: Vec<MeshDesc>,
    #[serde(default)]
    pub directional_light: DirectionalLight,
    #[serde(default)]
    pub ambient_light: AmbientLight,
}

impl Scene {
    /// Name of the lit sphere in [`Scene::default_scene`]
    pub const SPHERE: &'static str = "sphere";
    /// Name of the sky dome in [`Scene::default_scene`]
    pub const SKY: &'static str = "sky";

    /// Create an empty scene with default lights
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            directional_light: DirectionalLight::default(),
            ambient_light: AmbientLight::default(),
        }
    }

    /// The demo scene: a lit sphere inside a gradient sky dome
    pub fn default_scene() -> Self {
        let mut scene = Self::new("Orbsky");
        scene.add_mesh(MeshDesc::new(
            Self::SPHERE,
            SphereGeometryDesc::new(15.0, 32, 16),
            Material::Sphere(SphereMaterial::default()),
        ));
        scene.add_mesh(
            MeshDesc::new(
                Self::SKY,
                SphereGeometryDesc::new(4000.0, 32, 15),
                Material::Sky(SkyMaterial::default()),
            )
            .with_side(Side::Back),
        );
        scene
    }

    /// Add a mesh to this scene
    pub fn add_mesh(&mut self, mesh: MeshDesc) {
        self.meshes.push(mesh);
    }

    /// Find a mesh by name
    pub fn find(&self, name: &str) -> Option<&MeshDesc> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// First mesh using the sphere shader
    pub fn sphere_mesh(&self) -> Option<&MeshDesc> {
        self.meshes
            .iter()
            .find(|m| matches!(m.material, Material::Sphere(_)))
    }

    /// First mesh using the sky shader
    pub fn sky_mesh(&self) -> Option<&MeshDesc> {
        self.meshes
            .iter()
            .find(|m| matches!(m.material, Material::Sky(_)))
    }

    /// Check geometry parameters before anything is uploaded
    pub fn validate(&self) -> Result<(), SceneValidationError> {
        for mesh in &self.meshes {
            let g = &mesh.geometry;
            if !(g.radius.is_finite() && g.radius > 0.0) {
                return Err(SceneValidationError::InvalidRadius {
                    mesh: mesh.name.clone(),
                    radius: g.radius,
                });
            }
            if g.width_segments < 3 || g.height_segments < 2 {
                return Err(SceneValidationError::TooFewSegments {
                    mesh: mesh.name.clone(),
                    width: g.width_segments,
                    height: g.height_segments,
                });
            }
            if g.width_segments > SphereGeometryDesc::MAX_SEGMENTS
                || g.height_segments > SphereGeometryDesc::MAX_SEGMENTS
                || g.vertex_count().is_none()
            {
                return Err(SceneValidationError::TooManySegments {
                    mesh: mesh.name.clone(),
                    width: g.width_segments,
                    height: g.height_segments,
                });
            }
        }
        Ok(())
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scene: Scene = ron::from_str(&contents)?;
        scene.validate()?;
        log::info!(
            "Loaded scene '{}' ({} meshes) from {}",
            scene.name,
            scene.meshes.len(),
            path.display()
        );
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path.as_ref(), contents)?;
        log::debug!("Saved scene '{}' to {}", self.name, path.as_ref().display());
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::default_scene()
    }
}

/// Scene contents that cannot be turned into geometry
#[derive(Debug, Clone, PartialEq)]
pub enum SceneValidationError {
    InvalidRadius { mesh: String, radius: f32 },
    TooFewSegments { mesh: String, width: u32, height: u32 },
    TooManySegments { mesh: String, width: u32, height: u32 },
}

impl std::fmt::Display for SceneValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneValidationError::InvalidRadius { mesh, radius } => {
                write!(f, "Mesh '{}' has invalid radius {}", mesh, radius)
            }
            SceneValidationError::TooFewSegments { mesh, width, height } => write!(
                f,
                "Mesh '{}' needs at least 3x2 segments, got {}x{}",
                mesh, width, height
            ),
            SceneValidationError::TooManySegments { mesh, width, height } => write!(
                f,
                "Mesh '{}' allows at most {}x{} segments, got {}x{}",
                mesh,
                SphereGeometryDesc::MAX_SEGMENTS,
                SphereGeometryDesc::MAX_SEGMENTS,
                width,
                height
            ),
        }
    }
}

impl std::error::Error for SceneValidationError {}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Parsed, but the contents are unusable
    Invalid(SceneValidationError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl From<SceneValidationError> for SceneLoadError {
    fn from(e: SceneValidationError) -> Self {
        SceneLoadError::Invalid(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::Invalid(e) => write!(f, "Invalid scene: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
