//! Static description of the instancing scene.
//!
//! Everything here is data for the host renderer: where the camera sits, how
//! the scene is lit, what the instanced cube and its outline look like, and
//! which textures the shared material samples. Building meshes and pipelines
//! from it is the renderer's job.

use std::path::PathBuf;

use glam::Vec3;

use crate::camera::Camera;
use crate::color::Color;
use crate::error::InstancingError;
use crate::texture::MaterialTextures;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: Color,
    pub directional: Color,
    pub direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Color::rgba(0.1, 0.1, 0.1, 1.0),
            directional: Color::WHITE,
            direction: Vec3::new(-2.0, -5.0, -2.0),
        }
    }
}

/// The cube every instance draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeMesh {
    pub center: Vec3,
    pub size: Vec3,
    /// Scale applied to the cube's texture coordinates. At `0.5` each face
    /// covers one quadrant of the texture, and the per-instance texture offset
    /// picks which one.
    pub uv_scale: f32,
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec3::ONE,
            uv_scale: 0.5,
        }
    }
}

impl CubeMesh {
    /// Texture coordinate after the quadrant scale and an instance offset.
    pub fn instance_uv(&self, uv: glam::Vec2, offset: glam::Vec2) -> glam::Vec2 {
        uv * self.uv_scale + offset
    }
}

/// Wireframe box drawn around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineBox {
    pub center: Vec3,
    pub size: Vec3,
}

impl Default for OutlineBox {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec3::new(0.8, 0.8, 0.5),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDescription {
    pub diffuse_map: PathBuf,
    pub normal_map: PathBuf,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            diffuse_map: PathBuf::from("TextureCheckerboard2.jpg"),
            normal_map: PathBuf::from("TextureCheckerboard2_dot3.jpg"),
        }
    }
}

impl MaterialDescription {
    /// Decode both texture maps.
    pub fn load(&self) -> Result<MaterialTextures, InstancingError> {
        MaterialTextures::load(&self.diffuse_map, &self.normal_map)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    pub title: String,
    pub camera: Camera,
    pub lighting: Lighting,
    pub mesh: CubeMesh,
    pub outline: OutlineBox,
    pub material: MaterialDescription,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            title: "Instancing Demo".to_string(),
            camera: Camera::default(),
            lighting: Lighting::default(),
            mesh: CubeMesh::default(),
            outline: OutlineBox::default(),
            material: MaterialDescription::default(),
        }
    }
}

impl SceneDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn textures(mut self, diffuse: impl Into<PathBuf>, normal: impl Into<PathBuf>) -> Self {
        self.material = MaterialDescription {
            diffuse_map: diffuse.into(),
            normal_map: normal.into(),
        };
        self
    }
}
