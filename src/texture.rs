use std::path::{Path, PathBuf};

use crate::error::InstancingError;

/// Decoded RGBA8 image ready for upload by the renderer.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Load a texture from an image file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InstancingError> {
        let path = path.as_ref().to_path_buf();
        let img = image::open(&path).map_err(unavailable(&path))?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            path,
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    /// Load a texture from embedded bytes. `label` stands in for the path.
    pub fn from_bytes(bytes: &[u8], label: &str) -> Result<Self, InstancingError> {
        let path = PathBuf::from(label);
        let img = image::load_from_memory(bytes)
            .map_err(unavailable(&path))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            path,
            width,
            height,
            pixels: img.into_raw(),
        })
    }
}

fn unavailable(path: &Path) -> impl FnOnce(image::ImageError) -> InstancingError {
    let path = path.to_path_buf();
    move |e| InstancingError::ResourceUnavailable {
        path,
        reason: e.to_string(),
    }
}

/// The diffuse and normal maps shared by every cube instance.
#[derive(Clone, Debug)]
pub struct MaterialTextures {
    pub diffuse: TextureImage,
    pub normal: TextureImage,
}

impl MaterialTextures {
    /// Load both maps. Fails on the first map that cannot be read.
    pub fn load(
        diffuse: impl AsRef<Path>,
        normal: impl AsRef<Path>,
    ) -> Result<Self, InstancingError> {
        let diffuse = TextureImage::from_file(diffuse)?;
        let normal = TextureImage::from_file(normal)?;
        tracing::debug!(
            diffuse = %diffuse.path.display(),
            normal = %normal.path.display(),
            "material textures loaded"
        );
        Ok(Self { diffuse, normal })
    }
}
