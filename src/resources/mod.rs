//! Loading of card images from external files.
//!
//! Native builds read from `./assets` (populated by the build script), web
//! builds fetch from `<origin>/assets`.

pub mod texture;

use std::collections::HashMap;

use crate::{data_structures::texture::Texture, scene::ImagePair};

pub use texture::{image_layout, load_binary, load_texture, load_texture_or_fallback};

/// Front and back texture of one card.
#[derive(Clone, Debug)]
pub struct FaceTextures {
    pub front: Texture,
    pub back: Texture,
}

/// Load both faces of `pair`, falling back to the checkerboard per face.
pub async fn load_faces(pair: &ImagePair, device: &wgpu::Device, queue: &wgpu::Queue) -> FaceTextures {
    let front = load_texture_or_fallback(&pair.front, device, queue).await;
    let back = load_texture_or_fallback(&pair.back, device, queue).await;
    FaceTextures { front, back }
}

/// Cache of decoded images by identifier, so cards sharing an image share
/// its GPU texture.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(&mut self, file_name: &str, device: &wgpu::Device, queue: &wgpu::Queue) -> Texture {
        if let Some(texture) = self.textures.get(file_name) {
            return texture.clone();
        }
        let texture = load_texture_or_fallback(file_name, device, queue).await;
        self.textures.insert(file_name.to_string(), texture.clone());
        texture
    }

    pub async fn faces(&mut self, pair: &ImagePair, device: &wgpu::Device, queue: &wgpu::Queue) -> FaceTextures {
        let front = self.get_or_load(&pair.front, device, queue).await;
        let back = self.get_or_load(&pair.back, device, queue).await;
        FaceTextures { front, back }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
