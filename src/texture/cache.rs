use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context as _;
use image::RgbaImage;

use super::{AnimationMeta, McMeta, TextureAsset};
use crate::archive::Archive;
use crate::foundation::error::{RenderError, RenderResult};
use crate::model::ResourceId;

/// Decode PNG (or any format `image` was built with) bytes into straight RGBA8.
pub fn decode_texture(bytes: &[u8]) -> RenderResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode texture from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Decoded textures and their animation metadata, keyed by texture id.
///
/// Owned by one render session and dropped with it.
#[derive(Debug, Default)]
pub struct TextureCache {
    default_namespace: String,
    textures: HashMap<String, Arc<TextureAsset>>,
}

impl TextureCache {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            textures: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Fetch a texture, reading and decoding it on first use.
    ///
    /// Fails with [`RenderError::TextureNotFound`] when the archive has no such image.
    pub fn get_or_load<A: Archive + ?Sized>(
        &mut self,
        archive: &mut A,
        texture: &str,
    ) -> RenderResult<Arc<TextureAsset>> {
        if let Some(hit) = self.textures.get(texture) {
            return Ok(Arc::clone(hit));
        }

        let id = ResourceId::parse(texture, &self.default_namespace);
        let path = id.texture_path();
        let bytes = match archive.read(&path) {
            Ok(bytes) => bytes,
            Err(RenderError::EntryNotFound(_)) => return Err(RenderError::TextureNotFound(path)),
            Err(e) => return Err(e),
        };
        let image = decode_texture(&bytes)?;
        let animation = load_animation_meta(archive, &id)?;

        let asset = Arc::new(TextureAsset::new(texture, image, animation));
        if let Some(strip) = asset.strip.as_ref() {
            tracing::debug!(
                texture,
                frames = strip.frame_count,
                cycle_ticks = strip.cycle_ticks(),
                "animated texture"
            );
        }
        self.textures.insert(texture.to_string(), Arc::clone(&asset));
        Ok(asset)
    }
}

fn load_animation_meta<A: Archive + ?Sized>(
    archive: &mut A,
    id: &ResourceId,
) -> RenderResult<Option<AnimationMeta>> {
    let path = id.texture_meta_path();
    let bytes = match archive.read(&path) {
        Ok(bytes) => bytes,
        Err(RenderError::EntryNotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    match serde_json::from_slice::<McMeta>(&bytes) {
        Ok(meta) => Ok(meta.animation),
        Err(e) => {
            tracing::warn!(%path, error = %e, "ignoring unreadable texture metadata");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
