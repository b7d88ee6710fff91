//! Block textures: decoding, `.mcmeta` animation metadata, the per-session cache and
//! per-face material construction.

mod cache;
mod material;

pub use cache::{TextureCache, decode_texture};
pub use material::{FaceMaterial, face_material};

use image::RgbaImage;
use serde::Deserialize;

use crate::animation::FilmStrip;

/// The `animation` object of a `.png.mcmeta` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnimationMeta {
    /// Blend between frames. Accepted, not rendered.
    #[serde(default)]
    pub interpolate: bool,
    /// Custom frame width. Accepted, not rendered.
    #[serde(default)]
    pub width: Option<u32>,
    /// Custom frame height. Accepted, not rendered.
    #[serde(default)]
    pub height: Option<u32>,
    /// Ticks per frame; 1 when absent.
    #[serde(default)]
    pub frametime: Option<u32>,
    /// Explicit frame order.
    #[serde(default)]
    pub frames: Option<Vec<FrameEntry>>,
}

/// One entry of an explicit frame list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FrameEntry {
    Index(u32),
    Timed { index: u32, time: u32 },
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct McMeta {
    #[serde(default)]
    pub(crate) animation: Option<AnimationMeta>,
}

/// A decoded texture plus its animation layout.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    /// Texture id as referenced by the model.
    pub id: String,
    /// Full source image (all filmstrip frames stacked vertically).
    pub image: RgbaImage,
    /// Parsed metadata, when the texture has a `.mcmeta` file.
    pub animation: Option<AnimationMeta>,
    /// Filmstrip layout, when the metadata describes more than one frame.
    pub strip: Option<FilmStrip>,
}

impl TextureAsset {
    /// Build an asset, detecting the filmstrip layout from the metadata and image size.
    pub fn new(id: impl Into<String>, image: RgbaImage, animation: Option<AnimationMeta>) -> Self {
        let strip = animation
            .as_ref()
            .and_then(|meta| FilmStrip::detect(image.width(), image.height(), meta));
        Self {
            id: id.into(),
            image,
            animation,
            strip,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.strip.is_some()
    }

    /// Ticks until the animation repeats, `None` for still textures.
    pub fn cycle_ticks(&self) -> Option<u64> {
        self.strip.as_ref().map(FilmStrip::cycle_ticks)
    }

    /// Frame index shown at `tick` (always 0 for still textures).
    pub fn frame_at(&self, tick: u64) -> u32 {
        self.strip.as_ref().map_or(0, |s| s.frame_at(tick))
    }

    /// Pixel size of one frame.
    pub fn frame_size(&self) -> (u32, u32) {
        match &self.strip {
            Some(strip) => (strip.frame_width, strip.frame_height),
            None => self.image.dimensions(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/mod.rs"]
mod tests;
