//! Output encoding: raw frames to PNG, PNG frames to one animated PNG.

mod apng;
mod png;

pub use apng::{Chunk, PNG_SIGNATURE, chunks, encode_animated, encode_frames};
pub use png::encode_png;

use std::path::Path;

use crate::foundation::core::FrameDelay;
use crate::foundation::error::{RenderError, RenderResult};

/// Final image for one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerImage {
    /// One frame, passed through unchanged.
    Still(Vec<u8>),
    /// Several frames stitched into an APNG.
    Animated { bytes: Vec<u8>, frames: usize },
}

impl ContainerImage {
    /// Stitch PNG-encoded frames, in tick order, with a fixed per-frame delay.
    pub fn assemble(mut frames: Vec<Vec<u8>>, delay: FrameDelay) -> RenderResult<Self> {
        match frames.len() {
            0 => Err(RenderError::validation("no frames to encode")),
            1 => Ok(Self::Still(frames.pop().unwrap_or_default())),
            n => Ok(Self::Animated {
                bytes: encode_frames(&frames, delay)?,
                frames: n,
            }),
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Self::Still(_) => 1,
            Self::Animated { frames, .. } => *frames,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Still(bytes) | Self::Animated { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Still(bytes) | Self::Animated { bytes, .. } => bytes,
        }
    }
}

pub fn ensure_parent_dir(path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write one block image, creating parent directories as needed.
pub fn write_image(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    use anyhow::Context as _;
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
