use anyhow::Context as _;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::RenderResult;

/// Encode a straight-alpha frame as a still PNG.
pub fn encode_png(frame: &FrameRGBA) -> RenderResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("encode {}x{} frame as png", frame.width, frame.height))?;
    Ok(out)
}
