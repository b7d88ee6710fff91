use image::{Rgba, RgbaImage, imageops};

use super::TextureAsset;
use crate::foundation::math::MODEL_UNITS;

/// Texture of one box face for one animation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMaterial {
    pub image: RgbaImage,
}

impl FaceMaterial {
    /// Nearest-neighbour lookup with `u`, `v` in `0..=1`, `v` pointing down.
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let (w, h) = self.image.dimensions();
        let x = ((u * w as f32) as i64).clamp(0, i64::from(w) - 1) as u32;
        let y = ((v * h as f32) as i64).clamp(0, i64::from(h) - 1) as u32;
        self.image.get_pixel(x, y).0
    }
}

/// Build the material for one face: pick the filmstrip frame shown at `tick`, crop the face's
/// UV rectangle out of it, stretch that back to the frame size and apply the face rotation.
///
/// UVs are in model units (0-16) and scale with the frame's pixel size; reversed coordinates
/// mirror the crop.
pub fn face_material(
    asset: &TextureAsset,
    tick: u64,
    uv: Option<[f32; 4]>,
    rotation: i32,
) -> FaceMaterial {
    let (fw, fh) = asset.frame_size();
    let frame = asset.frame_at(tick);
    let y_offset = asset.strip.as_ref().map_or(0, |s| s.frame_offset(frame));
    let [u0, v0, u1, v1] = uv.unwrap_or([0.0, 0.0, MODEL_UNITS, MODEL_UNITS]);
    let sx = fw as f32 / MODEL_UNITS;
    let sy = fh as f32 / MODEL_UNITS;

    let mut out = RgbaImage::new(fw.max(1), fh.max(1));
    if fw > 0 && fh > 0 {
        for y in 0..fh {
            let v = v0 + (y as f32 + 0.5) / fh as f32 * (v1 - v0);
            let src_y = ((v * sy).floor() as i64).clamp(0, i64::from(fh) - 1) as u32;
            for x in 0..fw {
                let u = u0 + (x as f32 + 0.5) / fw as f32 * (u1 - u0);
                let src_x = ((u * sx).floor() as i64).clamp(0, i64::from(fw) - 1) as u32;
                let px: Rgba<u8> = *asset.image.get_pixel(src_x, y_offset + src_y);
                out.put_pixel(x, y, px);
            }
        }
    }

    let image = match rotation.rem_euclid(360) / 90 {
        1 => imageops::rotate90(&out),
        2 => imageops::rotate180(&out),
        3 => imageops::rotate270(&out),
        _ => out,
    };
    FaceMaterial { image }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/material.rs"]
mod tests;
