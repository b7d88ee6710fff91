use crate::foundation::error::{RenderError, RenderResult};

pub use glam::{Mat4, Vec3};

/// Game ticks per second. One rendered animation frame covers one tick.
pub const TICKS_PER_SECOND: u16 = 20;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Allocate a fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::validation(format!(
                "frame data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

/// Display time of one animation frame as a fraction of a second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDelay {
    /// Numerator (seconds).
    pub num: u16,
    /// Denominator, must be non-zero.
    pub den: u16,
}

impl FrameDelay {
    /// Create a validated delay.
    pub fn new(num: u16, den: u16) -> RenderResult<Self> {
        if den == 0 {
            return Err(RenderError::validation("FrameDelay den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// One game tick (`1/20` s).
    pub fn one_tick() -> Self {
        Self {
            num: 1,
            den: TICKS_PER_SECOND,
        }
    }

    /// Delay in seconds.
    pub fn as_secs_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl Default for FrameDelay {
    fn default() -> Self {
        Self::one_tick()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
