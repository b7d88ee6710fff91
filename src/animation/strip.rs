use crate::texture::{AnimationMeta, FrameEntry};

/// Frame layout of a filmstrip texture: square frames stacked top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilmStrip {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Frames physically present in the image.
    pub frame_count: u32,
    /// Default ticks per frame.
    pub frame_time: u32,
    /// Playback order as `(frame index, ticks)`.
    sequence: Vec<(u32, u32)>,
}

impl FilmStrip {
    /// Detect a filmstrip from the image size and its metadata.
    ///
    /// Returns `None` unless the height is a whole multiple (at least 2) of the width.
    pub fn detect(width: u32, height: u32, meta: &AnimationMeta) -> Option<Self> {
        if width == 0 || height == 0 || height % width != 0 {
            tracing::debug!(width, height, "texture metadata present but not a filmstrip");
            return None;
        }
        let frame_count = height / width;
        if frame_count < 2 {
            return None;
        }
        let frame_time = meta.frametime.unwrap_or(1).max(1);

        let mut sequence: Vec<(u32, u32)> = meta
            .frames
            .iter()
            .flatten()
            .filter_map(|entry| {
                let (index, time) = match *entry {
                    FrameEntry::Index(index) => (index, frame_time),
                    FrameEntry::Timed { index, time } => (index, time.max(1)),
                };
                if index < frame_count {
                    Some((index, time))
                } else {
                    tracing::warn!(index, frame_count, "frame index outside filmstrip");
                    None
                }
            })
            .collect();
        if sequence.is_empty() {
            sequence = (0..frame_count).map(|i| (i, frame_time)).collect();
        }

        Some(Self {
            frame_width: width,
            frame_height: width,
            frame_count,
            frame_time,
            sequence,
        })
    }

    /// Ticks in one full cycle.
    pub fn cycle_ticks(&self) -> u64 {
        self.sequence.iter().map(|&(_, t)| u64::from(t)).sum()
    }

    /// Frame index visible at `tick`. With no explicit frame list this is
    /// `floor(tick / frame_time) mod frame_count`.
    pub fn frame_at(&self, tick: u64) -> u32 {
        let cycle = self.cycle_ticks();
        if cycle == 0 {
            return 0;
        }
        let mut t = tick % cycle;
        for &(index, time) in &self.sequence {
            let time = u64::from(time);
            if t < time {
                return index;
            }
            t -= time;
        }
        0
    }

    /// Pixel row where `frame` starts in the source image.
    pub fn frame_offset(&self, frame: u32) -> u32 {
        frame * self.frame_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/strip.rs"]
mod tests;
