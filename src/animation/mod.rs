//! Animation tick coordination for one block.
//!
//! Progress is a plain value threaded through the frame loop: each pass receives the current
//! [`AnimationProgress`] and hands back an updated one. Nothing is stored on the model.

mod strip;

pub use strip::FilmStrip;

use crate::foundation::error::RenderResult;

/// Tick position within one block's render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationProgress {
    /// Tick being rendered.
    pub tick: u64,
    /// Longest animation cycle seen on this block, once known.
    pub max_ticks: Option<u64>,
}

impl AnimationProgress {
    /// Record an animated face's cycle length; keeps the maximum.
    #[must_use]
    pub fn observe(self, cycle_ticks: u64) -> Self {
        Self {
            max_ticks: Some(self.max_ticks.map_or(cycle_ticks, |m| m.max(cycle_ticks))),
            ..self
        }
    }

    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            tick: self.tick + 1,
            ..self
        }
    }

    /// Whether another frame should be rendered.
    pub fn has_more(&self, animation_enabled: bool) -> bool {
        animation_enabled && self.max_ticks.is_some_and(|max| self.tick < max)
    }

    pub fn is_animated(&self) -> bool {
        self.max_ticks.is_some()
    }
}

/// Run the per-frame loop for one block.
///
/// `render` produces the output for the frame at `progress.tick` and returns it with the
/// progress updated by every animated face it touched. Only what `render` returns is kept, so
/// callers that encode inside the closure never hold more than one raw frame. A still block,
/// or any block with animation disabled, renders exactly one frame. Outputs are returned in
/// tick order.
pub fn drive_frames<T, F>(animation_enabled: bool, mut render: F) -> RenderResult<Vec<T>>
where
    F: FnMut(AnimationProgress) -> RenderResult<(T, AnimationProgress)>,
{
    let mut progress = AnimationProgress::default();
    let mut frames = Vec::new();
    loop {
        let (frame, observed) = render(progress)?;
        frames.push(frame);
        progress = observed.advance();
        if !progress.has_more(animation_enabled) {
            break;
        }
    }
    if frames.len() > 1 {
        tracing::debug!(frames = frames.len(), "animation loop finished");
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mod.rs"]
mod tests;
