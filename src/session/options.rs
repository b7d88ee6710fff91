use std::collections::BTreeSet;

use crate::foundation::core::FrameDelay;
use crate::render::{BackendKind, RenderSettings};

/// Options controlling a [`RenderSession`](super::RenderSession).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Orthographic half-height at zoom 1.
    pub distance: f32,
    /// Render every tick of animated textures. When off, animated blocks render one frame.
    pub animation: bool,
    /// Display time of one animation frame.
    pub tick_delay: FrameDelay,
    /// Which blocks to render.
    pub filter: BlockFilter,
    pub backend: BackendKind,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            width: settings.width,
            height: settings.height,
            distance: settings.distance,
            animation: true,
            tick_delay: FrameDelay::one_tick(),
            filter: BlockFilter::all(),
            backend: BackendKind::default(),
        }
    }
}

impl RenderOptions {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            distance: self.distance,
        }
    }
}

/// Block name predicate.
///
/// Names match either in full (`minecraft:stone`) or by path alone (`stone`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BlockFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl BlockFilter {
    pub fn all() -> Self {
        Self::All
    }

    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Parse a comma separated list. Blank input means every block.
    pub fn parse_list(list: &str) -> Self {
        let names: BTreeSet<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    pub fn matches(&self, block_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => {
                names.contains(block_name)
                    || block_name
                        .split_once(':')
                        .is_some_and(|(_, path)| names.contains(path))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/options.rs"]
mod tests;
