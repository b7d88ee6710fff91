//! Block model descriptors, inheritance flattening and texture-variable resolution.

mod descriptor;
mod id;
mod library;

pub use descriptor::{
    Display, Element, ElementRotation, Face, FaceSide, Faces, ModelDescriptor, Transform,
};
pub use id::{DEFAULT_NAMESPACE, ResourceId};
pub use library::ModelLibrary;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::foundation::error::{RenderError, RenderResult};

/// A model with its whole parent chain merged in.
///
/// Recomputed on every [`ModelLibrary::resolve`] call; only the raw descriptors are cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlattenedModel {
    /// The name the model was requested by.
    pub block_name: String,
    /// Parent references, farthest ancestor first.
    pub parents: Vec<String>,
    /// Merged texture variables.
    pub textures: BTreeMap<String, String>,
    /// Merged display transforms.
    pub display: Display,
    /// Elements of the nearest model in the chain that declares any.
    pub elements: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambientocclusion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gui_light: Option<String>,
}

impl FlattenedModel {
    pub(crate) fn from_descriptor(
        block_name: &str,
        parents: Vec<String>,
        merged: ModelDescriptor,
    ) -> Self {
        Self {
            block_name: block_name.to_string(),
            parents,
            textures: merged.textures.unwrap_or_default(),
            display: merged.display.unwrap_or_default(),
            elements: merged.elements.unwrap_or_default(),
            ambientocclusion: merged.ambientocclusion,
            gui_light: merged.gui_light,
        }
    }

    /// Follow `#variable` indirections until a literal texture path is found.
    ///
    /// Returns `None` for an empty reference, an undefined variable, or a cyclic chain.
    pub fn resolve_texture(&self, reference: &str) -> Option<String> {
        match self.try_resolve_texture(reference) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(block = %self.block_name, error = %err, "texture not resolved");
                None
            }
        }
    }

    /// Like [`resolve_texture`](Self::resolve_texture), but a cyclic chain is
    /// [`RenderError::TextureCycle`].
    pub fn try_resolve_texture(&self, reference: &str) -> RenderResult<Option<String>> {
        let mut current = reference;
        let mut seen = HashSet::new();
        // A chain can visit each defined variable at most once.
        for _ in 0..=self.textures.len() {
            if current.is_empty() {
                return Ok(None);
            }
            let Some(var) = current.strip_prefix('#') else {
                return Ok(Some(current.to_string()));
            };
            if !seen.insert(var) {
                return Err(RenderError::TextureCycle(format!("{reference} at #{var}")));
            }
            match self.textures.get(var) {
                Some(next) => current = next.as_str(),
                None => return Ok(None),
            }
        }
        Err(RenderError::TextureCycle(reference.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/flattened.rs"]
mod tests;
