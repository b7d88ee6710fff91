use std::collections::HashMap;

use super::{FlattenedModel, ModelDescriptor, ResourceId};
use crate::archive::{Archive, read_json_as};
use crate::foundation::error::{RenderError, RenderResult};

/// Hard stop for parent chains; vanilla chains are at most a handful deep.
const MAX_PARENT_DEPTH: usize = 64;

/// Block model access on top of an open [`Archive`].
///
/// Raw descriptors are parsed once per archive path and memoized for the lifetime of the
/// library, so shared ancestors such as `block/block` or `block/cube` are read a single time.
pub struct ModelLibrary<A: Archive> {
    archive: A,
    default_namespace: String,
    descriptors: HashMap<String, ModelDescriptor>,
}

impl<A: Archive> ModelLibrary<A> {
    /// Wrap an archive using the `minecraft` namespace by default.
    pub fn new(archive: A) -> Self {
        Self::with_namespace(archive, super::DEFAULT_NAMESPACE)
    }

    /// Wrap an archive with a custom default namespace.
    pub fn with_namespace(archive: A, default_namespace: impl Into<String>) -> Self {
        Self {
            archive,
            default_namespace: default_namespace.into(),
            descriptors: HashMap::new(),
        }
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub(crate) fn archive_mut(&mut self) -> &mut A {
        &mut self.archive
    }

    /// Number of distinct descriptors parsed so far.
    pub fn cached_descriptors(&self) -> usize {
        self.descriptors.len()
    }

    /// All block model names of `namespace`, as `namespace:name`, sorted.
    pub fn block_names(&mut self, namespace: &str) -> RenderResult<Vec<String>> {
        let prefix = format!("assets/{namespace}/models/block/");
        let names = self
            .archive
            .entries(&prefix)?
            .into_iter()
            .filter_map(|entry| {
                let rest = entry.name.strip_prefix(&prefix)?;
                let id = rest.strip_suffix(".json")?;
                Some(format!("{namespace}:{id}"))
            })
            .collect();
        Ok(names)
    }

    /// Resolve every block model of `namespace`.
    pub fn block_list(&mut self, namespace: &str) -> RenderResult<Vec<FlattenedModel>> {
        self.block_names(namespace)?
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    /// Read one raw descriptor (memoized).
    pub fn descriptor(&mut self, name: &str) -> RenderResult<ModelDescriptor> {
        let id = ResourceId::model(name, &self.default_namespace);
        self.load_descriptor(&id)
    }

    /// Load `block_name` and merge its whole parent chain into one model.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&mut self, block_name: &str) -> RenderResult<FlattenedModel> {
        let mut visiting = Vec::new();
        let (merged, parents) = self.resolve_chain(block_name, &mut visiting)?;
        tracing::debug!(?parents, "flattened model");
        Ok(FlattenedModel::from_descriptor(block_name, parents, merged))
    }

    /// Close the underlying archive.
    pub fn close(&mut self) -> RenderResult<()> {
        self.archive.close()
    }

    fn resolve_chain(
        &mut self,
        name: &str,
        visiting: &mut Vec<String>,
    ) -> RenderResult<(ModelDescriptor, Vec<String>)> {
        let id = ResourceId::model(name, &self.default_namespace);
        let key = id.to_string();
        if visiting.contains(&key) || visiting.len() >= MAX_PARENT_DEPTH {
            visiting.push(key);
            return Err(RenderError::ParentCycle(visiting.join(" -> ")));
        }
        visiting.push(key);

        let mut descriptor = self.load_descriptor(&id)?;
        let resolved = match descriptor.parent.take() {
            Some(parent) => {
                let (flat_parent, mut parents) = self.resolve_chain(&parent, visiting)?;
                parents.push(parent);
                (descriptor.merged_over(flat_parent), parents)
            }
            None => (descriptor, Vec::new()),
        };

        visiting.pop();
        Ok(resolved)
    }

    fn load_descriptor(&mut self, id: &ResourceId) -> RenderResult<ModelDescriptor> {
        let path = id.model_path();
        if let Some(cached) = self.descriptors.get(&path) {
            return Ok(cached.clone());
        }
        let parsed: ModelDescriptor = match read_json_as(&mut self.archive, &path) {
            Ok(parsed) => parsed,
            Err(RenderError::EntryNotFound(_)) => return Err(RenderError::ModelNotFound(path)),
            Err(e) => return Err(e),
        };
        self.descriptors.insert(path, parsed.clone());
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/library.rs"]
mod tests;
