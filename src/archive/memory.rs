use std::collections::BTreeMap;

use super::{Archive, ArchiveEntry, sorted_with_prefix};
use crate::foundation::error::{RenderError, RenderResult};

/// In-memory archive used for fixtures and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Vec<u8>>,
    reads: usize,
}

impl MemoryArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(path.into(), bytes.into());
        self
    }

    /// Insert a JSON document.
    pub fn insert_json(&mut self, path: impl Into<String>, value: &serde_json::Value) -> &mut Self {
        self.insert(path, value.to_string())
    }

    /// Number of successful `read` calls so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Archive for MemoryArchive {
    fn entries(&mut self, prefix: &str) -> RenderResult<Vec<ArchiveEntry>> {
        Ok(sorted_with_prefix(
            self.entries.keys().map(String::as_str),
            prefix,
        ))
    }

    fn read(&mut self, path: &str) -> RenderResult<Vec<u8>> {
        let bytes = self
            .entries
            .get(path)
            .cloned()
            .ok_or_else(|| RenderError::EntryNotFound(path.into()))?;
        self.reads += 1;
        Ok(bytes)
    }
}
