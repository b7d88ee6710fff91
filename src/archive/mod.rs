//! Archive access.
//!
//! The renderer only ever reads named blobs out of a container. [`Archive`] is that seam; the
//! crate ships a jar/zip reader, a directory reader for extracted resource packs, and an in-memory
//! map for fixtures.

mod dir;
mod jar;
mod memory;

pub use dir::DirArchive;
pub use jar::JarArchive;
pub use memory::MemoryArchive;

use serde::de::DeserializeOwned;

use crate::foundation::error::RenderResult;

/// One listed archive entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArchiveEntry {
    /// Full `/`-separated entry path.
    pub name: String,
}

/// Read-only access to a container of named blobs.
///
/// Missing entries are reported as [`RenderError::EntryNotFound`](crate::RenderError::EntryNotFound).
pub trait Archive {
    /// List entries whose path starts with `prefix`, sorted by name.
    fn entries(&mut self, prefix: &str) -> RenderResult<Vec<ArchiveEntry>>;

    /// Read the raw bytes of one entry.
    fn read(&mut self, path: &str) -> RenderResult<Vec<u8>>;

    /// Read and parse one entry as JSON.
    fn read_json(&mut self, path: &str) -> RenderResult<serde_json::Value> {
        let bytes = self.read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Release the underlying resource. Further reads fail.
    fn close(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

impl<A: Archive + ?Sized> Archive for Box<A> {
    fn entries(&mut self, prefix: &str) -> RenderResult<Vec<ArchiveEntry>> {
        (**self).entries(prefix)
    }

    fn read(&mut self, path: &str) -> RenderResult<Vec<u8>> {
        (**self).read(path)
    }

    fn read_json(&mut self, path: &str) -> RenderResult<serde_json::Value> {
        (**self).read_json(path)
    }

    fn close(&mut self) -> RenderResult<()> {
        (**self).close()
    }
}

/// Read one entry and deserialize it into `T`.
pub fn read_json_as<T: DeserializeOwned, A: Archive + ?Sized>(
    archive: &mut A,
    path: &str,
) -> RenderResult<T> {
    let bytes = archive.read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn sorted_with_prefix<'a>(names: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<ArchiveEntry> {
    let mut out: Vec<ArchiveEntry> = names
        .filter(|name| name.starts_with(prefix) && !name.ends_with('/'))
        .map(|name| ArchiveEntry {
            name: name.to_string(),
        })
        .collect();
    out.sort();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/archive/mod.rs"]
mod tests;
