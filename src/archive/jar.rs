use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::Context as _;
use zip::result::ZipError;

use super::{Archive, ArchiveEntry, sorted_with_prefix};
use crate::foundation::error::{RenderError, RenderResult};

/// Upper bound on the buffer reserved from a zip header's declared size.
const MAX_PREALLOC: u64 = 16 << 20;

/// A zip container, typically a Minecraft client `.jar`.
pub struct JarArchive<R: Read + Seek = BufReader<File>> {
    zip: Option<zip::ZipArchive<R>>,
}

impl JarArchive {
    /// Open a jar on disk.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open jar '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> JarArchive<R> {
    /// Read a zip container from any seekable reader.
    pub fn from_reader(reader: R) -> RenderResult<Self> {
        let zip = zip::ZipArchive::new(reader).context("read zip central directory")?;
        Ok(Self { zip: Some(zip) })
    }

    fn zip(&mut self) -> RenderResult<&mut zip::ZipArchive<R>> {
        self.zip
            .as_mut()
            .ok_or_else(|| RenderError::validation("jar archive is closed"))
    }
}

impl<R: Read + Seek> Archive for JarArchive<R> {
    fn entries(&mut self, prefix: &str) -> RenderResult<Vec<ArchiveEntry>> {
        let zip = self.zip()?;
        Ok(sorted_with_prefix(zip.file_names(), prefix))
    }

    fn read(&mut self, path: &str) -> RenderResult<Vec<u8>> {
        let zip = self.zip()?;
        let mut entry = match zip.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(RenderError::EntryNotFound(path.into())),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("locate jar entry '{path}'"))
                    .into());
            }
        };
        let mut out = Vec::with_capacity(initial_capacity(entry.size()));
        entry
            .read_to_end(&mut out)
            .with_context(|| format!("inflate jar entry '{path}'"))?;
        Ok(out)
    }

    fn close(&mut self) -> RenderResult<()> {
        self.zip = None;
        Ok(())
    }
}

/// Declared sizes are untrusted; larger entries grow through `read_to_end`.
pub(super) fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}
