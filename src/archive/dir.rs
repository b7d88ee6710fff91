use std::path::PathBuf;

use anyhow::Context as _;

use super::{Archive, ArchiveEntry, sorted_with_prefix};
use crate::foundation::error::{RenderError, RenderResult};

/// An extracted jar or resource pack on disk; entry names are paths relative to `root`.
#[derive(Clone, Debug)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    /// Use `root` as the archive root (the directory that contains `assets/`).
    pub fn new(root: impl Into<PathBuf>) -> RenderResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RenderError::validation(format!(
                "archive root '{}' is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

impl Archive for DirArchive {
    fn entries(&mut self, prefix: &str) -> RenderResult<Vec<ArchiveEntry>> {
        let mut names = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root) {
            let entry = entry.context("walk archive directory")?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }
        Ok(sorted_with_prefix(names.iter().map(String::as_str), prefix))
    }

    fn read(&mut self, path: &str) -> RenderResult<Vec<u8>> {
        if path.split('/').any(|part| part == "..") {
            return Err(RenderError::validation(
                "archive paths must not contain '..'",
            ));
        }
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(RenderError::EntryNotFound(path.into()));
        }
        Ok(std::fs::read(&full).with_context(|| format!("read '{}'", full.display()))?)
    }
}
