//! In-memory staging tree for bundle contents.
//!
//! Every directory and file of a bundle is assembled here first and only
//! flushed to disk once the whole layout is known. Paths are always relative
//! to the bundle root: a leading `/` is dropped, `.` segments are ignored and
//! `..` pops the previous segment.

use crate::bundler::error::{ErrorExt, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A node of the staging tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A directory. Its children are the entries whose path it prefixes.
    Directory,
    /// A regular file and its full contents.
    File(Vec<u8>),
}

/// Flat map from normalized relative path to [`Entry`].
///
/// Ancestors of every entry are always present as [`Entry::Directory`].
#[derive(Debug, Clone, Default)]
pub struct VirtualTree {
    entries: BTreeMap<PathBuf, Entry>,
}

impl VirtualTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `path` and all of its ancestors exist as directories.
    ///
    /// A file sitting where a directory is needed is replaced by the directory.
    pub fn mkdir(&mut self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        self.ensure_dir(&path);
    }

    /// Stores `content` at `path`, creating missing parent directories.
    ///
    /// Replaces whatever was at `path` before, including a whole directory
    /// subtree.
    pub fn save_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        if path.as_os_str().is_empty() {
            log::warn!("ignoring file staged at the bundle root");
            return;
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent);
        }
        self.entries
            .retain(|existing, _| existing == &path || !existing.starts_with(&path));
        self.entries.insert(path, Entry::File(content.into()));
    }

    /// Looks up the entry at `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Entry> {
        self.entries.get(&normalize(path.as_ref()))
    }

    /// Contents of the file at `path`, if it is a file.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        match self.get(path) {
            Some(Entry::File(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// Whether `path` is a staged directory.
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.get(path), Some(Entry::Directory))
    }

    /// All entries in path order (parents before children).
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Entry)> {
        self.entries.iter().map(|(path, entry)| (path.as_path(), entry))
    }

    /// Number of staged entries, directories included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Realizes the tree under `root`.
    ///
    /// Directories are created first and may already exist. Files are then
    /// written, replacing existing files. On failure the error is returned
    /// as-is; whatever was written so far stays on disk.
    pub async fn write_all_to_disk(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(root)
            .await
            .fs_context("creating bundle root", root)?;

        for (path, entry) in &self.entries {
            if matches!(entry, Entry::Directory) {
                let dir = root.join(path);
                fs::create_dir_all(&dir)
                    .await
                    .fs_context("creating directory", &dir)?;
            }
        }

        for (path, entry) in &self.entries {
            if let Entry::File(bytes) = entry {
                let file = root.join(path);
                fs::write(&file, bytes)
                    .await
                    .fs_context("writing file", &file)?;
                log::debug!("wrote {} ({} bytes)", file.display(), bytes.len());
            }
        }

        Ok(())
    }

    fn ensure_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            let slot = self
                .entries
                .entry(current.clone())
                .or_insert(Entry::Directory);
            if matches!(slot, Entry::File(_)) {
                log::warn!(
                    "replacing staged file {} with a directory",
                    current.display()
                );
                *slot = Entry::Directory;
            }
        }
    }
}

/// Reduces `path` to plain bundle-relative segments.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    out
}
