//! File system utilities for bundling.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Mode given to every generated executable.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Removes whatever is at `path`: a directory tree, a file or a symlink.
///
/// Does nothing if the path does not exist.
pub async fn remove_existing(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(Error::Fs {
                context: "inspecting existing bundle",
                path: path.to_path_buf(),
                error,
            });
        }
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .await
            .fs_context("failed to remove old app bundle", path)?;
    } else {
        fs::remove_file(path)
            .await
            .fs_context("failed to remove file in the way of the bundle", path)?;
    }
    log::debug!("Removed existing {}", path.display());
    Ok(())
}

/// Canonical form of `path`, or `None` if nothing exists there.
pub async fn resolve_existing(path: &Path) -> Result<Option<PathBuf>> {
    match fs::canonicalize(path).await {
        Ok(resolved) => Ok(Some(resolved)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(Error::Fs {
            context: "resolving",
            path: path.to_path_buf(),
            error,
        }),
    }
}

/// Sets `rwxr-xr-x` on `path`.
///
/// No-op on platforms without Unix permissions.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
            .await
            .fs_context("failed to set executable permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// All regular files below `root`, relative to it, sorted.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.path().strip_prefix(root)?.to_path_buf());
        }
    }
    Ok(files)
}
