//! Atomic metadata writer.
//!
//! 1. Write the rendered YAML to `<path>.prerender.tmp` in the same directory.
//! 2. Rename over the final path (atomic on POSIX).
//! 3. On rename failure, remove the temp file and leave the original intact.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Temp sibling used while writing `path`.
pub(crate) fn tmp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.prerender.tmp", path.display()))
}

/// Atomically replace the contents of `path` with `content`.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), SyncError> {
    atomic_write_with_tmp(path, content, &tmp_path_for(path))
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!("wrote: {}", path.display());
    Ok(())
}
