//! Path canonicalization and file-type predicates.
//!
//! The mount table loader and the resolution API only ever compare
//! canonical paths, so every path crossing the public boundary funnels
//! through [`canonicalize_path`] first.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustix::fs::FileType;

use crate::error::{MountError, MountResult};

/// Resolve a path to an absolute form with all symlinks and relative
/// segments removed.
///
/// # Errors
///
/// Returns [`MountError::PathNotFound`] if the path (or any component of
/// it) does not exist, and [`MountError::Io`] for any other failure.
/// Callers treat the former as skippable during table loads and as
/// terminal in direct queries.
pub fn canonicalize_path(path: &Path) -> MountResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(MountError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    match std::fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(MountError::PathNotFound {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(MountError::Io(err)),
    }
}

/// Whether the path names a directory. False on any stat failure.
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_dir())
}

/// Whether the path names a device node (block or character).
/// False for regular files, directories, and on any stat failure.
#[must_use]
pub fn is_device(path: &Path) -> bool {
    rustix::fs::stat(path).is_ok_and(|stat| {
        matches!(
            FileType::from_raw_mode(stat.st_mode),
            FileType::BlockDevice | FileType::CharacterDevice
        )
    })
}
