//! System locations consulted when resolving mounts.

use std::path::PathBuf;

use once_cell::sync::Lazy;

/// Default mount table source: this process's view of its mount namespace.
pub static MOUNTINFO_PATH: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("MOUNTLINK_MOUNTINFO")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/proc/self/mountinfo"))
});

/// Default directory of UUID-named symlinks to device nodes.
pub static UUID_DIRECTORY: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("MOUNTLINK_UUID_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/dev/disk/by-uuid"))
});

/// The pair of system locations a mount resolver reads.
///
/// The defaults point at the live system; tests and tools inspecting a
/// foreign mount namespace substitute their own locations.
#[derive(Debug, Clone)]
pub struct MountPaths {
    /// Mount table source in the kernel mountinfo format
    /// (default: /proc/self/mountinfo).
    pub mountinfo: PathBuf,
    /// Directory containing UUID-named device symlinks
    /// (default: /dev/disk/by-uuid).
    pub uuid_dir: PathBuf,
}

impl MountPaths {
    /// Create paths pointing at the default system locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create paths reading a specific mountinfo file and UUID directory.
    #[must_use]
    pub fn with_sources(mountinfo: impl Into<PathBuf>, uuid_dir: impl Into<PathBuf>) -> Self {
        Self {
            mountinfo: mountinfo.into(),
            uuid_dir: uuid_dir.into(),
        }
    }

    /// Mountinfo source for another process's mount namespace.
    #[must_use]
    pub fn for_pid(pid: u32) -> Self {
        Self {
            mountinfo: PathBuf::from(format!("/proc/{pid}/mountinfo")),
            uuid_dir: UUID_DIRECTORY.clone(),
        }
    }
}

impl Default for MountPaths {
    fn default() -> Self {
        Self {
            mountinfo: MOUNTINFO_PATH.clone(),
            uuid_dir: UUID_DIRECTORY.clone(),
        }
    }
}
