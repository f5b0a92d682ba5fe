//! The mount record.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One live mount, as recorded in the kernel mount table.
///
/// Bind mounts mean several `Mount` values may share the same device; that
/// is expected, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    /// Canonical, absolute mountpoint directory.
    pub path: PathBuf,
    /// Filesystem type identifier, e.g. "ext4" or "tmpfs".
    pub fs_type: String,
    /// Canonical path of the backing device node.
    ///
    /// `None` for filesystems without a real backing device (tmpfs,
    /// cgroups, ...) and for devices that could not be resolved and
    /// verified at table-load time.
    pub device: Option<PathBuf>,
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.device {
            Some(device) => write!(
                f,
                "{} ({}) on {}",
                device.display(),
                self.fs_type,
                self.path.display()
            ),
            None => write!(f, "{} on {}", self.fs_type, self.path.display()),
        }
    }
}
