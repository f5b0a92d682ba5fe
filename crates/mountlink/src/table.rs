//! The in-memory mount table: two indexes built from one mountinfo scan.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mountlink_common::{MountPaths, MountResult, canonicalize_path, is_device, is_dir};

use crate::mount::Mount;
use crate::mountinfo::parse_line;

/// Mount indexes derived from a single full scan of the mountinfo source.
///
/// Built whole, then handed to the resolver; never patched incrementally.
#[derive(Debug, Default)]
pub(crate) struct MountTable {
    /// Mountpoint path -> mount. BTreeMap keeps iteration in lexicographic
    /// path order.
    by_path: BTreeMap<PathBuf, Arc<Mount>>,
    /// Canonical device path -> mounts on that device, in scan order.
    by_device: HashMap<PathBuf, Vec<Arc<Mount>>>,
}

impl MountTable {
    /// Build the table by reading and parsing the whole mountinfo source.
    ///
    /// Individual records that fail to parse, whose mountpoint cannot be
    /// canonicalized (it may have vanished mid-scan), or whose mountpoint
    /// is not a directory are logged and skipped; only failure to read the
    /// source itself fails the load.
    pub(crate) fn load(paths: &MountPaths) -> MountResult<Self> {
        let data = std::fs::read(&paths.mountinfo)?;

        let mut table = Self::default();
        for line in data.split(|&b| b == b'\n') {
            if line.is_empty() {
                continue;
            }
            let Some(raw) = parse_line(line) else {
                tracing::warn!(
                    line = %String::from_utf8_lossy(line),
                    "ignoring invalid mountinfo line"
                );
                continue;
            };

            let path = match canonicalize_path(&raw.mountpoint) {
                Ok(path) => path,
                Err(err) => {
                    tracing::debug!(
                        mountpoint = %raw.mountpoint.display(),
                        error = %err,
                        "skipping mount with unresolvable mountpoint"
                    );
                    continue;
                }
            };
            // Only directory mountpoints are usable.
            if !is_dir(&path) {
                tracing::debug!(
                    mountpoint = %path.display(),
                    "ignoring mountpoint because it is not a directory"
                );
                continue;
            }

            // Keep the source only if it resolves to a real device node;
            // virtual filesystems (tmpfs, cgroups, ...) carry no device.
            let device = match canonicalize_path(&raw.source) {
                Ok(device) if is_device(&device) => Some(device),
                _ => None,
            };

            let mount = Arc::new(Mount {
                path: path.clone(),
                fs_type: raw.fs_type,
                device: device.clone(),
            });

            // A path seen again later in the scan overwrites the earlier
            // record: mountinfo lists mounts in mount order, so the most
            // recent mount at a path is the live one.
            table.by_path.insert(path, Arc::clone(&mount));
            if let Some(device) = device {
                table.by_device.entry(device).or_default().push(mount);
            }
        }
        Ok(table)
    }

    /// The mount whose mountpoint is exactly `path`, if any.
    pub(crate) fn get(&self, path: &Path) -> Option<&Arc<Mount>> {
        self.by_path.get(path)
    }

    /// All mounts, in lexicographic mountpoint order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<Mount>> {
        self.by_path.values()
    }

    /// The mounts backed by a canonical device path, in scan order.
    pub(crate) fn mounts_for_device(&self, device: &Path) -> Option<&[Arc<Mount>]> {
        self.by_device.get(device).map(Vec::as_slice)
    }
}
