//! The resolution API over the cached mount table.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use mountlink_common::{MountError, MountPaths, MountResult, canonicalize_path};

use crate::link::{Link, LinkToken};
use crate::mount::Mount;
use crate::table::MountTable;

/// Resolves paths to mounts and mounts to stable UUID links.
///
/// The resolver owns the process's view of the mount table: it is read
/// lazily on the first query, cached, and guarded by one lock that every
/// operation holds across the whole load-or-reuse-then-read sequence, so
/// no query ever observes a half-built table.
///
/// The table never refreshes on its own. If the system's mounts changed
/// after the first query, call [`update`](Self::update) to see the
/// changes.
#[derive(Debug)]
pub struct MountResolver {
    paths: MountPaths,
    table: Mutex<Option<MountTable>>,
}

impl MountResolver {
    /// A resolver reading the default system locations
    /// (`/proc/self/mountinfo`, `/dev/disk/by-uuid`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_paths(MountPaths::new())
    }

    /// A resolver reading custom locations, e.g. another process's mount
    /// namespace or a test fixture.
    #[must_use]
    pub fn with_paths(paths: MountPaths) -> Self {
        Self {
            paths,
            table: Mutex::new(None),
        }
    }

    /// Lock the table, loading it first if this is the first query.
    fn table(&self) -> MountResult<MappedMutexGuard<'_, MountTable>> {
        let mut guard = self.table.lock();
        if guard.is_none() {
            *guard = Some(MountTable::load(&self.paths)?);
        }
        Ok(MutexGuard::map(guard, |slot| {
            slot.as_mut().expect("table loaded under this lock")
        }))
    }

    /// List every mount on the system, ordered by mountpoint path.
    ///
    /// # Errors
    ///
    /// Fails only if the mount table needed loading and its source could
    /// not be read.
    pub fn all_filesystems(&self) -> MountResult<Vec<Arc<Mount>>> {
        let table = self.table()?;
        Ok(table.iter().cloned().collect())
    }

    /// Find the mount containing `path`.
    ///
    /// Walks up the directory tree from the canonicalized path until a
    /// mountpoint matches, so a path nested arbitrarily deep inside a
    /// mount resolves to its nearest enclosing mount. With bind mounts,
    /// distinct paths can resolve to mounts sharing one device.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be canonicalized, the table cannot be
    /// loaded, or no mount contains the path
    /// ([`MountError::NotAMountpoint`]).
    pub fn find_mount(&self, path: &Path) -> MountResult<Arc<Mount>> {
        let path = canonicalize_path(path)?;

        let table = self.table()?;
        let mut current: &Path = &path;
        loop {
            if let Some(mount) = table.get(current) {
                return Ok(Arc::clone(mount));
            }
            // Move to the parent directory; at the root there is none
            // left, and the search has failed.
            match current.parent() {
                Some(parent) => current = parent,
                None => return Err(MountError::NotAMountpoint { path }),
            }
        }
    }

    /// Find the mount whose mountpoint is exactly `mountpoint`.
    ///
    /// Unlike [`find_mount`](Self::find_mount) there is no upward search:
    /// a path merely inside a mount reports
    /// [`MountError::NotAMountpoint`].
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be canonicalized, the table cannot be
    /// loaded, or the path is not a mount root.
    pub fn get_mount(&self, mountpoint: &Path) -> MountResult<Arc<Mount>> {
        let mountpoint = canonicalize_path(mountpoint)?;

        let table = self.table()?;
        table
            .get(&mountpoint)
            .map(Arc::clone)
            .ok_or(MountError::NotAMountpoint { path: mountpoint })
    }

    /// Discard the cached table and rebuild it from the current mountinfo
    /// source.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read; the table is then left
    /// uninitialized and the next query retries the load.
    pub fn update(&self) -> MountResult<()> {
        let mut guard = self.table.lock();
        *guard = None;
        *guard = Some(MountTable::load(&self.paths)?);
        Ok(())
    }

    /// Resolve a stable link to the mounts of the device it names.
    ///
    /// The link's value is joined onto the UUID symlink directory and the
    /// symlink is resolved to a canonical device path, which is then
    /// looked up in the device index. Bind mounts mean several mounts may
    /// come back, in mount-table scan order.
    ///
    /// # Errors
    ///
    /// Fails if the value is not usable as a directory entry name
    /// ([`MountError::InvalidUuid`]), no device symlink with that name
    /// resolves ([`MountError::NoDeviceWithUuid`]), or the device is not
    /// mounted anywhere ([`MountError::DeviceNotMounted`]).
    pub fn mounts_for_link(&self, link: &Link) -> MountResult<Vec<Arc<Mount>>> {
        let LinkToken::Uuid = link.token();
        let search = self.paths.uuid_dir.join(link.value());

        // Traversal guard: joining the value must not have escaped the
        // UUID directory ("..", embedded '/', empty value).
        if search.file_name() != Some(OsStr::new(link.value())) {
            return Err(MountError::InvalidUuid {
                value: link.value().to_string(),
            });
        }
        let device = canonicalize_path(&search).map_err(|_| MountError::NoDeviceWithUuid {
            value: link.value().to_string(),
        })?;

        let table = self.table()?;
        match table.mounts_for_device(&device) {
            Some(mounts) => Ok(mounts.to_vec()),
            None => Err(MountError::DeviceNotMounted { device }),
        }
    }

    /// Construct the stable link naming a mount's device.
    ///
    /// Scans the UUID symlink directory and returns `TOKEN=<entry name>`
    /// for the first entry whose target resolves to the mount's device.
    /// Entries that are not symlinks, or whose targets fail to resolve,
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Fails if the mount has no device ([`MountError::NoDevice`]), the
    /// UUID directory cannot be read, or no entry targets the device
    /// ([`MountError::NoUuid`]).
    pub fn make_link(&self, mount: &Mount, token: LinkToken) -> MountResult<Link> {
        let LinkToken::Uuid = token;
        let Some(device) = mount.device.as_deref() else {
            return Err(MountError::NoDevice {
                path: mount.path.clone(),
            });
        };

        for entry in std::fs::read_dir(&self.paths.uuid_dir)? {
            let entry = entry?;
            match entry.file_type() {
                // Only interested in the UUID symlinks.
                Ok(file_type) if file_type.is_symlink() => {}
                Ok(_) => continue,
                Err(err) => {
                    tracing::debug!(
                        entry = %entry.path().display(),
                        error = %err,
                        "skipping unreadable by-uuid entry"
                    );
                    continue;
                }
            }
            let target = match canonicalize_path(&entry.path()) {
                Ok(target) => target,
                Err(err) => {
                    tracing::debug!(
                        entry = %entry.path().display(),
                        error = %err,
                        "skipping unresolvable by-uuid entry"
                    );
                    continue;
                }
            };
            if target == device {
                return Ok(Link::uuid(entry.file_name().to_string_lossy()));
            }
        }
        Err(MountError::NoUuid {
            device: device.to_path_buf(),
        })
    }
}

impl Default for MountResolver {
    fn default() -> Self {
        Self::new()
    }
}
