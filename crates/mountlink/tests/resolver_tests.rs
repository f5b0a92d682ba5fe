//! End-to-end tests for the mount resolver, against a fixture mountinfo
//! file and a fabricated by-uuid symlink directory.

use std::path::{Path, PathBuf};

use mountlink::{Link, LinkToken, MountResolver};
use mountlink_common::{MountError, MountPaths};
use tempfile::TempDir;

/// A tempdir holding a mountinfo file, mountpoint directories, and a
/// by-uuid directory of device symlinks.
struct System {
    dir: TempDir,
    records: Vec<String>,
}

impl System {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("by-uuid")).unwrap();
        Self {
            dir,
            records: Vec::new(),
        }
    }

    fn mount(&mut self, name: &str, fs_type: &str, source: &str) -> PathBuf {
        let mountpoint = self.dir.path().join(name);
        std::fs::create_dir_all(&mountpoint).unwrap();
        self.records.push(format!(
            "{} 25 8:2 / {} rw,noatime shared:1 - {} {} rw",
            100 + self.records.len(),
            mountpoint.display(),
            fs_type,
            source
        ));
        std::fs::canonicalize(&mountpoint).unwrap()
    }

    fn uuid_symlink(&self, uuid: &str, target: &str) {
        std::os::unix::fs::symlink(target, self.dir.path().join("by-uuid").join(uuid)).unwrap();
    }

    fn resolver(&self) -> MountResolver {
        let mountinfo = self.dir.path().join("mountinfo");
        std::fs::write(&mountinfo, self.records.join("\n") + "\n").unwrap();
        MountResolver::with_paths(MountPaths::with_sources(
            mountinfo,
            self.dir.path().join("by-uuid"),
        ))
    }
}

#[test_log::test]
fn link_round_trip_through_a_bind_mount() {
    let mut sys = System::new();
    let orig = sys.mount("orig", "ext4", "/dev/null");
    let bound = sys.mount("bound", "ext4", "/dev/null");
    sys.uuid_symlink("0a81f5b1-68c9-4c45-ae38-2f4d0b9fe03e", "/dev/null");

    let resolver = sys.resolver();

    // Link -> mounts: both bind mounts come back, in scan order.
    let link: Link = "UUID=0a81f5b1-68c9-4c45-ae38-2f4d0b9fe03e".parse().unwrap();
    let mounts = resolver.mounts_for_link(&link).unwrap();
    assert_eq!(mounts.len(), 2);
    assert_eq!(mounts[0].path, orig);
    assert_eq!(mounts[1].path, bound);

    // Mount -> link: scanning the by-uuid directory finds the same tag.
    let made = resolver.make_link(&mounts[0], LinkToken::Uuid).unwrap();
    assert_eq!(made.to_string(), "UUID=0a81f5b1-68c9-4c45-ae38-2f4d0b9fe03e");
}

#[test_log::test]
fn unknown_uuid_reports_no_device() {
    let mut sys = System::new();
    sys.mount("vol", "ext4", "/dev/null");

    let resolver = sys.resolver();
    let err = resolver
        .mounts_for_link(&Link::uuid("not-a-real-uuid"))
        .unwrap_err();
    assert!(matches!(err, MountError::NoDeviceWithUuid { .. }));
}

#[test_log::test]
fn unmounted_device_is_an_error_not_an_empty_result() {
    let mut sys = System::new();
    // Only virtual filesystems are mounted; /dev/null backs nothing.
    sys.mount("run", "tmpfs", "tmpfs");
    sys.uuid_symlink("dead-beef", "/dev/null");

    let resolver = sys.resolver();
    let err = resolver.mounts_for_link(&Link::uuid("dead-beef")).unwrap_err();
    assert!(matches!(err, MountError::DeviceNotMounted { .. }));
}

#[test_log::test]
fn make_link_skips_foreign_directory_entries() {
    let mut sys = System::new();
    let vol = sys.mount("vol", "ext4", "/dev/null");
    // A regular file and a dangling symlink must not abort the scan.
    std::fs::write(sys.dir.path().join("by-uuid/README"), b"not a link").unwrap();
    sys.uuid_symlink("dangling", "/definitely/not/here");
    sys.uuid_symlink("cafe-f00d", "/dev/null");

    let resolver = sys.resolver();
    let mount = resolver.get_mount(&vol).unwrap();
    let link = resolver.make_link(&mount, LinkToken::Uuid).unwrap();
    assert_eq!(link.value(), "cafe-f00d");
}

#[test_log::test]
fn make_link_with_no_matching_entry_reports_no_uuid() {
    let mut sys = System::new();
    let vol = sys.mount("vol", "ext4", "/dev/null");
    std::fs::write(sys.dir.path().join("by-uuid/README"), b"not a link").unwrap();

    let resolver = sys.resolver();
    let mount = resolver.get_mount(&vol).unwrap();
    let err = resolver.make_link(&mount, LinkToken::Uuid).unwrap_err();
    assert!(matches!(err, MountError::NoUuid { .. }));
}

#[test_log::test]
fn all_filesystems_lists_mounts_in_path_order() {
    let mut sys = System::new();
    let b = sys.mount("b-vol", "ext4", "/dev/null");
    let a = sys.mount("a-vol", "tmpfs", "tmpfs");

    let resolver = sys.resolver();
    let mounts = resolver.all_filesystems().unwrap();
    let paths: Vec<&Path> = mounts.iter().map(|m| m.path.as_path()).collect();
    assert_eq!(paths, vec![a.as_path(), b.as_path()]);

    // Virtual filesystems are listed, just without a device.
    assert_eq!(mounts[0].device, None);
    assert_eq!(mounts[1].device.as_deref(), Some(Path::new("/dev/null")));
}
