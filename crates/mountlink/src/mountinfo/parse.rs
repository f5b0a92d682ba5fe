//! Structural parsing of one mountinfo line.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use super::escape::unescape_octal;

/// The fields of one mountinfo line this crate cares about, unescaped but
/// not yet canonicalized or verified against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMount {
    /// Mount point directory, exactly as the kernel reported it.
    pub mountpoint: PathBuf,
    /// Filesystem type, e.g. "ext4".
    pub fs_type: String,
    /// Mount source: a device path for real filesystems, an arbitrary
    /// label ("tmpfs", "cgroup2", ...) for virtual ones.
    pub source: PathBuf,
}

/// Parse one line of the kernel mountinfo format.
///
/// The line contains the following space-separated fields:
///
/// ```text
/// [0] mount ID  [1] parent ID  [2] major:minor  [3] root  [4] mount point
/// [5] mount options  [6..n-1] optional field(s)  [n] separator
/// [n+1] filesystem type  [n+2] mount source  [n+3] super options
/// ```
///
/// Returns `None` for structurally invalid lines: fewer than 10 fields, no
/// `-` separator, or too few fields after it.
#[must_use]
pub fn parse_line(line: &[u8]) -> Option<RawMount> {
    let fields: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
    if fields.len() < 10 {
        return None;
    }

    // Find the optional-field separator. New fields may be appended in
    // future kernels, so don't assume n == fields.len() - 4.
    let mut n = 6;
    while fields[n] != b"-" {
        n += 1;
        if n >= fields.len() {
            return None;
        }
    }
    if n + 3 >= fields.len() {
        return None;
    }

    Some(RawMount {
        mountpoint: PathBuf::from(OsString::from_vec(unescape_octal(fields[4]))),
        fs_type: String::from_utf8_lossy(&unescape_octal(fields[n + 1])).into_owned(),
        source: PathBuf::from(OsString::from_vec(unescape_octal(fields[n + 2]))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_line() {
        let raw = parse_line(
            b"36 25 8:2 / /home rw,noatime shared:24 - ext4 /dev/sda2 rw,data=ordered",
        )
        .unwrap();
        assert_eq!(raw.mountpoint, PathBuf::from("/home"));
        assert_eq!(raw.fs_type, "ext4");
        assert_eq!(raw.source, PathBuf::from("/dev/sda2"));
    }

    #[test]
    fn no_optional_fields() {
        let raw = parse_line(b"481 480 0:47 / /proc rw,nosuid,nodev,noexec,relatime - proc proc rw")
            .unwrap();
        assert_eq!(raw.mountpoint, PathBuf::from("/proc"));
        assert_eq!(raw.fs_type, "proc");
    }

    #[test]
    fn multiple_optional_fields() {
        let raw = parse_line(
            b"480 454 0:22 /root / ro,noatime shared:224 master:1 unbindable - btrfs /dev/mmcblk0p2 rw,ssd",
        )
        .unwrap();
        assert_eq!(raw.mountpoint, PathBuf::from("/"));
        assert_eq!(raw.fs_type, "btrfs");
        assert_eq!(raw.source, PathBuf::from("/dev/mmcblk0p2"));
    }

    #[test]
    fn escaped_mountpoint() {
        let raw = parse_line(
            br"42 25 8:3 / /mnt/usb\040drive rw shared:30 - vfat /dev/sdb1 rw",
        )
        .unwrap();
        assert_eq!(raw.mountpoint, PathBuf::from("/mnt/usb drive"));
    }

    #[test]
    fn too_few_fields() {
        assert_eq!(parse_line(b""), None);
        assert_eq!(parse_line(b"36 25 8:2 / /home rw - ext4 /dev/sda2"), None);
    }

    #[test]
    fn missing_separator() {
        assert_eq!(
            parse_line(b"36 25 8:2 / /home rw,noatime shared:24 ext4 /dev/sda2 rw extra"),
            None
        );
    }

    #[test]
    fn truncated_after_separator() {
        assert_eq!(
            parse_line(b"36 25 8:2 / /home rw,noatime shared:24 more fields - ext4 /dev/sda2"),
            None
        );
    }

    #[test]
    fn separator_position_is_not_assumed() {
        // A literal "-" inside the trailing fields must not be mistaken
        // for the separator; only the first one from field 6 counts.
        let raw = parse_line(b"36 25 8:2 / /home rw,noatime shared:24 - ext4 /dev/sda2 rw - x")
            .unwrap();
        assert_eq!(raw.fs_type, "ext4");
    }
}
