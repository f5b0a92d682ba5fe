//! Common error types for mount resolution.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`MountError`].
pub type MountResult<T> = Result<T, MountError>;

/// Errors produced while loading the mount table or resolving mounts.
///
/// Per-record problems during a table load (unparseable lines, vanished
/// mountpoints) are logged and skipped, never surfaced here; these variants
/// cover the failures a caller must act on.
#[derive(Error, Diagnostic, Debug)]
pub enum MountError {
    /// The queried path is not on, or under, any known mountpoint.
    #[error("{path:?} is not a mountpoint")]
    #[diagnostic(
        code(mountlink::not_a_mountpoint),
        help("If the mount table changed since it was first read, force a refresh with update()")
    )]
    NotAMountpoint {
        /// The canonicalized path that was queried.
        path: PathBuf,
    },

    /// A filesystem link is not of the form `TOKEN=VALUE`.
    #[error("link {link:?} format is invalid")]
    #[diagnostic(
        code(mountlink::link::invalid),
        help("Links must contain exactly one '=', e.g. UUID=<value>")
    )]
    InvalidLink {
        /// The offending link string.
        link: String,
    },

    /// A filesystem link uses a token other than `UUID`.
    #[error("token type {token:?} not supported")]
    #[diagnostic(code(mountlink::link::unsupported_token))]
    UnsupportedToken {
        /// The unsupported token.
        token: String,
    },

    /// A link value is not usable as a UUID directory entry name.
    #[error("value {value:?} is not a UUID")]
    #[diagnostic(
        code(mountlink::link::invalid_uuid),
        help("UUID values must be plain file names, with no '/' or '..' components")
    )]
    InvalidUuid {
        /// The rejected value.
        value: String,
    },

    /// No device symlink with the given UUID exists.
    #[error("no device with UUID {value:?}")]
    #[diagnostic(code(mountlink::link::no_device_with_uuid))]
    NoDeviceWithUuid {
        /// The UUID that failed to resolve.
        value: String,
    },

    /// The device behind a link resolved, but is not mounted anywhere.
    #[error("no mounts for device {device:?}")]
    #[diagnostic(
        code(mountlink::link::device_not_mounted),
        help("The device exists but has no mounted filesystem; it may have been unmounted")
    )]
    DeviceNotMounted {
        /// The canonical device path.
        device: PathBuf,
    },

    /// A link cannot be made for a mount that has no backing device.
    #[error("no device for mount {path:?}")]
    #[diagnostic(code(mountlink::link::no_device))]
    NoDevice {
        /// The mountpoint of the device-less mount.
        path: PathBuf,
    },

    /// No UUID symlink points at the mount's device.
    #[error("device {device:?} has no UUID")]
    #[diagnostic(code(mountlink::link::no_uuid))]
    NoUuid {
        /// The canonical device path with no known UUID.
        device: PathBuf,
    },

    /// A path does not exist or a component of it is dangling.
    #[error("path {path:?} does not exist")]
    #[diagnostic(code(mountlink::path::not_found))]
    PathNotFound {
        /// The path that failed to resolve.
        path: PathBuf,
    },

    /// A path was expected to be absolute and canonical.
    #[error("path {path:?} is not canonical")]
    #[diagnostic(code(mountlink::path::not_canonical))]
    NotCanonical {
        /// The non-canonical path.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(mountlink::io))]
    Io(#[from] std::io::Error),
}
