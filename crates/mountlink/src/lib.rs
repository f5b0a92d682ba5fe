//! # mountlink
//!
//! Mountpoint resolution with stable UUID device links for Linux.
//!
//! Raw device paths like `/dev/sda1` are unstable across reboots and device
//! renumbering; the symlinks under `/dev/disk/by-uuid` are not. This crate
//! reads the kernel's mountinfo table into an in-memory index and maps both
//! ways between mountpoints and `UUID=<value>` links, so tooling can durably
//! reference "the filesystem at this path".
//!
//! ## Usage
//!
//! ```no_run
//! use mountlink::{Link, MountResolver};
//!
//! # fn example() -> mountlink_common::MountResult<()> {
//! let resolver = MountResolver::new();
//!
//! // Which mount contains this path?
//! let mount = resolver.find_mount("/home/user/project".as_ref())?;
//!
//! // A name for it that survives reboots.
//! let link = resolver.make_link(&mount, mountlink::LinkToken::Uuid)?;
//!
//! // And back again.
//! let link: Link = link.to_string().parse()?;
//! let mounts = resolver.mounts_for_link(&link)?;
//! # Ok(())
//! # }
//! ```
//!
//! The mount table is read once and cached; it never refreshes on its own.
//! Call [`MountResolver::update`] to observe mounts and unmounts that
//! happened after the first query.

#![warn(missing_docs)]

pub mod link;
pub mod mount;
pub mod mountinfo;
pub mod resolver;

mod table;

pub use link::{Link, LinkToken};
pub use mount::Mount;
pub use resolver::MountResolver;
