//! # mountlink-common
//!
//! Shared foundation for the mountlink crates.
//!
//! This crate provides:
//! - The common error type for mount resolution
//! - The system locations consulted by the mount table loader
//! - Path canonicalization and file-type predicates
//!
//! These are the pieces every mountlink crate agrees on; the mount table
//! itself lives in the `mountlink` crate.

#![warn(missing_docs)]

pub mod canonical;
pub mod error;
pub mod paths;

pub use canonical::{canonicalize_path, is_device, is_dir};
pub use error::{MountError, MountResult};
pub use paths::MountPaths;
