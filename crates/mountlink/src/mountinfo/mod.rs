//! Parsing of the kernel mountinfo text format.
//!
//! One mountinfo line describes one mount. The format is space-separated
//! with a variable-length optional-field region and octal-escaped bytes in
//! path fields; see `Documentation/filesystems/proc.txt` in the kernel
//! tree. Everything here is pure: no I/O, no shared state.

mod escape;
mod parse;

pub use escape::unescape_octal;
pub use parse::{RawMount, parse_line};
