//! # projgit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! Foundational filesystem helpers. Import from the submodule directly,
//! e.g. `use crate::common::fs::io::ensure_dir_exists;`.
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`).
pub mod io;
