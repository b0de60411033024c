//! # projgit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the provisioner and configuration
//! loading:
//! - **`ensure_dir_exists`**: `mkdir -p` that succeeds when the directory is
//!   already there and fails when the path is occupied by something else.
//! - **`read_file_to_string`**: `fs::read_to_string` with the path in the error.
//!
//! `ensure_dir_exists` returns a plain `std::io::Result` so the provisioner can
//! keep the underlying `io::Error` in `ProvisionError::CreateDir`.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`, creating missing parents.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// it fails (e.g. permissions, a parent component is a file).
pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", path.display()),
        ));
    } else {
        debug!("Directory already exists: {}", path.display());
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` naming `path` if the file cannot be opened or is not UTF-8.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
