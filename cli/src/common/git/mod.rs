//! # projgit Git Module Interface
//!
//! File: cli/src/common/git/mod.rs
//!
//! ## Overview
//!
//! Everything projgit does with git goes through this module, which wraps the
//! `git2` (libgit2) bindings:
//!
//! - **`inspect`**: read-only status of a branch slot (`StatusInspector`, `GitInspector`).
//! - **`init`**: bare repository initialization for the provisioner.
//!

/// Repository status inspection.
pub mod inspect;
/// Bare repository initialization.
pub mod init;

pub use init::init_bare_repository;
pub use inspect::{GitInspector, StatusInspector};
