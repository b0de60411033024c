//! # projgit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers with no knowledge of the project tree layout:
//!
//! - **`fs`**: directory creation and file reading.
//! - **`git`**: repository inspection and bare repository initialization via `git2`.
//! - **`ui`**: line-oriented terminal prompts.
//!

pub mod fs;
pub mod git;
pub mod ui;
