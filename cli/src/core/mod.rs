//! # projgit Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! The pieces every command builds on:
//! - `config`: configuration loading, environment overrides and validation
//! - `error`: error types and the `Result` alias
//! - `structure`: the scan result data model (`Structure`, `Project`, `Branch`, `RepoStatus`)
//! - `scanner`: walks the base path and inspects every branch slot
//! - `provisioner`: creates branch slot directories and bare repositories
//! - `render`: tree, flat listing and summary views of a `Structure`
//! - `token`: issuing and validating HS256 bearer tokens
//!
//! ```rust
//! use crate::common::git::GitInspector;
//! use crate::core::{config, render, scanner};
//!
//! let cfg = config::load_config(None)?;
//! let structure = scanner::scan(&cfg.base_path(), &GitInspector);
//! print!("{}", render::render_tree(&structure));
//! ```
//!
pub mod config;
pub mod error;
pub mod provisioner;
pub mod render;
pub mod scanner;
pub mod structure;
pub mod token;
