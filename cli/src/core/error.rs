//! # projgit Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared across projgit. Command handlers
//! and plumbing code return `Result<T>` (an alias for `anyhow::Result<T>`) so
//! context can be attached with `.context(...)`; the enums below cover the
//! failures callers need to tell apart.
//!
//! ## Architecture
//!
//! - `ProjgitError`: application-level failures (configuration, lookups, tokens).
//! - `ProvisionError`: failures of the project provisioner, split into
//!   validation problems (caller's fault, rejected before touching the
//!   filesystem) and provisioning problems (directory creation or `git init`).
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! Errors raised while inspecting a single repository never show up here; they
//! are folded into that branch's `RepoStatus` (see `core::structure`).
//!
//! ## Examples
//!
//! ```rust
//! match provisioner::provision(&base, &request) {
//!     Ok(path) => println!("Created {}", path.display()),
//!     Err(ProvisionError::Validation(msg)) => eprintln!("Bad input: {}", msg),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the projgit application.
#[derive(Error, Debug)]
pub enum ProjgitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The client '{client}' does not exist.")]
    ClientNotFound { client: String },

    #[error("The project '{project}' does not exist for the client '{client}'.")]
    ProjectNotFound { client: String, project: String },

    #[error("Identifier '{0}' is not in the list of valid identifiers.")]
    InvalidIdentifier(String),

    #[error("Token error: {source}")]
    Token {
        #[from]
        source: jsonwebtoken::errors::Error,
    },
}

/// Errors produced by the project provisioner.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Input was rejected before any filesystem access.
    #[error("{0}")]
    Validation(String),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory exists but `git init --bare` failed. The directory is left in place.
    #[error("Failed to initialize bare repository at {}: {source}", path.display())]
    InitRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

impl ProvisionError {
    /// True when the request itself was at fault (maps to HTTP 400).
    pub fn is_validation(&self) -> bool {
        matches!(self, ProvisionError::Validation(_))
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
