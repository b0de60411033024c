//! # Repository Status Inspection
//!
//! File: cli/src/common/git/inspect.rs
//!
//! ## Overview
//!
//! Determines the `RepoStatus` of a branch slot directory using `git2`:
//!
//! 1. Directory unreadable (permission denied) -> `Error(Permission)`.
//! 2. `Repository::open` fails with `NotFound` -> `NotARepository`.
//! 3. `HEAD` is unborn (or missing) -> `Empty`.
//! 4. Otherwise the tip commit's author time, author name and raw message
//!    -> `Initialized`.
//!
//! Every other failure is converted into `RepoStatus::Error` so the scanner can
//! keep walking siblings. Inspection never writes to the repository.
//!
//! The `StatusInspector` trait is the seam the scanner and the API server
//! depend on; `GitInspector` is the real implementation.
//!
use crate::core::structure::{InspectError, InspectErrorKind, LastCommit, RepoStatus};
use chrono::{DateTime, FixedOffset};
use git2::{ErrorClass, ErrorCode, Repository};
use std::path::Path;
use tracing::{debug, warn};

/// Reports the status of a single branch slot directory.
pub trait StatusInspector: Send + Sync {
    fn inspect(&self, path: &Path) -> RepoStatus;
}

/// `StatusInspector` backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitInspector;

impl StatusInspector for GitInspector {
    fn inspect(&self, path: &Path) -> RepoStatus {
        inspect_repository(path)
    }
}

/// # Inspect Repository (`inspect_repository`)
///
/// Inspects `path` as a git repository. Never fails; errors become `RepoStatus::Error`.
///
/// ## Returns
///
/// * `RepoStatus::NotARepository` - The directory is readable but holds no repository.
/// * `RepoStatus::Empty` - HEAD points at a branch with no commits.
/// * `RepoStatus::Initialized` - Author time, author name and message of the tip commit.
/// * `RepoStatus::Error` - `permission` or `io` when the directory cannot be read,
///   `corrupt` for a bad HEAD, ref or tip object.
pub fn inspect_repository(path: &Path) -> RepoStatus {
    // Read the directory first so permission problems are not reported as
    // "not a repository" by libgit2's discovery.
    if let Err(e) = std::fs::read_dir(path) {
        let kind = if e.kind() == std::io::ErrorKind::PermissionDenied {
            InspectErrorKind::Permission
        } else {
            InspectErrorKind::Io
        };
        warn!("Cannot read branch directory {}: {}", path.display(), e);
        return RepoStatus::Error(InspectError {
            kind,
            message: e.to_string(),
        });
    }

    let repo = match Repository::open(path) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => {
            debug!("{} is not a git repository", path.display());
            return RepoStatus::NotARepository;
        }
        Err(e) => return git_error_status(path, &e),
    };

    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            debug!("{} has no commits yet", path.display());
            return RepoStatus::Empty;
        }
        Err(e) => return git_error_status(path, &e),
    };

    // HEAD resolved to an id, so a failure here means the object store does
    // not hold a readable commit for it.
    let commit = match head.peel_to_commit() {
        Ok(commit) => commit,
        Err(e) => {
            let kind = match e.class() {
                ErrorClass::Os | ErrorClass::Filesystem => InspectErrorKind::Io,
                _ => InspectErrorKind::Corrupt,
            };
            return error_status(path, &e, kind);
        }
    };

    let author = commit.author();
    let timestamp = match commit_time(author.when()) {
        Some(ts) => ts,
        None => {
            return RepoStatus::Error(InspectError {
                kind: InspectErrorKind::Corrupt,
                message: format!("commit {} has an out-of-range timestamp", commit.id()),
            })
        }
    };

    RepoStatus::Initialized(LastCommit {
        timestamp,
        author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        message: String::from_utf8_lossy(commit.message_raw_bytes()).into_owned(),
    })
}

fn commit_time(when: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)?;
    DateTime::from_timestamp(when.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}

fn git_error_status(path: &Path, err: &git2::Error) -> RepoStatus {
    error_status(path, err, classify(err))
}

/// Maps a libgit2 error class onto an `InspectErrorKind`.
fn classify(err: &git2::Error) -> InspectErrorKind {
    match err.class() {
        ErrorClass::Os | ErrorClass::Filesystem => InspectErrorKind::Io,
        ErrorClass::Odb
        | ErrorClass::Object
        | ErrorClass::Zlib
        | ErrorClass::Index
        | ErrorClass::Reference
        | ErrorClass::Repository => InspectErrorKind::Corrupt,
        _ => InspectErrorKind::Other,
    }
}

fn error_status(path: &Path, err: &git2::Error, kind: InspectErrorKind) -> RepoStatus {
    warn!("Failed to inspect repository at {}: {}", path.display(), err);
    RepoStatus::Error(InspectError {
        kind,
        message: err.message().to_string(),
    })
}
