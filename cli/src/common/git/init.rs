//! # Bare Repository Initialization
//!
//! File: cli/src/common/git/init.rs
//!
//! Thin wrapper over `git2::Repository::init_bare`. Re-initializing a path that
//! already holds a bare repository succeeds and leaves its history untouched.
//!
use git2::Repository;
use std::path::Path;
use tracing::info;

/// Initializes a bare repository (no working tree) at `path`.
///
/// # Errors
///
/// Returns the libgit2 error if the repository layout cannot be written, for
/// instance when a file sits where `objects` or `refs` should go.
pub fn init_bare_repository(path: &Path) -> Result<(), git2::Error> {
    let repo = Repository::init_bare(path)?;
    info!("Initialized bare git repository at {}", repo.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::git::inspect::test_support::commit;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_bare_repository() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.git");
        std::fs::create_dir(&path).unwrap();

        init_bare_repository(&path).unwrap();

        let repo = Repository::open(&path).unwrap();
        assert!(repo.is_bare());
        assert!(path.join("HEAD").is_file());
    }

    #[test]
    fn test_reinit_keeps_history() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.git");
        init_bare_repository(&path).unwrap();
        let repo = Repository::open(&path).unwrap();
        commit(&repo, "Ada", "Initial\n", 1_700_000_000);
        drop(repo);

        init_bare_repository(&path).unwrap();

        let repo = Repository::open(&path).unwrap();
        let tip = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(tip.message(), Some("Initial\n"));
    }
}
