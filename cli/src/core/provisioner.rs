//! # projgit Project Provisioner
//!
//! File: cli/src/core/provisioner.rs
//!
//! ## Overview
//!
//! Creates the directory for a branch slot and initializes a bare git
//! repository in it:
//!
//! ```text
//! <base>/<client>/<project>/repositories/<repo_type>/<branch>.git
//! ```
//!
//! ## Behavior
//!
//! 1. Trim every field. `client` and `project` are required; `repo_type`
//!    defaults to `default` and `branch` to `main` when missing or blank.
//! 2. Reject any field that is not a single plain path segment. Nothing on
//!    disk is touched when validation fails.
//! 3. `create_dir_all` the full path. Existing directories are fine, so
//!    re-running the same request succeeds.
//! 4. `git init --bare` the leaf. If that fails the directory stays where it
//!    is; running the provisioner again finishes the job.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::common::git::init_bare_repository;
use crate::core::error::ProvisionError;
use crate::core::structure::{BRANCH_DIR_SUFFIX, REPOSITORIES_DIR};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Repository type used when none is given.
pub const DEFAULT_REPO_TYPE: &str = "default";
/// Branch used when none is given.
pub const DEFAULT_BRANCH: &str = "main";

/// A request to provision one branch slot. Also the body of `POST /api/project`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectRequest {
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub repo_type: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl ProjectRequest {
    /// Request with the required fields set; `None` falls back to the defaults.
    pub fn new(client: &str, project: &str, repo_type: Option<&str>, branch: Option<&str>) -> Self {
        Self {
            client: Some(client.to_string()),
            project: Some(project.to_string()),
            repo_type: repo_type.map(str::to_string),
            branch: branch.map(str::to_string),
        }
    }
}

/// A validated request with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSlot {
    pub client: String,
    pub project: String,
    pub repo_type: String,
    pub branch: String,
}

impl BranchSlot {
    /// Validates `request`, applying defaults for `repo_type` and `branch`.
    pub fn from_request(request: &ProjectRequest) -> Result<Self, ProvisionError> {
        let client = trimmed(&request.client);
        let project = trimmed(&request.project);
        let (Some(client), Some(project)) = (client, project) else {
            return Err(ProvisionError::Validation(
                "Client and project are required.".to_string(),
            ));
        };

        let slot = Self {
            client: client.to_string(),
            project: project.to_string(),
            repo_type: trimmed(&request.repo_type)
                .unwrap_or(DEFAULT_REPO_TYPE)
                .to_string(),
            branch: trimmed(&request.branch).unwrap_or(DEFAULT_BRANCH).to_string(),
        };

        for (field, value) in [
            ("client", &slot.client),
            ("project", &slot.project),
            ("repo_type", &slot.repo_type),
            ("branch", &slot.branch),
        ] {
            validate_segment(field, value)?;
        }
        Ok(slot)
    }

    /// Path of the bare repository directory for this slot under `base_path`.
    pub fn path_under(&self, base_path: &Path) -> PathBuf {
        base_path
            .join(&self.client)
            .join(&self.project)
            .join(REPOSITORIES_DIR)
            .join(&self.repo_type)
            .join(format!("{}{}", self.branch, BRANCH_DIR_SUFFIX))
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn validate_segment(field: &str, value: &str) -> Result<(), ProvisionError> {
    let invalid = value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ProvisionError::Validation(format!(
            "Invalid {} '{}': must be a single directory name.",
            field, value
        )));
    }
    Ok(())
}

/// Creates the branch slot directory and initializes a bare repository inside it.
///
/// Returns the absolute path of the repository directory. Calling it twice
/// with the same request succeeds both times and returns the same path.
///
/// # Errors
///
/// * `ProvisionError::Validation` - Missing client or project, or a field that is
///   not a single directory name. Nothing is created.
/// * `ProvisionError::CreateDir` - A component of the path could not be created.
/// * `ProvisionError::InitRepository` - `git init --bare` failed. The directories
///   created so far are left in place.
pub fn provision(base_path: &Path, request: &ProjectRequest) -> Result<PathBuf, ProvisionError> {
    let slot = BranchSlot::from_request(request)?;
    let path = slot.path_under(base_path);
    debug!("Provisioning {:?} at {}", slot, path.display());

    ensure_dir_exists(&path).map_err(|source| ProvisionError::CreateDir {
        path: path.clone(),
        source,
    })?;

    // Canonical form so repeated calls report an identical absolute path.
    let path = path
        .canonicalize()
        .map_err(|source| ProvisionError::CreateDir {
            path: path.clone(),
            source,
        })?;

    init_bare_repository(&path).map_err(|source| ProvisionError::InitRepository {
        path: path.clone(),
        source,
    })?;

    info!(
        "Provisioned {}/{} ({}:{}) at {}",
        slot.client,
        slot.project,
        slot.repo_type,
        slot.branch,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::git::inspect::inspect_repository;
    use crate::core::structure::RepoStatus;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_applied() {
        let slot = BranchSlot::from_request(&ProjectRequest::new("acme", "site", None, Some("  ")))
            .unwrap();
        assert_eq!(slot.repo_type, DEFAULT_REPO_TYPE);
        assert_eq!(slot.branch, DEFAULT_BRANCH);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let slot = BranchSlot::from_request(&ProjectRequest::new(
            " acme ",
            "site\n",
            Some(" backend"),
            Some("dev "),
        ))
        .unwrap();
        assert_eq!(
            slot,
            BranchSlot {
                client: "acme".into(),
                project: "site".into(),
                repo_type: "backend".into(),
                branch: "dev".into(),
            }
        );
    }

    #[test]
    fn test_client_and_project_required() {
        let err = BranchSlot::from_request(&ProjectRequest {
            client: Some("acme".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Client and project are required.");

        let err = BranchSlot::from_request(&ProjectRequest::new("   ", "site", None, None))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_path_segments_rejected() {
        for (client, branch) in [("..", "main"), ("acme", "feature/x"), ("a\\b", "main")] {
            let err = BranchSlot::from_request(&ProjectRequest::new(client, "site", None, Some(branch)))
                .unwrap_err();
            assert!(err.is_validation(), "{client}/{branch} should be rejected");
        }
    }

    #[test]
    fn test_path_layout() {
        let slot = BranchSlot::from_request(&ProjectRequest::new("acme", "site", Some("backend"), None))
            .unwrap();
        assert_eq!(
            slot.path_under(Path::new("/srv/projects")),
            PathBuf::from("/srv/projects/acme/site/repositories/backend/main.git")
        );
    }

    #[test]
    fn test_provision_creates_parent_chain_and_bare_repo() {
        let temp = TempDir::new().unwrap();
        let request = ProjectRequest::new("acme", "site", Some("backend"), Some("main"));

        let path = provision(temp.path(), &request).unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("acme/site/repositories/backend/main.git"));
        assert_eq!(inspect_repository(&path), RepoStatus::Empty);
    }

    #[test]
    fn test_provision_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let request = ProjectRequest::new("acme", "site", None, None);

        let first = provision(temp.path(), &request).unwrap();
        let second = provision(temp.path(), &request).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("acme/site/repositories/default/main.git"));
    }

    #[test]
    fn test_provision_fails_when_path_is_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("acme"), "a file, not a directory").unwrap();

        let err = provision(temp.path(), &ProjectRequest::new("acme", "site", None, None))
            .unwrap_err();
        assert!(matches!(err, ProvisionError::CreateDir { .. }));
    }

    #[test]
    fn test_init_failure_keeps_created_directory() {
        let temp = TempDir::new().unwrap();
        let slot = temp.path().join("acme/site/repositories/default/main.git");
        std::fs::create_dir_all(&slot).unwrap();
        // Plain files where the repository layout needs directories.
        std::fs::write(slot.join("objects"), "not a directory").unwrap();
        std::fs::write(slot.join("refs"), "not a directory").unwrap();

        let err = provision(temp.path(), &ProjectRequest::new("acme", "site", None, None))
            .unwrap_err();

        match &err {
            ProvisionError::InitRepository { path, .. } => {
                assert!(path.ends_with("acme/site/repositories/default/main.git"))
            }
            other => panic!("expected InitRepository, got {:?}", other),
        }
        assert!(!err.is_validation());
        assert!(slot.is_dir());
    }

    #[test]
    fn test_validation_failure_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let err = provision(temp.path(), &ProjectRequest::new("acme", "", None, None)).unwrap_err();
        assert!(err.is_validation());
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }
}
