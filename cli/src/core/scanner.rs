//! # projgit Directory Structure Scanner
//!
//! File: cli/src/core/scanner.rs
//!
//! ## Overview
//!
//! Walks the base path and builds a `Structure`:
//!
//! ```text
//! <base>/
//! `-- <client>/
//!     `-- <project>/
//!         `-- repositories/
//!             `-- <repo_type>/
//!                 `-- <branch>.git     <- handed to the StatusInspector
//! ```
//!
//! ## Rules
//!
//! - Only directories count at every level; files are skipped silently.
//! - A project without a `repositories` directory is reported with no repositories.
//! - A directory that cannot be listed (permission denied, removed mid-walk)
//!   contributes nothing. The failure is logged at `warn` and the walk moves on
//!   to its siblings, so one bad subtree never aborts the scan.
//! - A missing or unreadable base path yields an empty `Structure`.
//!
//! The scan is synchronous and is redone from scratch on every call.
//!
use crate::common::git::StatusInspector;
use crate::core::structure::{Branch, Project, Structure, REPOSITORIES_DIR};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// # Scan (`scan`)
///
/// Scans `base_path` and inspects every branch slot with `inspector`.
///
/// ## Arguments
///
/// * `base_path` - Root of the `<client>/<project>/repositories/<type>/<branch>` tree.
/// * `inspector` - Called once per branch slot directory.
///
/// ## Returns
///
/// * `Structure` - Every client directory, even those without projects. Never fails;
///   unreadable directories are logged and left out.
pub fn scan(base_path: &Path, inspector: &dyn StatusInspector) -> Structure {
    debug!("Scanning project tree under {}", base_path.display());
    let mut structure = Structure::new();

    // Clients and projects are the first two directory levels.
    for (client_name, client_path) in list_subdirectories(base_path) {
        let projects = structure.entry(client_name).or_default();
        for (project_name, project_path) in list_subdirectories(&client_path) {
            projects.insert(project_name, scan_project(&project_path, inspector));
        }
    }

    debug!("Scan found {} client(s)", structure.len());
    structure
}

fn scan_project(project_path: &Path, inspector: &dyn StatusInspector) -> Project {
    let mut project = Project::default();
    let repositories_path = project_path.join(REPOSITORIES_DIR);
    if !repositories_path.is_dir() {
        debug!(
            "No '{}' directory in {}",
            REPOSITORIES_DIR,
            project_path.display()
        );
        return project;
    }

    for (repo_type, repo_type_path) in list_subdirectories(&repositories_path) {
        let branches = list_subdirectories(&repo_type_path)
            .into_iter()
            .map(|(dir_name, branch_path)| {
                Branch::from_dir_name(&dir_name, inspector.inspect(&branch_path))
            })
            .collect();
        project.repositories.insert(repo_type, branches);
    }
    project
}

/// Immediate subdirectories of `dir`, sorted by name. Listing errors are logged and skipped.
fn list_subdirectories(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut found = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        found.push((name, entry.into_path()));
    }
    found
}
