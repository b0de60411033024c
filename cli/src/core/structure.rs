//! # projgit Structure Data Model
//!
//! File: cli/src/core/structure.rs
//!
//! ## Overview
//!
//! Types describing the result of a scan of the base path:
//!
//! ```text
//! Structure = client -> project -> Project { repositories: repo_type -> [Branch] }
//! ```
//!
//! Every scan builds a fresh `Structure`; nothing here is cached or shared.
//! Ordered maps keep CLI and JSON output deterministic.
//!
//! ## JSON Shape
//!
//! A branch serializes as
//! `{"branch": "main", "status": "Initialized\n  Last commit: ...", "state": "initialized"}`.
//! `status` is the human-readable text, `state` a stable tag for programs.
//!
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed suffix carried by every branch slot directory (`main.git`).
pub const BRANCH_DIR_SUFFIX: &str = ".git";

/// Name of the per-project directory holding the repository types.
pub const REPOSITORIES_DIR: &str = "repositories";

/// Scan result: client name -> project name -> project.
pub type Structure = BTreeMap<String, ClientProjects>;

/// All projects of one client.
pub type ClientProjects = BTreeMap<String, Project>;

/// A single project and the repositories found under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    /// Repository type (e.g. `backend`) -> branches in directory order.
    pub repositories: BTreeMap<String, Vec<Branch>>,
}

/// One branch slot under a repository type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    /// Branch name, i.e. the directory name without the `.git` suffix.
    #[serde(rename = "branch")]
    pub name: String,
    /// Directory name on disk, used to recompute the branch path.
    #[serde(skip)]
    pub dir_name: String,
    #[serde(serialize_with = "serialize_status_text")]
    pub status: RepoStatus,
    pub state: StatusState,
}

impl Branch {
    /// Builds a branch record from its on-disk directory name.
    pub fn from_dir_name(dir_name: &str, status: RepoStatus) -> Self {
        let name = dir_name
            .strip_suffix(BRANCH_DIR_SUFFIX)
            .filter(|stripped| !stripped.is_empty())
            .unwrap_or(dir_name)
            .to_string();
        let state = status.state();
        Self {
            name,
            dir_name: dir_name.to_string(),
            status,
            state,
        }
    }
}

/// Status of a branch slot as reported by the inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoStatus {
    NotARepository,
    /// Initialized, zero commits.
    Empty,
    Initialized(LastCommit),
    /// Inspection itself failed; the scan carries on with siblings.
    Error(InspectError),
}

/// Tip commit metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LastCommit {
    /// Author timestamp, in the author's original UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    pub author: String,
    /// Full raw message, trailing newline included.
    pub message: String,
}

/// Why inspecting a repository failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectErrorKind {
    Io,
    Permission,
    Corrupt,
    Other,
}

impl fmt::Display for InspectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InspectErrorKind::Io => "io",
            InspectErrorKind::Permission => "permission",
            InspectErrorKind::Corrupt => "corrupt",
            InspectErrorKind::Other => "other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectError {
    pub kind: InspectErrorKind,
    pub message: String,
}

/// Machine-readable tag for a `RepoStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusState {
    NotARepository,
    Empty,
    Initialized,
    Error,
}

impl RepoStatus {
    /// The machine-readable tag serialized next to the status text.
    pub fn state(&self) -> StatusState {
        match self {
            RepoStatus::NotARepository => StatusState::NotARepository,
            RepoStatus::Empty => StatusState::Empty,
            RepoStatus::Initialized(_) => StatusState::Initialized,
            RepoStatus::Error(_) => StatusState::Error,
        }
    }

    /// First line of the status text, as shown by the flat listing.
    pub fn header(&self) -> String {
        self.to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoStatus::NotARepository => f.write_str("Not a git repository"),
            RepoStatus::Empty => f.write_str("Empty repository (no commits)"),
            RepoStatus::Initialized(commit) => write!(
                f,
                "Initialized\n  Last commit: {} by {}: {}",
                commit.timestamp.format("%Y-%m-%d %H:%M:%S %z"),
                commit.author,
                commit.message
            ),
            RepoStatus::Error(err) => write!(f, "Error ({}): {}", err.kind, err.message),
        }
    }
}

fn serialize_status_text<S: Serializer>(status: &RepoStatus, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(status)
}

/// Counts used by the summary footer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructureStats {
    pub clients: usize,
    pub projects: usize,
    pub branches: usize,
}

/// Counts clients, projects and branch slots.
///
/// Clients without projects and repository types without branches still count
/// at their own level.
pub fn stats(structure: &Structure) -> StructureStats {
    let mut stats = StructureStats {
        clients: structure.len(),
        ..Default::default()
    };
    for projects in structure.values() {
        stats.projects += projects.len();
        stats.branches += projects
            .values()
            .flat_map(|p| p.repositories.values())
            .map(Vec::len)
            .sum::<usize>();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_commit() -> LastCommit {
        LastCommit {
            timestamp: FixedOffset::east_opt(3600)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
                .unwrap(),
            author: "Ada".into(),
            message: "Second commit\n".into(),
        }
    }

    #[test]
    fn test_branch_name_strips_suffix() {
        let branch = Branch::from_dir_name("main.git", RepoStatus::Empty);
        assert_eq!(branch.name, "main");
        assert_eq!(branch.dir_name, "main.git");

        let plain = Branch::from_dir_name("develop", RepoStatus::NotARepository);
        assert_eq!(plain.name, "develop");

        // A bare ".git" directory keeps its name rather than becoming empty.
        let odd = Branch::from_dir_name(".git", RepoStatus::NotARepository);
        assert_eq!(odd.name, ".git");
    }

    #[test]
    fn test_status_text_and_header() {
        let status = RepoStatus::Initialized(sample_commit());
        let text = status.to_string();
        assert!(text.starts_with("Initialized\n  Last commit: 2024-05-01 12:30:00 +0100 by Ada"));
        assert!(text.ends_with("Second commit\n"));
        assert_eq!(status.header(), "Initialized");

        let err = RepoStatus::Error(InspectError {
            kind: InspectErrorKind::Corrupt,
            message: "bad object".into(),
        });
        assert_eq!(err.to_string(), "Error (corrupt): bad object");
    }

    #[test]
    fn test_branch_json_shape() {
        let branch = Branch::from_dir_name("main.git", RepoStatus::Initialized(sample_commit()));
        let value = serde_json::to_value(&branch).unwrap();
        assert_eq!(value["branch"], "main");
        assert_eq!(value["state"], "initialized");
        assert!(value["status"].as_str().unwrap().contains("by Ada: Second commit"));
        assert!(value.get("dir_name").is_none());
    }

    #[test]
    fn test_stats_counts_every_level() {
        let mut project = Project::default();
        project.repositories.insert(
            "backend".into(),
            vec![
                Branch::from_dir_name("main.git", RepoStatus::Empty),
                Branch::from_dir_name("dev.git", RepoStatus::Empty),
            ],
        );
        let mut structure = Structure::new();
        structure
            .entry("acme".into())
            .or_default()
            .insert("site".into(), project);
        structure.entry("globex".into()).or_default();

        assert_eq!(
            stats(&structure),
            StructureStats {
                clients: 2,
                projects: 1,
                branches: 2
            }
        );
    }
}
