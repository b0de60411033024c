//! # projgit Structure Rendering
//!
//! File: cli/src/core/render.rs
//!
//! ## Overview
//!
//! Text views of a scanned `Structure` for the CLI. All functions are pure:
//! they build a `String` and leave printing to the caller.
//!
//! - **`render_tree`**: indented tree with ASCII connectors, rooted at `Projects`.
//! - **`render_listing`**: one line per branch with its absolute path and the
//!   first line of its status.
//! - **`render_summary`**: per-branch full status (commit detail included),
//!   no paths, plus a totals line.
//!
//! Example tree:
//!
//! ```text
//! Projects
//! `-- acme
//!     `-- site
//!         |-- backend
//!         |   `-- main [Initialized]
//!         `-- docs
//! ```
//!
use crate::core::structure::{stats, Branch, Structure, REPOSITORIES_DIR};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Label of the tree root.
pub const TREE_ROOT_LABEL: &str = "Projects";

/// Connector for intermediate children.
const TEE: &str = "|-- ";
/// Connector for the last child.
const ELBOW: &str = "`-- ";
/// Continuation line below an intermediate child.
const PIPE: &str = "|   ";
/// Indentation below the last child.
const SPACER: &str = "    ";

/// Intermediate tree node; labels are already formatted.
struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }
}

fn branch_label(branch: &Branch) -> String {
    format!("{} [{}]", branch.name, branch.status.header())
}

fn build_nodes(structure: &Structure) -> Vec<Node> {
    structure
        .iter()
        .map(|(client, projects)| Node {
            label: client.clone(),
            children: projects
                .iter()
                .map(|(project_name, project)| Node {
                    label: project_name.clone(),
                    children: project
                        .repositories
                        .iter()
                        .map(|(repo_type, branches)| Node {
                            label: repo_type.clone(),
                            children: branches.iter().map(|b| Node::leaf(branch_label(b))).collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Renders the structure as an indented tree.
///
/// The root line is `Projects`, followed by clients, projects, types and
/// branches with their full status text. Always ends with a newline.
pub fn render_tree(structure: &Structure) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(output, "{}", TREE_ROOT_LABEL);
    write_children(&build_nodes(structure), &mut String::new(), &mut output);
    output
}

fn write_children(nodes: &[Node], current_prefix: &mut String, output: &mut String) {
    let count = nodes.len();
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { ELBOW } else { TEE };
        let _ = writeln!(output, "{}{}{}", current_prefix, connector, node.label);

        if !node.children.is_empty() {
            let component = if is_last { SPACER } else { PIPE };
            current_prefix.push_str(component);
            write_children(&node.children, current_prefix, output);
            current_prefix.truncate(current_prefix.len() - component.len());
        }
    }
}

/// # Render Listing (`render_listing`)
///
/// Renders one line per branch: type, name, absolute path, status header.
///
/// ## Arguments
///
/// * `structure` - Result of a scan.
/// * `base_path` - The scanned root. Paths are joined onto it as given, so callers
///   pass the absolute form held by `Config::base_path`.
///
/// ## Returns
///
/// * `String` - A `No clients found under <base>` line when the structure is empty.
pub fn render_listing(structure: &Structure, base_path: &Path) -> String {
    let mut output = String::new();
    if structure.is_empty() {
        let _ = writeln!(output, "No clients found under {}", base_path.display());
        return output;
    }

    for (client, projects) in structure {
        let _ = writeln!(output, "Client: {}", client);
        for (project_name, project) in projects {
            let _ = writeln!(output, "  Project: {}", project_name);
            if project.repositories.is_empty() {
                let _ = writeln!(output, "    (no repositories)");
            }
            for (repo_type, branches) in &project.repositories {
                if branches.is_empty() {
                    let _ = writeln!(output, "    {}: (no branches)", repo_type);
                }
                for branch in branches {
                    // Rebuilt from the on-disk directory name, suffix included.
                    let path = base_path
                        .join(client)
                        .join(project_name)
                        .join(REPOSITORIES_DIR)
                        .join(repo_type)
                        .join(&branch.dir_name);
                    let _ = writeln!(
                        output,
                        "    {}/{}: {} - {}",
                        repo_type,
                        branch.name,
                        path.display(),
                        branch.status.header()
                    );
                }
            }
        }
    }
    output
}

/// Renders the full status of every branch, without paths, plus totals.
pub fn render_summary(structure: &Structure) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "General summary");
    let _ = writeln!(output, "===============");

    for (client, projects) in structure {
        let _ = writeln!(output, "Client: {}", client);
        for (project_name, project) in projects {
            let _ = writeln!(output, "  Project: {}", project_name);
            for (repo_type, branches) in &project.repositories {
                let _ = writeln!(output, "    Repository type: {}", repo_type);
                for branch in branches {
                    let _ = writeln!(output, "      Branch: {}", branch.name);
                    for (i, line) in branch.status.to_string().lines().enumerate() {
                        if i == 0 {
                            let _ = writeln!(output, "        Status: {}", line);
                        } else {
                            let _ = writeln!(output, "        {}", line);
                        }
                    }
                }
            }
        }
    }

    let totals = stats(structure);
    let _ = writeln!(
        output,
        "\n{} client(s), {} project(s), {} branch(es)",
        totals.clients, totals.projects, totals.branches
    );
    output
}
