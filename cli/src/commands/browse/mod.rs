//! # projgit Browse Command (default)
//!
//! File: cli/src/commands/browse/mod.rs
//!
//! ## Overview
//!
//! What `projgit` does when no subcommand is given: browse the project tree
//! and provision branches, driven either by flags or by an interactive menu.
//!
//! ## Flags
//!
//! - `--list`: flat listing of every branch with its path.
//! - `--client C`: tree of one client (message if unknown).
//! - `--client C --project P`: tree of one project (message if unknown).
//! - `--client C --project P --branch B [--repo-type T]`: create or
//!   re-initialize `C/P/repositories/T/B.git` (T defaults to `default`).
//! - `--create`: prompt for client, project, repository type and branch, then
//!   provision.
//! - no flags: interactive menu (see `interactive.rs`).
//!
//! ## Examples
//!
//! ```bash
//! projgit --list
//! projgit --client acme --project site
//! projgit --client acme --project site --branch release --repo-type backend
//! ```
//!
use crate::common::git::StatusInspector;
use crate::common::ui::prompts::Prompter;
use crate::core::config::Config;
use crate::core::error::{ProvisionError, Result};
use crate::core::provisioner::{self, ProjectRequest};
use crate::core::render;
use crate::core::scanner;
use crate::core::structure::Structure;
use anyhow::Context;
use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

mod interactive;

/// Flags of the default (browse) mode.
#[derive(Args, Debug, Default, Clone)]
pub struct BrowseArgs {
    /// Client name.
    #[arg(long)]
    pub client: Option<String>,

    /// Project name (requires --client).
    #[arg(long, requires = "client")]
    pub project: Option<String>,

    /// List the directory structure.
    #[arg(long)]
    pub list: bool,

    /// Create a new project interactively.
    #[arg(long)]
    pub create: bool,

    /// Branch to create or initialize (requires --client and --project).
    #[arg(long, requires = "project")]
    pub branch: Option<String>,

    /// Repository type used with --branch [default: default].
    #[arg(long, requires = "branch")]
    pub repo_type: Option<String>,
}

impl BrowseArgs {
    /// True when any browse flag was given; otherwise the menu runs.
    pub fn any(&self) -> bool {
        self.list || self.create || self.client.is_some()
    }
}

/// One browse invocation: configuration, inspector and terminal.
pub(crate) struct Session<'a, R, W> {
    config: &'a Config,
    inspector: &'a dyn StatusInspector,
    prompter: Prompter<R, W>,
}

/// # Handle Browse (`handle_browse`)
///
/// Entry point when `projgit` runs without a subcommand. Runs the flag-driven
/// action if any flag was given, the interactive menu otherwise.
pub fn handle_browse(
    args: BrowseArgs,
    config: &Config,
    inspector: &dyn StatusInspector,
) -> Result<()> {
    debug!("Browse args: {:?}", args);
    let stdin = std::io::stdin();
    let mut session = Session::new(config, inspector, Prompter::new(stdin.lock(), std::io::stdout()));
    if args.any() {
        session.handle_arguments(&args)
    } else {
        session.run_menu()
    }
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Tests build sessions over in-memory input and output.
    pub(crate) fn new(
        config: &'a Config,
        inspector: &'a dyn StatusInspector,
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            config,
            inspector,
            prompter,
        }
    }

    fn scan(&self) -> Structure {
        scanner::scan(&self.config.base_path(), self.inspector)
    }

    /// Runs the action selected by flags.
    pub(crate) fn handle_arguments(&mut self, args: &BrowseArgs) -> Result<()> {
        if args.list {
            let listing = render::render_listing(&self.scan(), &self.config.base_path());
            self.prompter.say(&listing)?;
            return Ok(());
        }

        if let Some(client) = args.client.as_deref() {
            let mut structure = self.scan();
            let Some(projects) = structure.remove(client) else {
                self.prompter.line(&format!(
                    "The client '{}' does not exist in the structure.",
                    client
                ))?;
                return Ok(());
            };

            let Some(project) = args.project.as_deref() else {
                self.prompter
                    .line(&format!("Showing details of the client '{}':", client))?;
                let view = Structure::from([(client.to_string(), projects)]);
                self.prompter.say(&render::render_tree(&view))?;
                return Ok(());
            };

            let Some(project_record) = projects.get(project).cloned() else {
                self.prompter.line(&format!(
                    "The project '{}' does not exist for the client '{}'.",
                    project, client
                ))?;
                return Ok(());
            };

            match args.branch.as_deref() {
                Some(branch) => {
                    self.prompter.line(&format!(
                        "Creating or initializing the branch '{}' for the project '{}' of client '{}'.",
                        branch, project, client
                    ))?;
                    let request =
                        ProjectRequest::new(client, project, args.repo_type.as_deref(), Some(branch));
                    let path = self
                        .provision(&request)
                        .context("Failed to create or initialize the branch")?;
                    self.prompter
                        .line(&format!("Repository ready at {}", path.display()))?;
                }
                None => {
                    self.prompter.line(&format!(
                        "Showing details of the project '{}' for the client '{}':",
                        project, client
                    ))?;
                    let view = Structure::from([(
                        client.to_string(),
                        [(project.to_string(), project_record)].into(),
                    )]);
                    self.prompter.say(&render::render_tree(&view))?;
                }
            }
            return Ok(());
        }

        if args.create {
            if let Some(path) = self.create_project_interactive()? {
                self.prompter
                    .line(&format!("Project created at {}", path.display()))?;
            }
            return Ok(());
        }

        self.prompter
            .line("No valid arguments provided. Use --help to see available options.")?;
        Ok(())
    }

    fn provision(&self, request: &ProjectRequest) -> std::result::Result<PathBuf, ProvisionError> {
        provisioner::provision(&self.config.base_path(), request)
    }

    /// Prompts for client, project, repository type and branch, then provisions.
    ///
    /// Returns `Ok(None)` when the user backs out or input ends. Provisioning
    /// failures are reported to the user, not propagated.
    pub(crate) fn create_project_interactive(&mut self) -> Result<Option<PathBuf>> {
        let Some(client) = self.prompter.ask_required("Client name: ")? else {
            return Ok(None);
        };
        let Some(project) = self.prompter.ask_required("Project name: ")? else {
            return Ok(None);
        };
        let repo_types = self.config.repo_types.clone();
        let Some(type_index) = self
            .prompter
            .choose("Repository type:", &repo_types)?
        else {
            self.prompter.line("Project creation cancelled.")?;
            return Ok(None);
        };
        let Some(branch) = self
            .prompter
            .ask_with_default("Branch name", provisioner::DEFAULT_BRANCH)?
        else {
            return Ok(None);
        };

        let request = ProjectRequest::new(
            &client,
            &project,
            Some(repo_types[type_index].as_str()),
            Some(branch.as_str()),
        );
        self.provision_and_report(&request)
    }

    fn provision_and_report(&mut self, request: &ProjectRequest) -> Result<Option<PathBuf>> {
        match self.provision(request) {
            Ok(path) => {
                info!("Provisioned repository at {}", path.display());
                Ok(Some(path))
            }
            Err(e) => {
                self.prompter
                    .line(&format!("Failed to create the project: {}", e))?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::git::GitInspector;
    use tempfile::TempDir;

    pub(crate) fn config_for(base: &std::path::Path) -> Config {
        Config {
            base_path: base.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    fn run_args(config: &Config, args: BrowseArgs, input: &str) -> (Result<()>, String) {
        let prompter = Prompter::new(input.as_bytes(), Vec::new());
        let mut session = Session::new(config, &GitInspector, prompter);
        let result = session.handle_arguments(&args);
        let output = String::from_utf8(session.prompter.into_output()).unwrap();
        (result, output)
    }

    fn seeded_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("acme/site/repositories/backend/main.git")).unwrap();
        temp
    }

    #[test]
    fn test_list_flag() {
        let temp = seeded_tree();
        let config = config_for(temp.path());
        let args = BrowseArgs {
            list: true,
            ..Default::default()
        };
        let (result, output) = run_args(&config, args, "");
        result.unwrap();
        assert!(output.contains("backend/main: "));
        assert!(output.contains("Not a git repository"));
    }

    #[test]
    fn test_unknown_client_message() {
        let temp = seeded_tree();
        let config = config_for(temp.path());
        let args = BrowseArgs {
            client: Some("nobody".into()),
            ..Default::default()
        };
        let (result, output) = run_args(&config, args, "");
        result.unwrap();
        assert!(output.contains("The client 'nobody' does not exist in the structure."));
    }

    #[test]
    fn test_client_and_project_trees() {
        let temp = seeded_tree();
        let config = config_for(temp.path());

        let (_, client_view) = run_args(
            &config,
            BrowseArgs {
                client: Some("acme".into()),
                ..Default::default()
            },
            "",
        );
        assert!(client_view.contains("Showing details of the client 'acme':"));
        assert!(client_view.contains("`-- site"));

        let (_, missing) = run_args(
            &config,
            BrowseArgs {
                client: Some("acme".into()),
                project: Some("blog".into()),
                ..Default::default()
            },
            "",
        );
        assert!(missing.contains("The project 'blog' does not exist for the client 'acme'."));
    }

    #[test]
    fn test_branch_flag_provisions_repository() {
        let temp = seeded_tree();
        let config = config_for(temp.path());
        let args = BrowseArgs {
            client: Some("acme".into()),
            project: Some("site".into()),
            branch: Some("release".into()),
            repo_type: Some("backend".into()),
            ..Default::default()
        };
        let (result, output) = run_args(&config, args, "");
        result.unwrap();
        assert!(output.contains("Creating or initializing the branch 'release'"));
        assert!(temp
            .path()
            .join("acme/site/repositories/backend/release.git/HEAD")
            .is_file());
    }

    #[test]
    fn test_create_flag_prompts() {
        let temp = TempDir::new().unwrap();
        let config = config_for(temp.path());
        let args = BrowseArgs {
            create: true,
            ..Default::default()
        };
        // client, project, type #2 (frontend), default branch
        let (result, output) = run_args(&config, args, "globex\nportal\n2\n\n");
        result.unwrap();
        assert!(output.contains("Project created at "));
        assert!(temp
            .path()
            .join("globex/portal/repositories/frontend/main.git")
            .is_dir());
    }

    #[test]
    fn test_create_cancelled_on_eof() {
        let temp = TempDir::new().unwrap();
        let config = config_for(temp.path());
        let args = BrowseArgs {
            create: true,
            ..Default::default()
        };
        let (result, _) = run_args(&config, args, "globex\n");
        result.unwrap();
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }
}
