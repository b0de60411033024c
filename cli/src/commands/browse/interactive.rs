//! # projgit Interactive Menu
//!
//! File: cli/src/commands/browse/interactive.rs
//!
//! The numbered main menu shown when `projgit` runs without flags:
//!
//! ```text
//! Main Menu:
//! 1. Show general summary
//! 2. List directory structure
//! 3. Select client
//! 4. Create a new project
//! 5. Exit
//! ```
//!
//! The tree is scanned once on entry and rescanned after anything is
//! provisioned. End of input behaves like "Exit".
//!
use super::Session;
use crate::core::error::Result;
use crate::core::provisioner::{ProjectRequest, DEFAULT_BRANCH};
use crate::core::render;
use crate::core::structure::Structure;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

const MAIN_MENU: &str = "\nMain Menu:\n\
1. Show general summary\n\
2. List directory structure\n\
3. Select client\n\
4. Create a new project\n\
5. Exit\n";

impl<R: BufRead, W: Write> Session<'_, R, W> {
    /// Runs the main menu until the user exits or input ends.
    pub(crate) fn run_menu(&mut self) -> Result<()> {
        let mut structure = self.scan();
        loop {
            self.prompter.say(MAIN_MENU)?;
            let Some(option) = self.prompter.ask("Choose an option (enter the number): ")? else {
                break;
            };
            match option.as_str() {
                "1" => {
                    self.prompter.say(&render::render_summary(&structure))?;
                    self.prompter.pause()?;
                }
                "2" => {
                    let listing = render::render_listing(&structure, &self.config.base_path());
                    self.prompter.say(&listing)?;
                    self.prompter.pause()?;
                }
                "3" => {
                    if self.select_client(&structure)? {
                        structure = self.scan();
                    }
                }
                "4" => {
                    if let Some(path) = self.create_project_interactive()? {
                        self.prompter
                            .line(&format!("Project created at {}", path.display()))?;
                        structure = self.scan();
                    }
                    self.prompter.pause()?;
                }
                "5" => {
                    self.prompter.line("Exiting.")?;
                    return Ok(());
                }
                _ => self
                    .prompter
                    .line("Invalid option. Please enter a number from the menu.")?,
            }
        }
        Ok(())
    }

    /// Client -> optional project -> optional branch creation.
    ///
    /// Returns `true` when something was provisioned.
    fn select_client(&mut self, structure: &Structure) -> Result<bool> {
        let clients: Vec<String> = structure.keys().cloned().collect();
        if clients.is_empty() {
            self.prompter.line("No clients found.")?;
            return Ok(false);
        }
        let Some(ci) = self.prompter.choose("Clients:", &clients)? else {
            return Ok(false);
        };
        let client = &clients[ci];
        let projects = &structure[client];

        let client_view = Structure::from([(client.clone(), projects.clone())]);
        self.prompter.say(&render::render_tree(&client_view))?;

        let project_names: Vec<String> = projects.keys().cloned().collect();
        if project_names.is_empty() || !self.prompter.confirm("Select a project?")? {
            return Ok(false);
        }
        let Some(pi) = self.prompter.choose("Projects:", &project_names)? else {
            return Ok(false);
        };
        let project_name = &project_names[pi];
        let project = &projects[project_name];

        let project_view = Structure::from([(
            client.clone(),
            [(project_name.clone(), project.clone())].into(),
        )]);
        self.prompter.say(&render::render_tree(&project_view))?;

        if !self.prompter.confirm("Create or initialize a branch?")? {
            return Ok(false);
        }

        // Configured types first, then any extra types already on disk.
        let mut repo_types = self.config.repo_types.clone();
        let configured: BTreeSet<&String> = self.config.repo_types.iter().collect();
        repo_types.extend(
            project
                .repositories
                .keys()
                .filter(|t| !configured.contains(t))
                .cloned(),
        );
        let Some(ti) = self.prompter.choose("Repository type:", &repo_types)? else {
            return Ok(false);
        };
        let Some(branch) = self.prompter.ask_with_default("Branch name", DEFAULT_BRANCH)? else {
            return Ok(false);
        };

        let request = ProjectRequest::new(
            client,
            project_name,
            Some(repo_types[ti].as_str()),
            Some(branch.as_str()),
        );
        match self.provision_and_report(&request)? {
            Some(path) => {
                self.prompter
                    .line(&format!("Repository ready at {}", path.display()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
