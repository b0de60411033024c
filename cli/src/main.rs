//! # projgit Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! `projgit` browses and provisions a tree of bare git repositories laid out as
//! `<base>/<client>/<project>/repositories/<repo_type>/<branch>.git`.
//!
//! - Without a subcommand it runs the browse mode (flags or interactive menu).
//! - `serve` runs the HTTP API.
//! - `token` issues bearer tokens for the API.
//!
//! ## Examples
//!
//! ```bash
//! projgit                       # interactive menu
//! projgit --list
//! projgit --client acme --project site --branch dev --repo-type backend
//! projgit -v --base-path ~/projects serve --port 8080
//! projgit token ci-bot
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and apply `--base-path`
//! 4. Route to the command handler and report any error
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

#[derive(Parser, Debug)]
#[command(
    name = "projgit",
    about = "Browse and provision client/project git repositories",
    long_about = "Scans <base>/<client>/<project>/repositories/<type>/<branch>.git, reports the\n\
                  status of every bare repository and creates new ones. Runs interactively,\n\
                  from flags, or as an authenticated HTTP API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    browse: commands::browse::BrowseArgs,

    /// Configuration file (default: ./.projgit.toml or the user config).
    #[arg(long, global = true, env = "PROJGIT_CONFIG")]
    config: Option<PathBuf>,

    /// Root of the project tree (overrides configuration).
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API.
    Serve(commands::serve::ServeArgs),
    /// Issue a bearer token for the HTTP API.
    Token(commands::token::TokenArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Browse flags only apply when no subcommand is given.
///
/// Global options (`--config`, `--base-path`, `-v`) may appear on either side
/// of a subcommand, so clap cannot reject browse flags on its own.
fn check_browse_flags(cli: &Cli) -> anyhow::Result<()> {
    if let Some(command) = &cli.command {
        if cli.browse.any() {
            let name = match command {
                Commands::Serve(_) => "serve",
                Commands::Token(_) => "token",
            };
            anyhow::bail!(
                "Browse options (--list, --create, --client, ...) cannot be combined with the '{}' subcommand.",
                name
            );
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    check_browse_flags(&cli)?;
    let mut config = crate::core::config::load_config(cli.config.as_deref())?;
    if let Some(base_path) = cli.base_path.as_deref() {
        config.set_base_path(base_path);
    }

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle_serve(args, &config).await,
        Some(Commands::Token(args)) => commands::token::handle_token(args, &config),
        None => {
            let inspector = common::git::GitInspector;
            tokio::task::block_in_place(|| {
                commands::browse::handle_browse(cli.browse, &config, &inspector)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_browse_flags_parse_without_subcommand() {
        let cli = Cli::try_parse_from([
            "projgit",
            "--client",
            "acme",
            "--project",
            "site",
            "--branch",
            "dev",
            "--repo-type",
            "backend",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.browse.repo_type.as_deref(), Some("backend"));
    }

    #[test]
    fn test_branch_requires_project() {
        assert!(Cli::try_parse_from(["projgit", "--client", "acme", "--branch", "dev"]).is_err());
    }

    #[test]
    fn test_serve_overrides_parse() {
        let cli = Cli::try_parse_from(["projgit", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_before_subcommand() {
        let cli = Cli::try_parse_from([
            "projgit",
            "--config",
            "c.toml",
            "--base-path",
            "/x",
            "-v",
            "serve",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("c.toml")));
        assert_eq!(cli.base_path.as_deref(), Some(std::path::Path::new("/x")));
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Some(Commands::Serve(ref args)) if args.port == Some(8080)));
        check_browse_flags(&cli).unwrap();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["projgit", "token", "ci-bot", "-vv", "--base-path", "/x"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Token(_))));
    }

    #[test]
    fn test_browse_flags_rejected_with_subcommand() {
        let cli = Cli::try_parse_from(["projgit", "--list", "serve"]).unwrap();
        let err = check_browse_flags(&cli).unwrap_err();
        assert!(err.to_string().contains("'serve' subcommand"));
    }
}
