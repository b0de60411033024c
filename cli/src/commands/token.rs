//! # projgit Token Command
//!
//! File: cli/src/commands/token.rs
//!
//! Issues bearer tokens for the HTTP API, offline. The identifier must be in
//! the configured allow-list (`auth.valid_identifiers` or
//! `PROJGIT_VALID_IDENTIFIERS`) and the token is signed with `APP_KEY`.
//!
//! ```bash
//! projgit token ci-bot
//! projgit token ci-bot --ttl-hours 12
//! projgit token            # prompts for the identifier
//! ```
//!
use crate::common::ui::prompts::Prompter;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::token;
use anyhow::Context;
use clap::Parser;
use tracing::debug;

/// Arguments of `projgit token`.
#[derive(Parser, Debug, Default)]
pub struct TokenArgs {
    /// Identifier to embed in the token (prompted for if omitted).
    pub identifier: Option<String>,

    /// Token lifetime in hours (overrides `auth.token_ttl_hours`).
    #[arg(long)]
    pub ttl_hours: Option<u64>,
}

/// # Handle Token Command (`handle_token`)
///
/// Prints a signed token for one identifier on stdout. The prompt (when the
/// identifier is omitted) goes to stderr so stdout stays pipeable.
///
/// # Arguments
///
/// * `args` - Parsed `token` arguments.
/// * `config` - Loaded configuration supplying the key, allow-list and default TTL.
///
/// # Errors
///
/// Returns an `Err` if:
/// - No `APP_KEY` is configured.
/// - Input ends before an identifier is entered.
/// - The identifier is not allow-listed, or the TTL is out of range.
pub fn handle_token(args: TokenArgs, config: &Config) -> Result<()> {
    debug!("Token args: {:?}", args);
    // Fail on a missing key before prompting.
    config.require_app_key()?;

    let identifier = match args.identifier {
        Some(identifier) => identifier,
        None => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stderr());
            prompter
                .ask_required("Identifier: ")?
                .context("No identifier provided")?
        }
    };

    let token = token::issue_token(&config.auth, &identifier, args.ttl_hours)?;
    println!("{}", token);
    Ok(())
}
