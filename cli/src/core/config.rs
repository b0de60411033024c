//! # projgit Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the `Config` used by every command: the base path of the project
//! tree, the repository types offered by the interactive menu, the API bind
//! address, and the token signing settings.
//!
//! ## Architecture
//!
//! Configuration sources, highest precedence first:
//! 1. Command-line flags (applied by the command handlers, e.g. `--base-path`)
//! 2. Environment variables: `PROJGIT_BASE_PATH`, `APP_KEY`,
//!    `PROJGIT_VALID_IDENTIFIERS`, `PROJGIT_TOKEN_TTL_HOURS`
//! 3. A single TOML file: the one passed with `--config` (or `PROJGIT_CONFIG`);
//!    otherwise `.projgit.toml` in the current directory or an ancestor;
//!    otherwise the user file `<config dir>/projgit/config.toml`
//! 4. Defaults defined in this module
//!
//! The identifier allow-list is data, never code: the environment form is a
//! comma-separated list (optionally wrapped in `[...]` with quoted items), the
//! file form a TOML array.
//!
//! ## Examples
//!
//! ```toml
//! base_path = "~/projects"
//! repo_types = ["backend", "frontend", "docs", "config"]
//!
//! [api]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [auth]
//! app_key = "change-me"
//! valid_identifiers = ["ci-bot", "dashboard"]
//! token_ttl_hours = 24
//! ```
//!
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{ProjgitError, Result};
use crate::core::token::MAX_TTL_HOURS;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".projgit.toml";

pub const ENV_BASE_PATH: &str = "PROJGIT_BASE_PATH";
pub const ENV_APP_KEY: &str = "APP_KEY";
pub const ENV_VALID_IDENTIFIERS: &str = "PROJGIT_VALID_IDENTIFIERS";
pub const ENV_TOKEN_TTL_HOURS: &str = "PROJGIT_TOKEN_TTL_HOURS";

/// Main configuration structure, loaded from a TOML file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Root of the client/project tree (can use ~).
    pub base_path: String,
    /// Repository types offered when creating a project interactively.
    pub repo_types: Vec<String>,
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

/// Settings for `projgit serve`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Send permissive CORS headers.
    pub enable_cors: bool,
}

/// Token signing and issuance settings.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub app_key: String,
    /// Identifiers allowed to receive a token.
    pub valid_identifiers: Vec<String>,
    /// Lifetime of issued tokens. `None` issues tokens without `exp`.
    pub token_ttl_hours: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: "/opt/hexome-systems/projects".to_string(),
            repo_types: ["backend", "frontend", "docs", "config"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            enable_cors: false,
        }
    }
}

impl Config {
    /// The base path as a `PathBuf`. Absolute once loaded through `load_config`.
    pub fn base_path(&self) -> PathBuf {
        PathBuf::from(&self.base_path)
    }

    /// Overrides the base path (from `--base-path`).
    ///
    /// `~` is expanded and a relative path is resolved against the current
    /// directory, so listings always show absolute paths.
    pub fn set_base_path(&mut self, path: &Path) {
        self.base_path = absolute_base_path(&path.to_string_lossy());
    }

    /// Fails unless a signing key is configured. Needed by `serve` and `token`.
    pub fn require_app_key(&self) -> Result<&str> {
        if self.auth.app_key.trim().is_empty() {
            return Err(anyhow!(ProjgitError::Config(format!(
                "No signing key configured. Set {} or auth.app_key.",
                ENV_APP_KEY
            ))));
        }
        Ok(&self.auth.app_key)
    }
}

/// # Load Configuration (`load_config`)
///
/// Loads configuration from file and environment.
///
/// # Arguments
///
/// * `explicit` - The `--config` path. When given, the file must exist and no
///   other location is searched.
///
/// # Returns
///
/// * `Result<Config>` - Defaults, overlaid by the first file found
///   (`--config`, `.projgit.toml` in the cwd or an ancestor, the user config),
///   then by environment variables.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The selected file cannot be read or is not valid TOML.
/// - An environment override is malformed (e.g. a non-numeric TTL).
/// - The merged configuration fails validation.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    // 1. Pick the file layer, if any.
    let file_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => match find_project_config_path()? {
            Some(path) => {
                info!("Loading project configuration from: {}", path.display());
                Some(load_config_from_path(&path)?)
            }
            None => load_user_config()?,
        },
    };

    // 2. Environment wins over the file, then paths are normalized and checked.
    let mut config = file_config.unwrap_or_default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: base_path={}", config.base_path);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "projgit", "projgit") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!("User configuration file not found at {}", config_path.display());
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(current_dir
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILENAME))
        .find(|candidate| candidate.is_file()))
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Applies environment overrides. `lookup` abstracts `std::env::var` for tests.
fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base) = lookup(ENV_BASE_PATH).filter(|v| !v.trim().is_empty()) {
        debug!("{} overrides base path", ENV_BASE_PATH);
        config.base_path = base;
    }
    if let Some(key) = lookup(ENV_APP_KEY).filter(|v| !v.is_empty()) {
        config.auth.app_key = key;
    }
    if let Some(list) = lookup(ENV_VALID_IDENTIFIERS) {
        config.auth.valid_identifiers = parse_identifier_list(&list);
    }
    if let Some(ttl) = lookup(ENV_TOKEN_TTL_HOURS).filter(|v| !v.trim().is_empty()) {
        let hours = ttl.trim().parse::<u64>().map_err(|e| {
            anyhow!(ProjgitError::Config(format!(
                "{} must be a whole number of hours, got '{}': {}",
                ENV_TOKEN_TTL_HOURS, ttl, e
            )))
        })?;
        if hours > MAX_TTL_HOURS {
            return Err(anyhow!(ProjgitError::Config(format!(
                "{} must be at most {} hours, got {}.",
                ENV_TOKEN_TTL_HOURS, MAX_TTL_HOURS, hours
            ))));
        }
        config.auth.token_ttl_hours = Some(hours);
    }
    Ok(())
}

/// Parses `a, b` or `["a", 'b']` into a list of identifiers.
pub fn parse_identifier_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn expand_config_paths(config: &mut Config) {
    config.base_path = absolute_base_path(&config.base_path);
    debug!("Expanded base path: {}", config.base_path);
}

/// Expands `~` and anchors a relative path at the current directory.
///
/// The path does not have to exist. If the current directory cannot be
/// determined the expanded path is kept as is.
fn absolute_base_path(raw: &str) -> String {
    let expanded = shellexpand::tilde(raw).into_owned();
    if expanded.trim().is_empty() {
        return expanded;
    }
    match std::path::absolute(&expanded) {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("Could not make base path '{}' absolute: {}", expanded, e);
            expanded
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.base_path.trim().is_empty() {
        return Err(anyhow!(ProjgitError::Config(
            "base_path cannot be empty.".to_string()
        )));
    }
    if config.api.port == 0 {
        return Err(anyhow!(ProjgitError::Config(
            "api.port must be between 1 and 65535.".to_string()
        )));
    }
    if let Some(hours) = config.auth.token_ttl_hours.filter(|h| *h > MAX_TTL_HOURS) {
        return Err(anyhow!(ProjgitError::Config(format!(
            "auth.token_ttl_hours must be at most {} hours, got {}.",
            MAX_TTL_HOURS, hours
        ))));
    }
    if let Some(bad) = config
        .repo_types
        .iter()
        .find(|t| t.trim().is_empty() || t.contains(['/', '\\']))
    {
        return Err(anyhow!(ProjgitError::Config(format!(
            "Invalid repository type '{}' in repo_types.",
            bad
        ))));
    }
    let base = Path::new(&config.base_path);
    if !base.exists() {
        warn!("Configured base path '{}' does not exist.", base.display());
    } else if !base.is_dir() {
        return Err(anyhow!(ProjgitError::Config(format!(
            "Configured base path '{}' exists but is not a directory.",
            base.display()
        ))));
    }
    Ok(())
}
