//! # projgit HTTP API Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `projgit serve` exposes the project tree over a small JSON API. All
//! `/api/*` routes require an `Authorization: Bearer <token>` header holding a
//! token issued by `projgit token`; `/health` is open.
//!
//! ## Architecture
//!
//! - `server_logic.rs`: router assembly, middleware, binding and graceful shutdown
//! - `handlers.rs`: one async handler per route
//! - `auth.rs`: bearer token middleware
//! - `error.rs`: `ApiError` and its status code mapping
//!
//! ## Examples
//!
//! ```bash
//! # Listen on the configured address (127.0.0.1:5000 by default)
//! APP_KEY=secret projgit serve
//!
//! # Override the bind address
//! projgit serve --host 0.0.0.0 --port 8080
//!
//! curl -H "Authorization: Bearer $(projgit token ci-bot)" http://127.0.0.1:5000/api/structure
//! ```
//!
use crate::common::git::{GitInspector, StatusInspector};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server_logic;

/// Arguments of `projgit serve`.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides `api.host`).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides `api.port`).
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// State shared by every request. Nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub base_path: Arc<PathBuf>,
    pub app_key: Arc<str>,
    pub inspector: Arc<dyn StatusInspector>,
}

impl AppState {
    /// Builds the request state from loaded configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Source of the (already absolute) base path.
    /// * `app_key` - HS256 secret used by the bearer middleware to validate tokens.
    /// * `inspector` - Status inspector shared by every scan; tests pass a stub.
    pub fn new(config: &Config, app_key: &str, inspector: Arc<dyn StatusInspector>) -> Self {
        Self {
            base_path: Arc::new(config.base_path()),
            app_key: Arc::from(app_key),
            inspector,
        }
    }
}

/// # Handle Serve Command (`handle_serve`)
///
/// Resolves the bind address (flags over configuration), checks that a signing
/// key is configured and runs the server until Ctrl+C or SIGTERM.
pub async fn handle_serve(args: ServeArgs, config: &Config) -> Result<()> {
    let app_key = config.require_app_key()?;
    let host = args.host.unwrap_or(config.api.host);
    let port = args.port.unwrap_or(config.api.port);
    if port == 0 {
        anyhow::bail!("Port 0 is not a valid listening port.");
    }
    let addr = SocketAddr::new(host, port);

    info!(
        "Serving {} on {}",
        config.base_path().display(),
        addr
    );
    let state = AppState::new(config, app_key, Arc::new(GitInspector));
    server_logic::run_server(addr, state, config.api.enable_cors).await
}
