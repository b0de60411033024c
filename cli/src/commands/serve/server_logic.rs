//! # projgit HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! Builds the Axum router for the API and runs it:
//! - `/health` unauthenticated, everything else nested under `/api` behind
//!   the bearer token middleware
//! - request/response tracing through `tower_http::trace::TraceLayer`
//! - optional permissive CORS (`api.enable_cors`)
//! - graceful shutdown on Ctrl+C or SIGTERM
//!
use super::{auth, handlers, AppState};
use crate::core::error::Result;
use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

/// # Run HTTP Server (`run_server`)
///
/// Binds `addr` and serves the API until a shutdown signal arrives.
///
/// ## Errors
///
/// Fails if the listener cannot be bound (address in use, permissions) or the
/// server stops with an error.
pub async fn run_server(addr: SocketAddr, state: AppState, enable_cors: bool) -> Result<()> {
    let app = create_app(state, enable_cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    println!("projgit API listening on http://{}", addr);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, shutting down...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Create Axum Application (`create_app`)
///
/// Route table plus middleware. The auth guard is a `route_layer` on the
/// `/api` router, so unknown paths still answer 404 without a token.
pub fn create_app(state: AppState, enable_cors: bool) -> Router {
    let api = Router::new()
        .route("/structure", get(handlers::get_structure))
        .route("/project", post(handlers::create_project))
        .route("/client/{client}", get(handlers::get_client))
        .route("/project/{client}/{project}", get(handlers::get_project))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default())
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(trace_layer))
        .with_state(state);

    if enable_cors {
        info!("CORS middleware enabled (permissive).");
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
