//! # API Route Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! | Method | Path                              | Success                      |
//! |--------|-----------------------------------|------------------------------|
//! | GET    | `/api/structure`                  | 200, full structure          |
//! | POST   | `/api/project`                    | 201, `{message, path}`       |
//! | GET    | `/api/client/{client}`            | 200, `{client: projects}`    |
//! | GET    | `/api/project/{client}/{project}` | 200, `{project: project}`    |
//! | GET    | `/health`                         | 200, `{"status": "ok"}`      |
//!
//! Every request scans (or provisions) from scratch. The work is blocking
//! filesystem and libgit2 code, so it runs on tokio's blocking pool.
//!
use super::error::ApiError;
use super::AppState;
use crate::core::error::ProjgitError;
use crate::core::provisioner::{self, ProjectRequest};
use crate::core::scanner;
use crate::core::structure::{ClientProjects, Structure};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

/// Runs a full scan of the base path off the async runtime.
async fn scan(state: &AppState) -> Result<Structure, ApiError> {
    let base_path = state.base_path.clone();
    let inspector = state.inspector.clone();
    tokio::task::spawn_blocking(move || scanner::scan(&base_path, inspector.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("Scan task failed: {}", e)))
}

/// Liveness check. Needs no token and never touches the filesystem.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// # Get Structure (`get_structure`)
///
/// Scans the whole base path and returns it as
/// `{client: {project: {"repositories": {type: [branch, ...]}}}}`.
///
/// # Returns
///
/// * `Json<Structure>` - An empty object when the base path is missing or empty.
///
/// # Errors
///
/// * `ApiError::Internal` (500) if the blocking scan task panicked or was cancelled.
pub async fn get_structure(State(state): State<AppState>) -> Result<Json<Structure>, ApiError> {
    Ok(Json(scan(&state).await?))
}

/// # Get Client (`get_client`)
///
/// Scans the tree and returns only `{client: {project: ...}}` for one client.
///
/// # Arguments
///
/// * `client` - Client directory name taken from the URL path.
///
/// # Errors
///
/// * `ApiError::NotFound` (404) when no directory of that name exists under the base path.
/// * `ApiError::Internal` (500) if the scan task failed.
pub async fn get_client(
    State(state): State<AppState>,
    Path(client): Path<String>,
) -> Result<Json<Structure>, ApiError> {
    let mut structure = scan(&state).await?;
    let projects = structure
        .remove(&client)
        .ok_or_else(|| ProjgitError::ClientNotFound {
            client: client.clone(),
        })?;
    Ok(Json(Structure::from([(client, projects)])))
}

/// Returns `{project: {"repositories": ...}}` for one project of one client.
///
/// An unknown client and an unknown project both answer 404 with the
/// project-level message, since the pair is what the caller asked for.
pub async fn get_project(
    State(state): State<AppState>,
    Path((client, project)): Path<(String, String)>,
) -> Result<Json<ClientProjects>, ApiError> {
    let mut structure = scan(&state).await?;
    let record = structure
        .get_mut(&client)
        .and_then(|projects| projects.remove(&project))
        .ok_or_else(|| ProjgitError::ProjectNotFound {
            client: client.clone(),
            project: project.clone(),
        })?;
    Ok(Json(ClientProjects::from([(project, record)])))
}

/// Creates (or re-initializes) a branch slot.
///
/// A body that is not valid JSON for `ProjectRequest` is a 400, like a
/// missing client or project.
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let base_path = state.base_path.clone();

    let path = tokio::task::spawn_blocking(move || provisioner::provision(&base_path, &request))
        .await
        .map_err(|e| ApiError::Internal(format!("Provisioning task failed: {}", e)))??;

    info!("Provisioned {} via API", path.display());
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Project created successfully.",
            "path": path.display().to_string(),
        })),
    ))
}
