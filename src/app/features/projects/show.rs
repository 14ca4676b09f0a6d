use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::app::{db, domain::ProjectRecord, error::AppError, AppState};

/// GET /api/projects/:id — Fetch a stored project.
pub async fn show_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectRecord>, AppError> {
    let project = db::projects::find_by_id(&state.db, &id)
        .await
        .map_err(AppError::database("Internal server error"))?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Project read routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/projects/:id", get(show_project))
}
