use axum::{extract::State, Json, Router};
use serde::Deserialize;
use validator::Validate;

use super::helpers::{post_endpoint, SuccessResponse};
use crate::app::{db, error::AppError, media, AppState};

const DELETE_FAILED: &str = "Delete failed";

/// Request body for deleting a project.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub project_id: String,
}

/// POST /deleteProject — Release every media asset of a project, then delete the document.
pub async fn delete_project(
    State(state): State<AppState>,
    Json(request): Json<DeleteProjectRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Invalid input".to_string()))?;

    let project = db::projects::find_by_id(&state.db, &request.project_id)
        .await
        .map_err(AppError::database(DELETE_FAILED))?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    // Media cleanup is best-effort; the document is deleted whatever the outcome.
    let report = media::release_all(state.media.as_ref(), &project.media()).await;
    if !report.is_clean() {
        tracing::warn!(
            project_id = %project.id,
            failed = report.failures().count(),
            "project deleted with orphaned media"
        );
    }

    db::projects::delete(&state.db, &project.id)
        .await
        .map_err(AppError::database(DELETE_FAILED))?;

    tracing::info!(project_id = %project.id, "project deleted");

    Ok(SuccessResponse::ok())
}

/// Project deletion routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/deleteProject", post_endpoint(delete_project))
        .route("/api/deleteProject", post_endpoint(delete_project))
}
