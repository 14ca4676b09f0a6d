use axum::{extract::State, Json, Router};
use serde::Deserialize;
use validator::Validate;

use super::{
    helpers::{post_endpoint, SuccessResponse},
    reconcile::{reconcile, ProjectUpdate, Reconciled},
};
use crate::app::{db, error::AppError, media, AppState};

const UPDATE_FAILED: &str = "Update failed";

/// Request body for updating a project: the target id plus the flattened mutations.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub project_id: String,
    #[serde(flatten)]
    pub changes: ProjectUpdate,
}

/// POST /updateProject — Reconcile the stored project with the request, release dropped media, persist.
pub async fn update_project(
    State(state): State<AppState>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Invalid input".to_string()))?;

    let project = db::projects::find_by_id(&state.db, &request.project_id)
        .await
        .map_err(AppError::database(UPDATE_FAILED))?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let Reconciled { record, to_release } = reconcile(project, request.changes);

    let report = media::release_all(state.media.as_ref(), &to_release).await;
    if !report.is_clean() {
        tracing::warn!(
            project_id = %record.id,
            failed = report.failures().count(),
            "project updated with orphaned media"
        );
    }

    let updated = db::projects::update(&state.db, &record)
        .await
        .map_err(AppError::database(UPDATE_FAILED))?;
    if !updated {
        // Deleted by a concurrent request after the read.
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = %record.id, released = report.released_count(), "project updated");

    Ok(SuccessResponse::ok())
}

/// Project update routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/updateProject", post_endpoint(update_project))
        .route("/api/updateProject", post_endpoint(update_project))
}
