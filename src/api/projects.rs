//! Project and kanban endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_name, success, ApiResult};
use crate::models::{CreateKanbanRequest, CreateProjectRequest, Kanban, Project};
use crate::AppState;

/// POST /api/teams/:team_id/projects - Append a project.
pub async fn create_project(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<Project> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.name, "Project name") {
        return error(e, revision_id);
    }

    match state.repo.create_project(&team_id, &request).await {
        Ok(project) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(project, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/teams/:team_id/projects/:project_id - Delete a project.
pub async fn delete_project(
    State(state): State<AppState>,
    Path((team_id, project_id)): Path<(String, String)>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_project(&team_id, &project_id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/teams/:team_id/projects/:project_id/kanbans - Append a kanban.
pub async fn create_kanban(
    State(state): State<AppState>,
    Path((team_id, project_id)): Path<(String, String)>,
    Json(request): Json<CreateKanbanRequest>,
) -> ApiResult<Kanban> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.name, "Kanban name") {
        return error(e, revision_id);
    }

    match state
        .repo
        .create_kanban(&team_id, &project_id, &request)
        .await
    {
        Ok(kanban) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(kanban, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
