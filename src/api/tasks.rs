//! Task endpoints, including the move-task operation.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_name, success, ApiResult};
use crate::models::{Comment, CreateCommentRequest, CreateTaskRequest, MoveTaskRequest, Task};
use crate::AppState;

/// POST /api/teams/:team_id/projects/:project_id/kanbans/:kanban_id/tasks - Append a task.
pub async fn create_task(
    State(state): State<AppState>,
    Path((team_id, project_id, kanban_id)): Path<(String, String, String)>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Task> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.name, "Task name") {
        return error(e, revision_id);
    }

    match state
        .repo
        .create_task(&team_id, &project_id, &kanban_id, &request)
        .await
    {
        Ok(task) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(task, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/teams/:team_id/tasks/:task_id/move - Move a task to another kanban.
///
/// Answers with the canonical task record, comments included.
pub async fn move_task(
    State(state): State<AppState>,
    Path((team_id, task_id)): Path<(String, String)>,
    Json(request): Json<MoveTaskRequest>,
) -> ApiResult<Task> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.move_task(&team_id, &task_id, &request).await {
        Ok(task) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(task, new_revision)
        }
        Err(e) => {
            tracing::warn!(%task_id, "Move rejected: {}", e);
            error(e, revision_id)
        }
    }
}

/// POST /api/teams/:team_id/tasks/:task_id/comments - Comment on a task.
pub async fn add_comment(
    State(state): State<AppState>,
    Path((team_id, task_id)): Path<(String, String)>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<Comment> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.text, "Comment text") {
        return error(e, revision_id);
    }

    match state.repo.add_comment(&team_id, &task_id, &request).await {
        Ok(comment) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(comment, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
