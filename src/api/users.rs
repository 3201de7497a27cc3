//! User API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_name, success, ApiResult};
use crate::errors::AppError;
use crate::models::{TeamSummary, UpsertUserRequest, User};
use crate::AppState;

/// POST /api/users - Register or refresh a user from the identity provider.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(request): Json<UpsertUserRequest>,
) -> ApiResult<User> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.nickname, "Nickname") {
        return error(e, revision_id);
    }
    if !request.email.contains('@') {
        return error(
            AppError::Validation("A valid email is required".to_string()),
            revision_id,
        );
    }

    match state.repo.upsert_user(&request).await {
        Ok(user) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(user, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_user(&id).await {
        Ok(Some(user)) => success(user, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("User {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/users/:id/teams - Teams the user belongs to.
pub async fn list_user_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<TeamSummary>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_teams_for_user(&id).await {
        Ok(teams) => success(teams, revision_id),
        Err(e) => error(e, revision_id),
    }
}
