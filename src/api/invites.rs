//! Invite request endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult};
use crate::AppState;

/// POST /api/teams/:team_id/invites/:user_id/accept - Admit a pending user.
pub async fn accept_team_request(
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(String, String)>,
) -> ApiResult<bool> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.accept_invite(&team_id, &user_id).await {
        Ok(accepted) => {
            tracing::info!(%team_id, %user_id, "Invite request accepted");
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(accepted, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/teams/:team_id/invites/:user_id/reject - Drop a pending request.
pub async fn reject_team_request(
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(String, String)>,
) -> ApiResult<bool> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.reject_invite(&team_id, &user_id).await {
        Ok(rejected) => {
            tracing::info!(%team_id, %user_id, "Invite request rejected");
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(rejected, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
