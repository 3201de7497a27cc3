//! Team API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_name, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateTeamRequest, JoinTeamRequest, Team, TeamSummary};
use crate::AppState;

/// POST /api/teams - Create a team owned by its author.
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<Team> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_name(&request.name, "Team name") {
        return error(e, revision_id);
    }

    match state.repo.create_team(&request).await {
        Ok(team) => {
            tracing::info!(team_id = %team.id, "Team created");
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(team, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/teams/:team_id - Load the full team aggregate.
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> ApiResult<Team> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_team(&team_id).await {
        Ok(Some(team)) => success(team, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Team {} not found", team_id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/teams/join - Ask to join a team through its invite link.
pub async fn join_team(
    State(state): State<AppState>,
    Json(request): Json<JoinTeamRequest>,
) -> ApiResult<TeamSummary> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.join_team(&request).await {
        Ok(team) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(team, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
