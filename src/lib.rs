//! Team Kanban
//!
//! Teams, projects, kanbans and tasks with invite workflows: a REST backend
//! with SQLite persistence, plus the client core (team store, board gesture
//! state machine and remote sync) that a UI drives.

pub mod api;
pub mod board;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod sync;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/schema", get(api::get_schema))
        // Users
        .route("/users", post(api::upsert_user))
        .route("/users/{id}", get(api::get_user))
        .route("/users/{id}/teams", get(api::list_user_teams))
        // Teams
        .route("/teams", post(api::create_team))
        .route("/teams/join", post(api::join_team))
        .route("/teams/{team_id}", get(api::get_team))
        // Invite requests
        .route(
            "/teams/{team_id}/invites/{user_id}/accept",
            post(api::accept_team_request),
        )
        .route(
            "/teams/{team_id}/invites/{user_id}/reject",
            post(api::reject_team_request),
        )
        // Projects and kanbans
        .route("/teams/{team_id}/projects", post(api::create_project))
        .route(
            "/teams/{team_id}/projects/{project_id}",
            delete(api::delete_project),
        )
        .route(
            "/teams/{team_id}/projects/{project_id}/kanbans",
            post(api::create_kanban),
        )
        // Tasks
        .route(
            "/teams/{team_id}/projects/{project_id}/kanbans/{kanban_id}/tasks",
            post(api::create_task),
        )
        .route("/teams/{team_id}/tasks/{task_id}/move", post(api::move_task))
        .route(
            "/teams/{team_id}/tasks/{task_id}/comments",
            post(api::add_comment),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
