//! Task and comment models.

use serde::{Deserialize, Serialize};

use super::User;

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: User,
    pub text: String,
}

/// A card on a kanban. Lives in exactly one kanban at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: User,
    pub tag: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Request body for creating a task inside a kanban.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    pub author_id: String,
}

/// Request body for moving a task between two kanbans of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    pub project_id: String,
    pub kanban_id_from: String,
    pub kanban_id_to: String,
}

/// Request body for commenting on a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author_id: String,
    pub text: String,
}
