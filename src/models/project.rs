//! Project model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Kanban;

/// A project groups the kanbans of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Number of tasks ever created in this project.
    #[serde(default)]
    pub tasks_counter: i64,
    #[serde(default)]
    pub kanbans: Vec<Arc<Kanban>>,
}

impl Project {
    pub fn kanban(&self, kanban_id: &str) -> Option<&Arc<Kanban>> {
        self.kanbans.iter().find(|kanban| kanban.id == kanban_id)
    }
}

/// Request body for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
}
