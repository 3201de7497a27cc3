//! Kanban (board column) model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Task;

/// A named column holding tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kanban {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Arc<Task>>,
}

impl Kanban {
    /// Whether a task with the given id sits in this kanban.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}

/// Request body for creating a kanban inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKanbanRequest {
    pub name: String,
}
