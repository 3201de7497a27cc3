//! Client-side team store.
//!
//! Holds at most one [`Team`]. All changes go through [`TeamAction`] and the
//! pure [`reduce`] function, which rebuilds only the path from the root to the
//! touched node and shares every other `Arc` with the previous snapshot.
//! Subscribers observe changes through a `watch` channel carrying a version
//! counter that only moves when the team actually changes.

mod reducer;

pub use reducer::*;

#[cfg(test)]
pub(crate) use reducer::fixtures;

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{Kanban, Project, Task, Team, User};

/// One published state of the store.
#[derive(Debug, Clone, Default)]
pub struct TeamSnapshot {
    /// Bumped on every effective change, never on a no-op.
    pub version: u64,
    pub team: Option<Arc<Team>>,
}

/// Owner of the resident team.
#[derive(Debug)]
pub struct TeamStore {
    tx: watch::Sender<TeamSnapshot>,
}

impl Default for TeamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(TeamSnapshot::default());
        Self { tx }
    }

    /// Apply an action. Returns whether the resident team changed.
    pub fn dispatch(&self, action: TeamAction) -> bool {
        let name = action.name();
        let changed = self.tx.send_if_modified(|snapshot| {
            match reduce(snapshot.team.as_ref(), action) {
                Reduction::Unchanged => false,
                Reduction::Changed(team) => {
                    snapshot.team = team;
                    snapshot.version += 1;
                    true
                }
            }
        });

        tracing::debug!(action = name, changed, version = self.version(), "Store dispatch");
        changed
    }

    pub fn snapshot(&self) -> TeamSnapshot {
        self.tx.borrow().clone()
    }

    pub fn team(&self) -> Option<Arc<Team>> {
        self.tx.borrow().team.clone()
    }

    pub fn version(&self) -> u64 {
        self.tx.borrow().version
    }

    /// Receiver that wakes on every effective change.
    pub fn subscribe(&self) -> watch::Receiver<TeamSnapshot> {
        self.tx.subscribe()
    }

    pub fn set_team(&self, team: Team) -> bool {
        self.dispatch(TeamAction::SetTeam(team))
    }

    pub fn clear_team(&self) -> bool {
        self.dispatch(TeamAction::ClearTeam)
    }

    pub fn add_invite_request(&self, user: User) -> bool {
        self.dispatch(TeamAction::AddInviteRequest(user))
    }

    pub fn remove_invite_request(&self, user_id: &str) -> bool {
        self.dispatch(TeamAction::RemoveInviteRequest {
            user_id: user_id.to_string(),
        })
    }

    pub fn accept_invite(&self, user_id: &str) -> bool {
        self.dispatch(TeamAction::AcceptInvite {
            user_id: user_id.to_string(),
        })
    }

    pub fn add_project(&self, project: Project) -> bool {
        self.dispatch(TeamAction::AddProject(project))
    }

    pub fn remove_project(&self, project_id: &str) -> bool {
        self.dispatch(TeamAction::RemoveProject {
            project_id: project_id.to_string(),
        })
    }

    pub fn add_kanban(&self, project_id: &str, kanban: Kanban) -> bool {
        self.dispatch(TeamAction::AddKanban {
            project_id: project_id.to_string(),
            kanban,
        })
    }

    pub fn add_task(&self, project_id: &str, kanban_id: &str, task: Task) -> bool {
        self.dispatch(TeamAction::AddTask {
            project_id: project_id.to_string(),
            kanban_id: kanban_id.to_string(),
            task,
        })
    }
}
