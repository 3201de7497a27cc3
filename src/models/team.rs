//! Team aggregate model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Project, User};

/// Root aggregate: members, projects and pending invite requests.
///
/// `users` and `invite_requests` never share a user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub invite_link: String,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Arc<Project>>,
    #[serde(default)]
    pub invite_requests: Vec<User>,
    pub author: User,
}

impl Team {
    pub fn project(&self, project_id: &str) -> Option<&Arc<Project>> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.users.iter().any(|user| user.id == user_id)
    }

    pub fn has_pending_request(&self, user_id: &str) -> bool {
        self.invite_requests.iter().any(|user| user.id == user_id)
    }
}

/// Short listing entry for the teams a user belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
}

/// Request body for creating a team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    pub author_id: String,
}

/// Request body for asking to join a team through its invite link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest {
    pub invite_link: String,
    pub user_id: String,
}
