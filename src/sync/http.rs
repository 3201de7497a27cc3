//! HTTP implementation of the remote sync boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{RemoteTeamApi, SyncError};
use crate::api::ApiResponse;
use crate::board::MoveCommand;
use crate::errors::ErrorResponse;
use crate::models::{
    CreateKanbanRequest, CreateProjectRequest, CreateTaskRequest, Kanban, MoveTaskRequest,
    Project, Task, Team,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Talks to the team server's JSON API.
#[derive(Debug, Clone)]
pub struct HttpTeamApi {
    client: Client,
    base_url: Url,
}

impl HttpTeamApi {
    /// Client for a server rooted at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SyncError> {
        self.send(self.client.get(self.endpoint(segments)?)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, SyncError> {
        self.send(self.client.post(self.endpoint(segments)?).json(body))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SyncError> {
        self.send(self.client.delete(self.endpoint(segments)?)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SyncError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_body(status, &body)
    }
}

/// Decode a response body. Anything that is not an envelope is reported by
/// status: a failed status becomes [`SyncError::Remote`], a successful one
/// [`SyncError::Malformed`].
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, SyncError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => unwrap_envelope(value),
        Err(_) if !status.is_success() => Err(SyncError::Remote {
            code: format!("HTTP_{}", status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        }),
        Err(e) => Err(SyncError::Malformed(e.to_string())),
    }
}

/// Pull `data` out of a success envelope, or turn an error envelope into
/// [`SyncError::Remote`].
fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> Result<T, SyncError> {
    if body.get("success").and_then(Value::as_bool) == Some(true) {
        let envelope: ApiResponse<T> =
            serde_json::from_value(body).map_err(|e| SyncError::Malformed(e.to_string()))?;
        return Ok(envelope.data);
    }

    let envelope: ErrorResponse =
        serde_json::from_value(body).map_err(|e| SyncError::Malformed(e.to_string()))?;
    Err(SyncError::Remote {
        code: envelope.error.code,
        message: envelope.error.message,
    })
}

#[async_trait]
impl RemoteTeamApi for HttpTeamApi {
    async fn fetch_team(&self, team_id: &str) -> Result<Team, SyncError> {
        self.get(&["teams", team_id]).await
    }

    async fn move_task(&self, command: &MoveCommand) -> Result<Task, SyncError> {
        let body = MoveTaskRequest {
            project_id: command.project_id.clone(),
            kanban_id_from: command.kanban_id_from.clone(),
            kanban_id_to: command.kanban_id_to.clone(),
        };
        self.post(
            &["teams", &command.team_id, "tasks", &command.task_id, "move"],
            &body,
        )
        .await
    }

    async fn accept_team_request(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<bool, SyncError> {
        self.post(&["teams", team_id, "invites", user_id, "accept"], &Value::Null)
            .await
    }

    async fn reject_team_request(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<bool, SyncError> {
        self.post(&["teams", team_id, "invites", user_id, "reject"], &Value::Null)
            .await
    }

    async fn create_project(
        &self,
        team_id: &str,
        request: &CreateProjectRequest,
    ) -> Result<Project, SyncError> {
        self.post(&["teams", team_id, "projects"], request).await
    }

    async fn delete_project(&self, team_id: &str, project_id: &str) -> Result<(), SyncError> {
        self.delete(&["teams", team_id, "projects", project_id])
            .await
    }

    async fn create_kanban(
        &self,
        team_id: &str,
        project_id: &str,
        request: &CreateKanbanRequest,
    ) -> Result<Kanban, SyncError> {
        self.post(&["teams", team_id, "projects", project_id, "kanbans"], request)
            .await
    }

    async fn create_task(
        &self,
        team_id: &str,
        project_id: &str,
        kanban_id: &str,
        request: &CreateTaskRequest,
    ) -> Result<Task, SyncError> {
        self.post(
            &[
                "teams", team_id, "projects", project_id, "kanbans", kanban_id, "tasks",
            ],
            request,
        )
        .await
    }
}
