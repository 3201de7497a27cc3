//! Remote sync boundary between the client store and the server.
//!
//! [`RemoteTeamApi`] is what the client needs from the server; [`HttpTeamApi`]
//! implements it over the JSON API. [`TeamSync`] issues the calls and folds
//! confirmed results into the [`TeamStore`]. Failures never touch the store;
//! they surface as a [`Notification`] instead.

mod http;

pub use http::*;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::board::{MoveCommand, PendingMove};
use crate::models::{
    CreateKanbanRequest, CreateProjectRequest, CreateTaskRequest, Kanban, Project, Task, Team,
};
use crate::store::{TeamAction, TeamStore};

/// Capacity of the notification channel; slow listeners lose the oldest.
const NOTIFICATION_CAPACITY: usize = 32;

/// Errors from a remote call.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{code}: {message}")]
    Remote { code: String, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(String),
}

/// Operations the client core consumes from the server.
#[async_trait]
pub trait RemoteTeamApi: Send + Sync {
    async fn fetch_team(&self, team_id: &str) -> Result<Team, SyncError>;

    /// Returns the canonical record of the moved task.
    async fn move_task(&self, command: &MoveCommand) -> Result<Task, SyncError>;

    async fn accept_team_request(&self, user_id: &str, team_id: &str)
        -> Result<bool, SyncError>;

    async fn reject_team_request(&self, user_id: &str, team_id: &str)
        -> Result<bool, SyncError>;

    async fn create_project(
        &self,
        team_id: &str,
        request: &CreateProjectRequest,
    ) -> Result<Project, SyncError>;

    async fn delete_project(&self, team_id: &str, project_id: &str) -> Result<(), SyncError>;

    async fn create_kanban(
        &self,
        team_id: &str,
        project_id: &str,
        request: &CreateKanbanRequest,
    ) -> Result<Kanban, SyncError>;

    async fn create_task(
        &self,
        team_id: &str,
        project_id: &str,
        kanban_id: &str,
        request: &CreateTaskRequest,
    ) -> Result<Task, SyncError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    LoadFailed,
    MoveFailed,
    AcceptFailed,
    RejectFailed,
    CreateFailed,
    DeleteFailed,
}

/// Transient message for the user about a failed remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Drives remote calls and reconciles the store with their results.
pub struct TeamSync {
    api: Arc<dyn RemoteTeamApi>,
    store: Arc<TeamStore>,
    notifications: broadcast::Sender<Notification>,
}

impl TeamSync {
    pub fn new(api: Arc<dyn RemoteTeamApi>, store: Arc<TeamStore>) -> Self {
        let (notifications, _rx) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            api,
            store,
            notifications,
        }
    }

    pub fn store(&self) -> &Arc<TeamStore> {
        &self.store
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Fetch a team and make it the resident one.
    pub async fn load_team(&self, team_id: &str) -> Result<(), SyncError> {
        match self.api.fetch_team(team_id).await {
            Ok(team) => {
                self.store.set_team(team);
                Ok(())
            }
            Err(e) => {
                self.notify(NotificationKind::LoadFailed, format!("Could not load team: {e}"));
                Err(e)
            }
        }
    }

    /// Send a move produced by a board drop and apply the confirmed result.
    ///
    /// The board stays busy until this returns. On failure the task stays
    /// where the store already has it.
    pub async fn commit_move(&self, pending: PendingMove) -> Result<Task, SyncError> {
        let command = pending.command().clone();

        let task = match self.api.move_task(&command).await {
            Ok(task) => task,
            Err(e) => {
                warn!(task_id = %command.task_id, "Move failed: {}", e);
                self.notify(NotificationKind::MoveFailed, format!("Could not move task: {e}"));
                return Err(e);
            }
        };

        if self.resident_team_is(&command.team_id) {
            self.store.dispatch(TeamAction::MoveTask {
                project_id: command.project_id.clone(),
                kanban_id_from: command.kanban_id_from.clone(),
                kanban_id_to: command.kanban_id_to.clone(),
                task: task.clone(),
            });
        } else {
            debug!(team_id = %command.team_id, "Resident team changed, skipping move reconcile");
        }

        drop(pending);
        Ok(task)
    }

    /// Accept a pending invite and move the user into the team locally.
    pub async fn accept_invite(&self, team_id: &str, user_id: &str) -> Result<bool, SyncError> {
        match self.api.accept_team_request(user_id, team_id).await {
            Ok(true) => {
                if self.resident_team_is(team_id) {
                    self.store.accept_invite(user_id);
                }
                Ok(true)
            }
            Ok(false) => {
                self.notify(
                    NotificationKind::AcceptFailed,
                    format!("Invite from {user_id} was not accepted"),
                );
                Ok(false)
            }
            Err(e) => {
                warn!(%user_id, %team_id, "Accept failed: {}", e);
                self.notify(
                    NotificationKind::AcceptFailed,
                    format!("Could not accept invite: {e}"),
                );
                Err(e)
            }
        }
    }

    /// Reject a pending invite and drop it from the local list.
    pub async fn reject_invite(&self, team_id: &str, user_id: &str) -> Result<bool, SyncError> {
        match self.api.reject_team_request(user_id, team_id).await {
            Ok(true) => {
                if self.resident_team_is(team_id) {
                    self.store.remove_invite_request(user_id);
                }
                Ok(true)
            }
            Ok(false) => {
                self.notify(
                    NotificationKind::RejectFailed,
                    format!("Invite from {user_id} was not rejected"),
                );
                Ok(false)
            }
            Err(e) => {
                warn!(%user_id, %team_id, "Reject failed: {}", e);
                self.notify(
                    NotificationKind::RejectFailed,
                    format!("Could not reject invite: {e}"),
                );
                Err(e)
            }
        }
    }

    /// Create a project and append the confirmed record.
    pub async fn create_project(
        &self,
        team_id: &str,
        request: &CreateProjectRequest,
    ) -> Result<Project, SyncError> {
        let result = self.api.create_project(team_id, request).await;
        let project = self.confirm(NotificationKind::CreateFailed, "create project", result)?;
        if self.resident_team_is(team_id) {
            self.store.add_project(project.clone());
        }
        Ok(project)
    }

    /// Delete a project and drop it from the resident team.
    pub async fn delete_project(&self, team_id: &str, project_id: &str) -> Result<(), SyncError> {
        let result = self.api.delete_project(team_id, project_id).await;
        self.confirm(NotificationKind::DeleteFailed, "delete project", result)?;
        if self.resident_team_is(team_id) {
            self.store.remove_project(project_id);
        }
        Ok(())
    }

    pub async fn create_kanban(
        &self,
        team_id: &str,
        project_id: &str,
        request: &CreateKanbanRequest,
    ) -> Result<Kanban, SyncError> {
        let result = self.api.create_kanban(team_id, project_id, request).await;
        let kanban = self.confirm(NotificationKind::CreateFailed, "create kanban", result)?;
        if self.resident_team_is(team_id) {
            self.store.add_kanban(project_id, kanban.clone());
        }
        Ok(kanban)
    }

    /// Create a task at the end of a kanban. The local task counter follows.
    pub async fn create_task(
        &self,
        team_id: &str,
        project_id: &str,
        kanban_id: &str,
        request: &CreateTaskRequest,
    ) -> Result<Task, SyncError> {
        let result = self
            .api
            .create_task(team_id, project_id, kanban_id, request)
            .await;
        let task = self.confirm(NotificationKind::CreateFailed, "create task", result)?;
        if self.resident_team_is(team_id) {
            self.store.add_task(project_id, kanban_id, task.clone());
        }
        Ok(task)
    }

    fn confirm<T>(
        &self,
        kind: NotificationKind,
        action: &str,
        result: Result<T, SyncError>,
    ) -> Result<T, SyncError> {
        result.map_err(|e| {
            warn!("Could not {}: {}", action, e);
            self.notify(kind, format!("Could not {action}: {e}"));
            e
        })
    }

    fn resident_team_is(&self, team_id: &str) -> bool {
        self.store
            .team()
            .is_some_and(|team| team.id == team_id)
    }

    fn notify(&self, kind: NotificationKind, message: String) {
        // No listener is fine; the message is transient.
        let _ = self.notifications.send(Notification { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, DropOutcome};
    use crate::store::fixtures::{kanban, project, task, team, user};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Scripted server double.
    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        accept_answer: Option<bool>,
        gate: Option<Arc<Notify>>,
        move_calls: AtomicUsize,
        seen: Mutex<Vec<MoveCommand>>,
    }

    #[async_trait]
    impl RemoteTeamApi for FakeApi {
        async fn fetch_team(&self, team_id: &str) -> Result<Team, SyncError> {
            if self.fail {
                return Err(SyncError::Malformed("offline".into()));
            }
            Ok(team(team_id, vec![]))
        }

        async fn move_task(&self, command: &MoveCommand) -> Result<Task, SyncError> {
            self.move_calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(command.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(SyncError::Remote {
                    code: "CONFLICT".into(),
                    message: "stale source".into(),
                });
            }
            let mut moved = task(&command.task_id);
            moved.description = "canonical".into();
            Ok(moved)
        }

        async fn accept_team_request(&self, _: &str, _: &str) -> Result<bool, SyncError> {
            if self.fail {
                return Err(SyncError::Malformed("offline".into()));
            }
            Ok(self.accept_answer.unwrap_or(true))
        }

        async fn reject_team_request(&self, _: &str, _: &str) -> Result<bool, SyncError> {
            if self.fail {
                return Err(SyncError::Malformed("offline".into()));
            }
            Ok(true)
        }

        async fn create_project(
            &self,
            _: &str,
            request: &CreateProjectRequest,
        ) -> Result<Project, SyncError> {
            self.offline()?;
            Ok(project(&request.name, vec![]))
        }

        async fn delete_project(&self, _: &str, _: &str) -> Result<(), SyncError> {
            self.offline()
        }

        async fn create_kanban(
            &self,
            _: &str,
            _: &str,
            request: &CreateKanbanRequest,
        ) -> Result<Kanban, SyncError> {
            self.offline()?;
            Ok(kanban(&request.name, vec![]))
        }

        async fn create_task(
            &self,
            _: &str,
            _: &str,
            _: &str,
            request: &CreateTaskRequest,
        ) -> Result<Task, SyncError> {
            self.offline()?;
            Ok(task(&request.name))
        }
    }

    impl FakeApi {
        fn offline(&self) -> Result<(), SyncError> {
            if self.fail {
                return Err(SyncError::Remote {
                    code: "NOT_FOUND".into(),
                    message: "no such team".into(),
                });
            }
            Ok(())
        }
    }

    fn board_store() -> Arc<TeamStore> {
        let store = Arc::new(TeamStore::new());
        let mut base = team(
            "t1",
            vec![project(
                "p1",
                vec![kanban("k1", vec![task("x"), task("y")]), kanban("k2", vec![])],
            )],
        );
        base.invite_requests = vec![user("u1"), user("u2")];
        store.set_team(base);
        store
    }

    fn drop_move(board: &mut Board, task_id: &str, from: &str, to: &str) -> DropOutcome {
        board.pick_up(task_id, from).unwrap();
        board.hover(to).unwrap();
        board.drop_task().unwrap()
    }

    fn tasks_in(store: &TeamStore, kanban_id: &str) -> Vec<String> {
        let team = store.team().unwrap();
        team.project("p1")
            .unwrap()
            .kanban(kanban_id)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_commit_move_reconciles_store() {
        let store = board_store();
        let api = Arc::new(FakeApi::default());
        let sync = TeamSync::new(api.clone(), store.clone());
        let mut board = Board::new("t1", "p1");

        let DropOutcome::Move(pending) = drop_move(&mut board, "x", "k1", "k2") else {
            panic!("expected a move");
        };
        let moved = sync.commit_move(pending).await.unwrap();
        board.settle();

        assert_eq!(moved.description, "canonical");
        assert_eq!(tasks_in(&store, "k1"), vec!["y"]);
        assert_eq!(tasks_in(&store, "k2"), vec!["x"]);
        assert!(!board.is_busy());
        assert_eq!(api.seen.lock().unwrap()[0].kanban_id_to, "k2");
    }

    #[tokio::test]
    async fn test_failed_move_leaves_store_and_notifies() {
        let store = board_store();
        let api = Arc::new(FakeApi {
            fail: true,
            ..Default::default()
        });
        let sync = TeamSync::new(api, store.clone());
        let mut notifications = sync.subscribe_notifications();
        let mut board = Board::new("t1", "p1");
        let version = store.version();

        let DropOutcome::Move(pending) = drop_move(&mut board, "x", "k1", "k2") else {
            panic!("expected a move");
        };
        assert!(sync.commit_move(pending).await.is_err());

        assert_eq!(store.version(), version);
        assert_eq!(tasks_in(&store, "k1"), vec!["x", "y"]);
        assert!(tasks_in(&store, "k2").is_empty());
        assert!(!board.is_busy());

        let note = notifications.recv().await.unwrap();
        assert_eq!(note.kind, NotificationKind::MoveFailed);
    }

    #[tokio::test]
    async fn test_second_drop_is_discarded_while_in_flight() {
        let store = board_store();
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let sync = Arc::new(TeamSync::new(api.clone(), store.clone()));
        let mut board = Board::new("t1", "p1");

        let DropOutcome::Move(pending) = drop_move(&mut board, "x", "k1", "k2") else {
            panic!("expected a move");
        };
        let handle = tokio::spawn({
            let sync = sync.clone();
            async move { sync.commit_move(pending).await }
        });

        for _ in 0..3 {
            assert!(matches!(
                drop_move(&mut board, "y", "k1", "k2"),
                DropOutcome::Busy
            ));
            assert!(board.is_busy());
        }

        gate.notify_one();
        handle.await.unwrap().unwrap();

        assert!(!board.is_busy());
        assert_eq!(api.move_calls.load(Ordering::SeqCst), 1);
        assert_eq!(tasks_in(&store, "k1"), vec!["y"]);
        assert_eq!(tasks_in(&store, "k2"), vec!["x"]);
    }

    #[tokio::test]
    async fn test_observers_never_see_task_twice_or_missing() {
        let store = board_store();
        let api = Arc::new(FakeApi::default());
        let sync = TeamSync::new(api, store.clone());
        let mut rx = store.subscribe();
        let mut board = Board::new("t1", "p1");

        let DropOutcome::Move(pending) = drop_move(&mut board, "x", "k1", "k2") else {
            panic!("expected a move");
        };
        sync.commit_move(pending).await.unwrap();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        let team = snapshot.team.unwrap();
        let p1 = team.project("p1").unwrap();
        let count = p1
            .kanbans
            .iter()
            .flat_map(|k| k.tasks.iter())
            .filter(|t| t.id == "x")
            .count();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_accept_invite_moves_user_locally() {
        let store = board_store();
        let sync = TeamSync::new(Arc::new(FakeApi::default()), store.clone());

        assert!(sync.accept_invite("t1", "u1").await.unwrap());

        let team = store.team().unwrap();
        let pending: Vec<_> = team.invite_requests.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(pending, vec!["u2"]);
        assert!(team.is_member("u1"));

        // Accepting again must not duplicate the member.
        assert!(sync.accept_invite("t1", "u1").await.unwrap());
        let team = store.team().unwrap();
        assert_eq!(team.users.iter().filter(|u| u.id == "u1").count(), 1);
    }

    #[tokio::test]
    async fn test_declined_accept_notifies() {
        let store = board_store();
        let sync = TeamSync::new(
            Arc::new(FakeApi {
                accept_answer: Some(false),
                ..Default::default()
            }),
            store.clone(),
        );
        let mut notifications = sync.subscribe_notifications();
        let version = store.version();

        assert!(!sync.accept_invite("t1", "u1").await.unwrap());
        assert_eq!(store.version(), version);
        assert_eq!(
            notifications.recv().await.unwrap().kind,
            NotificationKind::AcceptFailed
        );
    }

    #[tokio::test]
    async fn test_reject_invite_removes_pending_only() {
        let store = board_store();
        let sync = TeamSync::new(Arc::new(FakeApi::default()), store.clone());

        assert!(sync.reject_invite("t1", "u2").await.unwrap());

        let team = store.team().unwrap();
        assert!(!team.has_pending_request("u2"));
        assert!(!team.is_member("u2"));
        assert!(team.has_pending_request("u1"));
    }

    #[tokio::test]
    async fn test_load_team_replaces_resident() {
        let store = board_store();
        let sync = TeamSync::new(Arc::new(FakeApi::default()), store.clone());

        sync.load_team("t9").await.unwrap();
        assert_eq!(store.team().unwrap().id, "t9");
    }

    fn new_task(name: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            name: name.into(),
            description: String::new(),
            tag: "bug".into(),
            author_id: "author".into(),
        }
    }

    #[tokio::test]
    async fn test_create_flows_append_confirmed_records() {
        let store = board_store();
        let sync = TeamSync::new(Arc::new(FakeApi::default()), store.clone());

        let created = sync
            .create_project("t1", &CreateProjectRequest { name: "p2".into() })
            .await
            .unwrap();
        assert_eq!(created.id, "p2");

        sync.create_kanban("t1", "p1", &CreateKanbanRequest { name: "k3".into() })
            .await
            .unwrap();
        sync.create_task("t1", "p1", "k3", &new_task("z"))
            .await
            .unwrap();

        let team = store.team().unwrap();
        let ids: Vec<_> = team.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        let p1 = team.project("p1").unwrap();
        let kanbans: Vec<_> = p1.kanbans.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(kanbans, vec!["k1", "k2", "k3"]);
        assert_eq!(tasks_in(&store, "k3"), vec!["z"]);
        assert_eq!(p1.tasks_counter, 1);

        sync.delete_project("t1", "p2").await.unwrap();
        assert!(store.team().unwrap().project("p2").is_none());
    }

    #[tokio::test]
    async fn test_failed_create_or_delete_leaves_store_and_notifies() {
        let store = board_store();
        let sync = TeamSync::new(
            Arc::new(FakeApi {
                fail: true,
                ..Default::default()
            }),
            store.clone(),
        );
        let mut notifications = sync.subscribe_notifications();
        let version = store.version();

        assert!(sync
            .create_task("t1", "p1", "k2", &new_task("z"))
            .await
            .is_err());
        assert!(sync.delete_project("t1", "p1").await.is_err());

        assert_eq!(store.version(), version);
        assert!(tasks_in(&store, "k2").is_empty());
        assert_eq!(
            notifications.recv().await.unwrap().kind,
            NotificationKind::CreateFailed
        );
        assert_eq!(
            notifications.recv().await.unwrap().kind,
            NotificationKind::DeleteFailed
        );
    }

    #[tokio::test]
    async fn test_create_for_other_team_skips_store() {
        let store = board_store();
        let sync = TeamSync::new(Arc::new(FakeApi::default()), store.clone());
        let version = store.version();

        sync.create_project("t2", &CreateProjectRequest { name: "p9".into() })
            .await
            .unwrap();
        assert_eq!(store.version(), version);
    }
}
