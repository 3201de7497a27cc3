//! Database repository for teams and their boards.
//!
//! Every mutation runs in a transaction together with its revision bump.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool, Transaction};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Comment, CreateCommentRequest, CreateKanbanRequest, CreateProjectRequest, CreateTaskRequest,
    CreateTeamRequest, JoinTeamRequest, Kanban, MoveTaskRequest, Project, Task, Team, TeamSummary,
    UpsertUserRequest, User,
};

const TASK_COLUMNS: &str = "t.id, t.kanban_id, t.name, t.description, t.tag, \
     u.id AS author_id, u.email AS author_email, u.nickname AS author_nickname, \
     u.picture AS author_picture";

const COMMENT_COLUMNS: &str = "c.id, c.task_id, c.text, \
     u.id AS author_id, u.email AS author_email, u.nickname AS author_nickname, \
     u.picture AS author_picture";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a transaction that takes the write lock up front.
    ///
    /// Concurrent writers wait on the busy timeout instead of failing later on
    /// a read snapshot that another commit made stale.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    // ==================== USER OPERATIONS ====================

    /// Insert a user or refresh the profile fields of an existing one.
    pub async fn upsert_user(&self, request: &UpsertUserRequest) -> Result<User, AppError> {
        let id = request
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin_write().await?;
        sqlx::query(
            "INSERT INTO users (id, email, nickname, picture, updated_at) VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET email = excluded.email, nickname = excluded.nickname, \
             picture = excluded.picture, updated_at = excluded.updated_at",
        )
        .bind(&id)
        .bind(&request.email)
        .bind(&request.nickname)
        .bind(&request.picture)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(User {
            id,
            email: request.email.clone(),
            nickname: request.nickname.clone(),
            picture: request.picture.clone(),
        })
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, email, nickname, picture FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Teams the user is a member of, in creation order.
    pub async fn list_teams_for_user(&self, user_id: &str) -> Result<Vec<TeamSummary>, AppError> {
        let rows = sqlx::query(
            "SELECT t.id, t.name FROM teams t JOIN team_members m ON m.team_id = t.id \
             WHERE m.user_id = ? ORDER BY t.created_at, t.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| TeamSummary {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    // ==================== TEAM OPERATIONS ====================

    /// Create a team with its author as the first member.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, AppError> {
        self.require_user(&request.author_id).await?;

        let id = Uuid::new_v4().to_string();
        let invite_link = Uuid::new_v4().simple().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin_write().await?;
        sqlx::query(
            "INSERT INTO teams (id, name, invite_link, author_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&invite_link)
        .bind(&request.author_id)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id, position) VALUES (?, ?, 0)")
            .bind(&id)
            .bind(&request.author_id)
            .execute(&mut *tx)
            .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        self.get_team(&id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Team {} vanished after creation", id)))
    }

    /// Load the full team aggregate.
    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        let Some(row) = sqlx::query(
            "SELECT t.id, t.name, t.invite_link, \
             u.id AS author_id, u.email AS author_email, u.nickname AS author_nickname, \
             u.picture AS author_picture \
             FROM teams t JOIN users u ON u.id = t.author_id WHERE t.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let users = sqlx::query(
            "SELECT u.id, u.email, u.nickname, u.picture FROM team_members m \
             JOIN users u ON u.id = m.user_id WHERE m.team_id = ? ORDER BY m.position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let invite_requests = sqlx::query(
            "SELECT u.id, u.email, u.nickname, u.picture FROM invite_requests r \
             JOIN users u ON u.id = r.user_id WHERE r.team_id = ? ORDER BY r.position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let projects = self.load_projects(id).await?;

        Ok(Some(Team {
            id: row.get("id"),
            name: row.get("name"),
            invite_link: row.get("invite_link"),
            users: users.iter().map(user_from_row).collect(),
            projects,
            invite_requests: invite_requests.iter().map(user_from_row).collect(),
            author: author_from_row(&row),
        }))
    }

    /// Build the project -> kanban -> task tree of a team with one query per level.
    async fn load_projects(&self, team_id: &str) -> Result<Vec<Arc<Project>>, AppError> {
        let project_rows = sqlx::query(
            "SELECT id, name, tasks_counter FROM projects WHERE team_id = ? ORDER BY position",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let kanban_rows = sqlx::query(
            "SELECT k.id, k.project_id, k.name FROM kanbans k \
             JOIN projects p ON p.id = k.project_id WHERE p.team_id = ? ORDER BY k.position",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let task_rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             JOIN kanbans k ON k.id = t.kanban_id \
             JOIN projects p ON p.id = k.project_id \
             JOIN users u ON u.id = t.author_id \
             WHERE p.team_id = ? ORDER BY t.position"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let comment_rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments c \
             JOIN tasks t ON t.id = c.task_id \
             JOIN kanbans k ON k.id = t.kanban_id \
             JOIN projects p ON p.id = k.project_id \
             JOIN users u ON u.id = c.author_id \
             WHERE p.team_id = ? ORDER BY c.created_at, c.rowid"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let mut comments_by_task: HashMap<String, Vec<Comment>> = HashMap::new();
        for row in &comment_rows {
            comments_by_task
                .entry(row.get("task_id"))
                .or_default()
                .push(comment_from_row(row));
        }

        let mut tasks_by_kanban: HashMap<String, Vec<Arc<Task>>> = HashMap::new();
        for row in &task_rows {
            let mut task = task_from_row(row);
            task.comments = comments_by_task.remove(&task.id).unwrap_or_default();
            tasks_by_kanban
                .entry(row.get("kanban_id"))
                .or_default()
                .push(Arc::new(task));
        }

        let mut kanbans_by_project: HashMap<String, Vec<Arc<Kanban>>> = HashMap::new();
        for row in &kanban_rows {
            let id: String = row.get("id");
            let tasks = tasks_by_kanban.remove(&id).unwrap_or_default();
            kanbans_by_project
                .entry(row.get("project_id"))
                .or_default()
                .push(Arc::new(Kanban {
                    id,
                    name: row.get("name"),
                    tasks,
                }));
        }

        Ok(project_rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                let kanbans = kanbans_by_project.remove(&id).unwrap_or_default();
                Arc::new(Project {
                    id,
                    name: row.get("name"),
                    tasks_counter: row.get("tasks_counter"),
                    kanbans,
                })
            })
            .collect())
    }

    // ==================== INVITE OPERATIONS ====================

    /// Register a pending invite request through the team's invite link.
    ///
    /// Repeating the request is a no-op; members cannot request again.
    pub async fn join_team(&self, request: &JoinTeamRequest) -> Result<TeamSummary, AppError> {
        self.require_user(&request.user_id).await?;

        let team = sqlx::query("SELECT id, name FROM teams WHERE invite_link = ?")
            .bind(&request.invite_link)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("No team matches this invite link".to_string()))?;
        let summary = TeamSummary {
            id: team.get("id"),
            name: team.get("name"),
        };

        let mut tx = self.begin_write().await?;
        if is_member(&mut tx, &summary.id, &request.user_id).await? {
            return Err(AppError::Conflict(format!(
                "User {} is already a member of team {}",
                request.user_id, summary.id
            )));
        }

        let result = sqlx::query(
            "INSERT OR IGNORE INTO invite_requests (team_id, user_id, position) VALUES (?, ?, \
             (SELECT COALESCE(MAX(position), -1) + 1 FROM invite_requests WHERE team_id = ?))",
        )
        .bind(&summary.id)
        .bind(&request.user_id)
        .bind(&summary.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            bump_revision(&mut tx).await?;
        }
        tx.commit().await?;

        Ok(summary)
    }

    /// Move a user from the pending invite list into the team.
    ///
    /// Accepting a user who is already a member succeeds without changes.
    pub async fn accept_invite(&self, team_id: &str, user_id: &str) -> Result<bool, AppError> {
        let mut tx = self.begin_write().await?;
        require_team(&mut tx, team_id).await?;

        let removed = sqlx::query("DELETE FROM invite_requests WHERE team_id = ? AND user_id = ?")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            if is_member(&mut tx, team_id, user_id).await? {
                return Ok(true);
            }
            return Err(AppError::NotFound(format!(
                "No invite request from user {} for team {}",
                user_id, team_id
            )));
        }

        sqlx::query(
            "INSERT OR IGNORE INTO team_members (team_id, user_id, position) VALUES (?, ?, \
             (SELECT COALESCE(MAX(position), -1) + 1 FROM team_members WHERE team_id = ?))",
        )
        .bind(team_id)
        .bind(user_id)
        .bind(team_id)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Drop a pending invite request without admitting the user.
    pub async fn reject_invite(&self, team_id: &str, user_id: &str) -> Result<bool, AppError> {
        let mut tx = self.begin_write().await?;
        require_team(&mut tx, team_id).await?;

        let removed = sqlx::query("DELETE FROM invite_requests WHERE team_id = ? AND user_id = ?")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No invite request from user {} for team {}",
                user_id, team_id
            )));
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    // ==================== PROJECT OPERATIONS ====================

    /// Append a project to a team.
    pub async fn create_project(
        &self,
        team_id: &str,
        request: &CreateProjectRequest,
    ) -> Result<Project, AppError> {
        let id = Uuid::new_v4().to_string();

        let mut tx = self.begin_write().await?;
        require_team(&mut tx, team_id).await?;

        sqlx::query(
            "INSERT INTO projects (id, team_id, name, tasks_counter, position) VALUES (?, ?, ?, 0, \
             (SELECT COALESCE(MAX(position), -1) + 1 FROM projects WHERE team_id = ?))",
        )
        .bind(&id)
        .bind(team_id)
        .bind(&request.name)
        .bind(team_id)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(Project {
            id,
            name: request.name.clone(),
            tasks_counter: 0,
            kanbans: Vec::new(),
        })
    }

    /// Delete a project together with its kanbans, tasks and comments.
    pub async fn delete_project(&self, team_id: &str, project_id: &str) -> Result<(), AppError> {
        let mut tx = self.begin_write().await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = ? AND team_id = ?")
            .bind(project_id)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Project {} not found in team {}",
                project_id, team_id
            )));
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    // ==================== KANBAN OPERATIONS ====================

    /// Append a kanban to a project.
    pub async fn create_kanban(
        &self,
        team_id: &str,
        project_id: &str,
        request: &CreateKanbanRequest,
    ) -> Result<Kanban, AppError> {
        let id = Uuid::new_v4().to_string();

        let mut tx = self.begin_write().await?;
        require_project(&mut tx, team_id, project_id).await?;

        sqlx::query(
            "INSERT INTO kanbans (id, project_id, name, position) VALUES (?, ?, ?, \
             (SELECT COALESCE(MAX(position), -1) + 1 FROM kanbans WHERE project_id = ?))",
        )
        .bind(&id)
        .bind(project_id)
        .bind(&request.name)
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(Kanban {
            id,
            name: request.name.clone(),
            tasks: Vec::new(),
        })
    }

    // ==================== TASK OPERATIONS ====================

    /// Get a task with its comments.
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t JOIN users u ON u.id = t.author_id WHERE t.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let comment_rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.task_id = ? ORDER BY c.created_at, c.rowid"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut task = task_from_row(&row);
        task.comments = comment_rows.iter().map(comment_from_row).collect();
        Ok(Some(task))
    }

    /// Append a task to a kanban and count it on the project.
    pub async fn create_task(
        &self,
        team_id: &str,
        project_id: &str,
        kanban_id: &str,
        request: &CreateTaskRequest,
    ) -> Result<Task, AppError> {
        let author = self.require_user(&request.author_id).await?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin_write().await?;
        require_kanban(&mut tx, team_id, project_id, kanban_id).await?;

        sqlx::query(
            "INSERT INTO tasks (id, kanban_id, name, description, tag, author_id, position, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, \
             (SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE kanban_id = ?), ?)",
        )
        .bind(&id)
        .bind(kanban_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.tag)
        .bind(&request.author_id)
        .bind(kanban_id)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE projects SET tasks_counter = tasks_counter + 1 WHERE id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(Task {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            author,
            tag: request.tag.clone(),
            comments: Vec::new(),
        })
    }

    /// Move a task to the end of another kanban of the same project.
    ///
    /// The task must currently sit in `kanban_id_from`; a stale source is a
    /// conflict, so two racing moves of one task cannot both apply.
    pub async fn move_task(
        &self,
        team_id: &str,
        task_id: &str,
        request: &MoveTaskRequest,
    ) -> Result<Task, AppError> {
        if request.kanban_id_from == request.kanban_id_to {
            return Err(AppError::Validation(
                "Source and destination kanban must differ".to_string(),
            ));
        }

        let mut tx = self.begin_write().await?;

        let current = sqlx::query(
            "SELECT t.kanban_id FROM tasks t \
             JOIN kanbans k ON k.id = t.kanban_id \
             JOIN projects p ON p.id = k.project_id \
             WHERE t.id = ? AND k.project_id = ? AND p.team_id = ?",
        )
        .bind(task_id)
        .bind(&request.project_id)
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Task {} not found in project {}",
                task_id, request.project_id
            ))
        })?;

        let current_kanban: String = current.get("kanban_id");
        if current_kanban != request.kanban_id_from {
            return Err(AppError::Conflict(format!(
                "Task {} is not in kanban {}",
                task_id, request.kanban_id_from
            )));
        }

        require_kanban(&mut tx, team_id, &request.project_id, &request.kanban_id_to).await?;

        let now = Utc::now().to_rfc3339();
        let moved = sqlx::query(
            "UPDATE tasks SET kanban_id = ?, updated_at = ?, \
             position = (SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE kanban_id = ?) \
             WHERE id = ? AND kanban_id = ?",
        )
        .bind(&request.kanban_id_to)
        .bind(&now)
        .bind(&request.kanban_id_to)
        .bind(task_id)
        .bind(&request.kanban_id_from)
        .execute(&mut *tx)
        .await?;

        if moved.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "Task {} is not in kanban {}",
                task_id, request.kanban_id_from
            )));
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        tracing::debug!(
            task_id,
            from = %request.kanban_id_from,
            to = %request.kanban_id_to,
            "Task moved"
        );

        self.get_task(task_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Task {} vanished after move", task_id)))
    }

    /// Add a comment to a task of the team.
    pub async fn add_comment(
        &self,
        team_id: &str,
        task_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let author = self.require_user(&request.author_id).await?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin_write().await?;
        let exists = sqlx::query(
            "SELECT t.id FROM tasks t JOIN kanbans k ON k.id = t.kanban_id \
             JOIN projects p ON p.id = k.project_id WHERE t.id = ? AND p.team_id = ?",
        )
        .bind(task_id)
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Task {} not found in team {}",
                task_id, team_id
            )));
        }

        sqlx::query(
            "INSERT INTO comments (id, task_id, author_id, text, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(task_id)
        .bind(&request.author_id)
        .bind(&request.text)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(Comment {
            id,
            author,
            text: request.text.clone(),
        })
    }

    async fn require_user(&self, id: &str) -> Result<User, AppError> {
        self.get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

async fn bump_revision(conn: &mut SqliteConnection) -> Result<(), AppError> {
    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
        .bind(&now)
        .execute(conn)
        .await?;
    Ok(())
}

async fn is_member(
    conn: &mut SqliteConnection,
    team_id: &str,
    user_id: &str,
) -> Result<bool, AppError> {
    let row = sqlx::query("SELECT 1 FROM team_members WHERE team_id = ? AND user_id = ?")
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

async fn require_team(conn: &mut SqliteConnection, team_id: &str) -> Result<(), AppError> {
    sqlx::query("SELECT id FROM teams WHERE id = ?")
        .bind(team_id)
        .fetch_optional(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))
}

async fn require_project(
    conn: &mut SqliteConnection,
    team_id: &str,
    project_id: &str,
) -> Result<(), AppError> {
    sqlx::query("SELECT id FROM projects WHERE id = ? AND team_id = ?")
        .bind(project_id)
        .bind(team_id)
        .fetch_optional(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Project {} not found in team {}",
                project_id, team_id
            ))
        })
}

async fn require_kanban(
    conn: &mut SqliteConnection,
    team_id: &str,
    project_id: &str,
    kanban_id: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "SELECT k.id FROM kanbans k JOIN projects p ON p.id = k.project_id \
         WHERE k.id = ? AND k.project_id = ? AND p.team_id = ?",
    )
    .bind(kanban_id)
    .bind(project_id)
    .bind(team_id)
    .fetch_optional(conn)
    .await?
    .map(|_| ())
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "Kanban {} not found in project {}",
            kanban_id, project_id
        ))
    })
}

// ==================== ROW MAPPERS ====================

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        nickname: row.get("nickname"),
        picture: row.get("picture"),
    }
}

fn author_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("author_id"),
        email: row.get("author_email"),
        nickname: row.get("author_nickname"),
        picture: row.get("author_picture"),
    }
}

fn task_from_row(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        author: author_from_row(row),
        tag: row.get("tag"),
        comments: Vec::new(),
    }
}

fn comment_from_row(row: &SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        author: author_from_row(row),
        text: row.get("text"),
    }
}
