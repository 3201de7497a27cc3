//! Pure reducer for team store actions.

use std::sync::Arc;

use crate::models::{Kanban, Project, Task, Team, User};

/// Every way the resident team can change.
#[derive(Debug, Clone)]
pub enum TeamAction {
    /// Replace the resident team wholesale.
    SetTeam(Team),
    /// Drop the resident team (logout, unload).
    ClearTeam,
    AddInviteRequest(User),
    RemoveInviteRequest {
        user_id: String,
    },
    /// Move a pending user into the member list.
    AcceptInvite {
        user_id: String,
    },
    AddProject(Project),
    RemoveProject {
        project_id: String,
    },
    AddKanban {
        project_id: String,
        kanban: Kanban,
    },
    AddTask {
        project_id: String,
        kanban_id: String,
        task: Task,
    },
    /// Reconcile a confirmed move with the canonical task record.
    MoveTask {
        project_id: String,
        kanban_id_from: String,
        kanban_id_to: String,
        task: Task,
    },
}

impl TeamAction {
    pub fn name(&self) -> &'static str {
        match self {
            TeamAction::SetTeam(_) => "set_team",
            TeamAction::ClearTeam => "clear_team",
            TeamAction::AddInviteRequest(_) => "add_invite_request",
            TeamAction::RemoveInviteRequest { .. } => "remove_invite_request",
            TeamAction::AcceptInvite { .. } => "accept_invite",
            TeamAction::AddProject(_) => "add_project",
            TeamAction::RemoveProject { .. } => "remove_project",
            TeamAction::AddKanban { .. } => "add_kanban",
            TeamAction::AddTask { .. } => "add_task",
            TeamAction::MoveTask { .. } => "move_task",
        }
    }
}

/// Result of reducing one action.
#[derive(Debug, Clone)]
pub enum Reduction {
    /// Lookup miss, absent team or nothing to do.
    Unchanged,
    /// The new resident team (or none).
    Changed(Option<Arc<Team>>),
}

/// Compute the next team from the current one.
///
/// Never fails: misses and an absent team yield [`Reduction::Unchanged`].
pub fn reduce(current: Option<&Arc<Team>>, action: TeamAction) -> Reduction {
    let team = match (current, action) {
        (_, TeamAction::SetTeam(team)) => return Reduction::Changed(Some(Arc::new(team))),
        (None, _) => return Reduction::Unchanged,
        (Some(_), TeamAction::ClearTeam) => return Reduction::Changed(None),
        (Some(team), action) => apply(team, action),
    };

    match team {
        Some(team) => Reduction::Changed(Some(Arc::new(team))),
        None => Reduction::Unchanged,
    }
}

fn apply(team: &Team, action: TeamAction) -> Option<Team> {
    match action {
        TeamAction::SetTeam(_) | TeamAction::ClearTeam => None,
        TeamAction::AddInviteRequest(user) => {
            if team.has_pending_request(&user.id) || team.is_member(&user.id) {
                return None;
            }
            let mut next = team.clone();
            next.invite_requests.push(user);
            Some(next)
        }
        TeamAction::RemoveInviteRequest { user_id } => {
            if !team.has_pending_request(&user_id) {
                return None;
            }
            let mut next = team.clone();
            next.invite_requests.retain(|user| user.id != user_id);
            Some(next)
        }
        TeamAction::AcceptInvite { user_id } => {
            let pending = team
                .invite_requests
                .iter()
                .find(|user| user.id == user_id)?
                .clone();
            let mut next = team.clone();
            next.invite_requests.retain(|user| user.id != user_id);
            if !next.is_member(&user_id) {
                next.users.push(pending);
            }
            Some(next)
        }
        TeamAction::AddProject(project) => {
            if team.project(&project.id).is_some() {
                return None;
            }
            let mut next = team.clone();
            next.projects.push(Arc::new(project));
            Some(next)
        }
        TeamAction::RemoveProject { project_id } => {
            team.project(&project_id)?;
            let mut next = team.clone();
            next.projects.retain(|project| project.id != project_id);
            Some(next)
        }
        TeamAction::AddKanban { project_id, kanban } => {
            update_project(team, &project_id, |project| {
                if project.kanban(&kanban.id).is_some() {
                    return None;
                }
                let mut next = project.clone();
                next.kanbans.push(Arc::new(kanban));
                Some(next)
            })
        }
        TeamAction::AddTask {
            project_id,
            kanban_id,
            task,
        } => update_project(team, &project_id, |project| {
            let index = kanban_index(project, &kanban_id)?;
            if project.kanbans[index].contains_task(&task.id) {
                return None;
            }
            let mut kanban = (*project.kanbans[index]).clone();
            kanban.tasks.push(Arc::new(task));

            let mut next = project.clone();
            next.kanbans[index] = Arc::new(kanban);
            next.tasks_counter += 1;
            Some(next)
        }),
        TeamAction::MoveTask {
            project_id,
            kanban_id_from,
            kanban_id_to,
            task,
        } => update_project(team, &project_id, |project| {
            move_within(project, &kanban_id_from, &kanban_id_to, task)
        }),
    }
}

/// Remove the task from both kanbans, then append the canonical record to the
/// destination. A move that already happened is left untouched.
fn move_within(project: &Project, from: &str, to: &str, task: Task) -> Option<Project> {
    if from == to {
        return None;
    }
    let from_index = kanban_index(project, from)?;
    let to_index = kanban_index(project, to)?;

    let source = &project.kanbans[from_index];
    let destination = &project.kanbans[to_index];
    let already_applied = !source.contains_task(&task.id)
        && destination.tasks.iter().filter(|t| t.id == task.id).count() == 1
        && destination
            .task(&task.id)
            .is_some_and(|existing| **existing == task);
    if already_applied {
        return None;
    }

    let mut source = (**source).clone();
    source.tasks.retain(|t| t.id != task.id);

    let mut destination = (**destination).clone();
    destination.tasks.retain(|t| t.id != task.id);
    destination.tasks.push(Arc::new(task));

    let mut next = project.clone();
    next.kanbans[from_index] = Arc::new(source);
    next.kanbans[to_index] = Arc::new(destination);
    Some(next)
}

fn update_project(
    team: &Team,
    project_id: &str,
    f: impl FnOnce(&Project) -> Option<Project>,
) -> Option<Team> {
    let index = team
        .projects
        .iter()
        .position(|project| project.id == project_id)?;
    let project = f(&team.projects[index])?;

    let mut next = team.clone();
    next.projects[index] = Arc::new(project);
    Some(next)
}

fn kanban_index(project: &Project, kanban_id: &str) -> Option<usize> {
    project
        .kanbans
        .iter()
        .position(|kanban| kanban.id == kanban_id)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn resident(team: Team) -> Arc<Team> {
        Arc::new(team)
    }

    fn changed(reduction: Reduction) -> Arc<Team> {
        match reduction {
            Reduction::Changed(Some(team)) => team,
            other => panic!("expected a changed team, got {:?}", other),
        }
    }

    fn task_ids(kanban: &Kanban) -> Vec<&str> {
        kanban.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_absent_team_ignores_mutations() {
        let actions = vec![
            TeamAction::ClearTeam,
            TeamAction::AddInviteRequest(user("u1")),
            TeamAction::RemoveInviteRequest {
                user_id: "u1".into(),
            },
            TeamAction::AcceptInvite {
                user_id: "u1".into(),
            },
            TeamAction::AddProject(project("p1", vec![])),
            TeamAction::AddKanban {
                project_id: "p1".into(),
                kanban: kanban("k1", vec![]),
            },
        ];
        for action in actions {
            assert!(matches!(reduce(None, action), Reduction::Unchanged));
        }
    }

    #[test]
    fn test_appends_keep_order() {
        let mut current = resident(team("t1", vec![]));

        current = changed(reduce(
            Some(&current),
            TeamAction::AddProject(project("p1", vec![])),
        ));
        current = changed(reduce(
            Some(&current),
            TeamAction::AddProject(project("p2", vec![])),
        ));
        for k in ["k1", "k2"] {
            current = changed(reduce(
                Some(&current),
                TeamAction::AddKanban {
                    project_id: "p1".into(),
                    kanban: kanban(k, vec![]),
                },
            ));
        }
        for t in ["a", "b", "c"] {
            current = changed(reduce(
                Some(&current),
                TeamAction::AddTask {
                    project_id: "p1".into(),
                    kanban_id: "k2".into(),
                    task: task(t),
                },
            ));
        }

        let ids: Vec<_> = current.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        let p1 = current.project("p1").unwrap();
        let kanban_ids: Vec<_> = p1.kanbans.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(kanban_ids, vec!["k1", "k2"]);
        assert_eq!(task_ids(p1.kanban("k2").unwrap()), vec!["a", "b", "c"]);
        assert_eq!(p1.tasks_counter, 3);
    }

    #[test]
    fn test_invalid_ids_leave_team_untouched() {
        let current = resident(team("t1", vec![project("p1", vec![kanban("k1", vec![])])]));

        let misses = vec![
            TeamAction::AddKanban {
                project_id: "nope".into(),
                kanban: kanban("k9", vec![]),
            },
            TeamAction::AddTask {
                project_id: "nope".into(),
                kanban_id: "k1".into(),
                task: task("x"),
            },
            TeamAction::AddTask {
                project_id: "p1".into(),
                kanban_id: "nope".into(),
                task: task("x"),
            },
            TeamAction::RemoveInviteRequest {
                user_id: "ghost".into(),
            },
            TeamAction::RemoveProject {
                project_id: "nope".into(),
            },
            TeamAction::MoveTask {
                project_id: "p1".into(),
                kanban_id_from: "k1".into(),
                kanban_id_to: "nope".into(),
                task: task("x"),
            },
        ];

        let before = serde_json::to_string(&*current).unwrap();
        for action in misses {
            assert!(matches!(
                reduce(Some(&current), action),
                Reduction::Unchanged
            ));
        }
        assert_eq!(serde_json::to_string(&*current).unwrap(), before);
    }

    #[test]
    fn test_untouched_branches_are_shared() {
        let current = resident(team(
            "t1",
            vec![
                project("p1", vec![kanban("k1", vec![]), kanban("k2", vec![task("x")])]),
                project("p2", vec![]),
            ],
        ));

        let next = changed(reduce(
            Some(&current),
            TeamAction::AddTask {
                project_id: "p1".into(),
                kanban_id: "k1".into(),
                task: task("y"),
            },
        ));

        assert!(!Arc::ptr_eq(&current, &next));
        assert!(!Arc::ptr_eq(&current.projects[0], &next.projects[0]));
        assert!(Arc::ptr_eq(&current.projects[1], &next.projects[1]));
        assert!(!Arc::ptr_eq(
            &current.projects[0].kanbans[0],
            &next.projects[0].kanbans[0]
        ));
        assert!(Arc::ptr_eq(
            &current.projects[0].kanbans[1],
            &next.projects[0].kanbans[1]
        ));
    }

    #[test]
    fn test_move_task_between_kanbans() {
        let current = resident(team(
            "t1",
            vec![project(
                "p1",
                vec![kanban("k1", vec![task("x")]), kanban("k2", vec![])],
            )],
        ));

        let next = changed(reduce(
            Some(&current),
            TeamAction::MoveTask {
                project_id: "p1".into(),
                kanban_id_from: "k1".into(),
                kanban_id_to: "k2".into(),
                task: task("x"),
            },
        ));

        let p1 = next.project("p1").unwrap();
        assert!(p1.kanban("k1").unwrap().tasks.is_empty());
        assert_eq!(task_ids(p1.kanban("k2").unwrap()), vec!["x"]);
    }

    #[test]
    fn test_move_task_is_idempotent() {
        let current = resident(team(
            "t1",
            vec![project(
                "p1",
                vec![kanban("k1", vec![task("x")]), kanban("k2", vec![task("z")])],
            )],
        ));
        let action = TeamAction::MoveTask {
            project_id: "p1".into(),
            kanban_id_from: "k1".into(),
            kanban_id_to: "k2".into(),
            task: task("x"),
        };

        let once = changed(reduce(Some(&current), action.clone()));
        assert!(matches!(
            reduce(Some(&once), action),
            Reduction::Unchanged
        ));
        let p1 = once.project("p1").unwrap();
        assert_eq!(task_ids(p1.kanban("k2").unwrap()), vec!["z", "x"]);
    }

    #[test]
    fn test_move_task_replaces_stale_copy() {
        let mut canonical = task("x");
        canonical.description = "from server".to_string();

        // The destination already holds a stale copy, e.g. from a pushed update.
        let current = resident(team(
            "t1",
            vec![project(
                "p1",
                vec![kanban("k1", vec![task("x")]), kanban("k2", vec![task("x")])],
            )],
        ));

        let next = changed(reduce(
            Some(&current),
            TeamAction::MoveTask {
                project_id: "p1".into(),
                kanban_id_from: "k1".into(),
                kanban_id_to: "k2".into(),
                task: canonical,
            },
        ));

        let p1 = next.project("p1").unwrap();
        assert!(!p1.kanban("k1").unwrap().contains_task("x"));
        let k2 = p1.kanban("k2").unwrap();
        assert_eq!(task_ids(k2), vec!["x"]);
        assert_eq!(k2.tasks[0].description, "from server");
    }

    #[test]
    fn test_accept_invite_moves_user() {
        let mut base = team("t1", vec![]);
        base.users.clear();
        base.invite_requests = vec![user("u1"), user("u2")];
        let current = resident(base);

        let next = changed(reduce(
            Some(&current),
            TeamAction::AcceptInvite {
                user_id: "u1".into(),
            },
        ));

        let pending: Vec<_> = next.invite_requests.iter().map(|u| u.id.as_str()).collect();
        let members: Vec<_> = next.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(pending, vec!["u2"]);
        assert_eq!(members, vec!["u1"]);

        assert!(matches!(
            reduce(
                Some(&next),
                TeamAction::AcceptInvite {
                    user_id: "u1".into()
                }
            ),
            Reduction::Unchanged
        ));
    }

    #[test]
    fn test_accept_invite_for_existing_member_does_not_duplicate() {
        // Inconsistent input: u1 both pending and member.
        let mut base = team("t1", vec![]);
        base.users = vec![user("u1")];
        base.invite_requests = vec![user("u1")];
        let current = resident(base);

        let next = changed(reduce(
            Some(&current),
            TeamAction::AcceptInvite {
                user_id: "u1".into(),
            },
        ));
        assert!(next.invite_requests.is_empty());
        assert_eq!(next.users.len(), 1);
    }

    #[test]
    fn test_invite_requests_have_set_semantics() {
        let current = resident(team("t1", vec![]));

        let next = changed(reduce(
            Some(&current),
            TeamAction::AddInviteRequest(user("u1")),
        ));
        assert!(matches!(
            reduce(Some(&next), TeamAction::AddInviteRequest(user("u1"))),
            Reduction::Unchanged
        ));
        // Members cannot be pending.
        assert!(matches!(
            reduce(Some(&next), TeamAction::AddInviteRequest(user("author"))),
            Reduction::Unchanged
        ));

        let removed = changed(reduce(
            Some(&next),
            TeamAction::RemoveInviteRequest {
                user_id: "u1".into(),
            },
        ));
        assert!(removed.invite_requests.is_empty());
        assert!(!removed.is_member("u1"));
    }

    #[test]
    fn test_remove_project() {
        let current = resident(team(
            "t1",
            vec![project("p1", vec![]), project("p2", vec![])],
        ));
        let next = changed(reduce(
            Some(&current),
            TeamAction::RemoveProject {
                project_id: "p1".into(),
            },
        ));
        assert_eq!(next.projects.len(), 1);
        assert_eq!(next.projects[0].id, "p2");
    }
}
