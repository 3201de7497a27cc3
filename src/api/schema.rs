//! Schema type declarations of the server boundary.

/// SDL for the types the server exposes.
pub const SCHEMA_SDL: &str = r#"type User {
    id: String!
    email: String!
    nickname: String!
    picture: String!
}

type Comment {
    id: String!
    author: User!
    text: String!
}

type Task {
    id: String!
    name: String!
    author: User!
    description: String!
    tag: String!
}

type Kanban {
    id: String!
    name: String!
    tasks: [Task]
}

type Project {
    id: String!
    name: String!
    tasksCounter: Int!
    kanbans: [Kanban]
}

type Team {
    id: String!
    name: String!
    users: [User]
    projects: [Project]
    author: User!
    inviteLink: String!
    inviteRequests: [User]
}

type Mutation {
    moveTask(taskId: String!, teamId: String!, projectId: String!, kanbanIdFrom: String!, kanbanIdTo: String!): Task
    acceptTeamRequest(userId: String!, teamId: String!): Boolean
    rejectTeamRequest(userId: String!, teamId: String!): Boolean
}
"#;

/// GET /api/schema - Schema type declarations as SDL text.
pub async fn get_schema() -> &'static str {
    SCHEMA_SDL
}
