//! User model as provided by the identity provider.

use serde::{Deserialize, Serialize};

/// A user known to the system. Never edited by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub picture: String,
}

/// Request body for registering or refreshing a user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    /// Subject id from the identity provider; generated when missing.
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub picture: String,
}
