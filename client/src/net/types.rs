//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON (`_id`, `createdBy`, `securityCode`)
//! through serde renames so the Rust side keeps snake_case. Response envelopes
//! default missing optional fields instead of failing, since the backend only
//! guarantees the keys the UI actually reads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITIES
// =============================================================================

/// The authenticated user's session record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Stored avatar reference. Only its presence matters to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

impl User {
    /// Whether the backend holds uploaded avatar bytes for this user.
    pub fn has_avatar(&self) -> bool {
        self.avatar
            .as_ref()
            .and_then(|a| a.data.as_ref())
            .is_some_and(|data| !data.is_null())
    }
}

/// Avatar reference as embedded in the user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A todo item as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub task: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl Todo {
    /// Full-replace body that keeps every field except the flipped status.
    pub fn toggled(&self) -> TodoUpdate {
        TodoUpdate {
            task: self.task.clone(),
            description: self.description.clone(),
            status: !self.status,
            deadline: self.deadline.clone(),
        }
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    #[serde(rename = "securityCode")]
    pub security_code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Body for `POST /todo/create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub task: String,
    pub description: String,
    pub deadline: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// Body for `PUT /todo/:id`; replaces all four mutable fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub task: String,
    pub description: String,
    pub status: bool,
    pub deadline: Option<String>,
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerifyCodeResponse {
    #[serde(default)]
    pub message: String,
    pub user: UserRef,
}

/// Minimal user reference carrying only the identifier.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `GET /verify-user` payload. A missing flag reads as an invalid session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyUserResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TodoListResponse {
    #[serde(default)]
    pub todos: Vec<Todo>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TodoCreatedResponse {
    #[serde(default)]
    pub message: String,
    pub result: Todo,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TodoUpdatedResponse {
    #[serde(default)]
    pub message: String,
    pub todo: Todo,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
}
