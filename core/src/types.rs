//! Domain DTOs for the tasks API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Ids are opaque
//! strings assigned by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest message a task may carry, in characters.
pub const MAX_MESSAGE_LEN: usize = 50;

/// Cut `message` down to `MAX_MESSAGE_LEN` characters.
pub fn clamp_message(message: &str) -> String {
    message.chars().take(MAX_MESSAGE_LEN).collect()
}

/// Backend-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single to-do item as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub message: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// Request payload for creating a task. The backend fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub message: String,
}

/// Partial update for one task. Only the fields present in the JSON are
/// applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl TaskPatch {
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            message: None,
            completed: None,
            favorite: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }
}

impl From<&Task> for TaskPatch {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            message: Some(task.message.clone()),
            completed: Some(task.completed),
            favorite: Some(task.favorite),
        }
    }
}

/// `{ "data": ... }` wrapper used by every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
