//! Error types for the tasks API client.
//!
//! # Design
//! Each REST operation has its own status variant so a log line says which
//! call the backend refused. Network-level failures land in `Transport` and
//! are indistinguishable from a refused call once they reach the controller,
//! which only logs them.

use thiserror::Error;

/// Errors returned by `TaskClient` parse methods and `TasksApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `GET /tasks` answered with something other than 200.
    #[error("tasks were not loaded (HTTP {status}): {body}")]
    Fetch { status: u16, body: String },

    /// `POST /tasks` answered with something other than 200.
    #[error("task was not created (HTTP {status}): {body}")]
    Create { status: u16, body: String },

    /// `PUT /tasks` answered with something other than 200.
    #[error("task was not updated (HTTP {status}): {body}")]
    Update { status: u16, body: String },

    /// `DELETE /tasks/{id}` answered with something other than 204.
    #[error("task was not removed (HTTP {status}): {body}")]
    Delete { status: u16, body: String },

    /// The request never produced a response (DNS, refused connection, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by a refused call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch { status, .. }
            | ApiError::Create { status, .. }
            | ApiError::Update { status, .. }
            | ApiError::Delete { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while reading process-wide configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
