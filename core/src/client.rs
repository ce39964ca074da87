//! Stateless HTTP request builder and response parser for the tasks API.
//!
//! # Design
//! `TaskClient` holds only the collection URL and the authorization token.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is left to a `Transport`.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Envelope, NewTask, Task, TaskId, TaskPatch};

/// Characters escaped when an id becomes a single path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the tasks collection endpoint.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
    token: String,
}

impl TaskClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, &config.token)
    }

    fn collection(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![("authorization".to_string(), self.token.clone())]
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.auth_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        headers
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection(),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn build_create_task(&self, message: &str) -> Result<HttpRequest, ApiError> {
        let input = NewTask {
            message: message.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection(),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    /// The backend takes a batch; a single update is a one-element batch.
    pub fn build_update_task(&self, patch: &TaskPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&[patch]).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.collection(),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn build_remove_task(&self, id: &TaskId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!(
                "{}/{}",
                self.collection(),
                utf8_percent_encode(id.as_str(), SEGMENT_ENCODE_SET)
            ),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        if response.status != 200 {
            return Err(ApiError::Fetch {
                status: response.status,
                body: response.body,
            });
        }
        parse_data(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        if response.status != 200 {
            return Err(ApiError::Create {
                status: response.status,
                body: response.body,
            });
        }
        parse_data(&response.body)
    }

    /// Returns the first task of the echoed batch.
    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        if response.status != 200 {
            return Err(ApiError::Update {
                status: response.status,
                body: response.body,
            });
        }
        let tasks: Vec<Task> = parse_data(&response.body)?;
        tasks
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Deserialization("update returned an empty batch".to_string()))
    }

    pub fn parse_remove_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status != 204 {
            return Err(ApiError::Delete {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }
}

/// Unwrap the `{ "data": ... }` envelope.
fn parse_data<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}
