//! The five REST operations against the tasks collection, executed over a
//! `Transport`.
//!
//! # Design
//! `TasksApi` pairs a `TaskClient` with a transport and runs
//! build -> execute -> parse for each call. No retries, no backoff.
//! `complete_all_tasks` is fire-and-forget: it fans out one update per task,
//! waits for every call to return, and only logs failures.

use std::thread;

use tracing::{debug, warn};

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Task, TaskId, TaskPatch};

#[derive(Debug, Clone)]
pub struct TasksApi<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> TasksApi<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let request = self.client.build_list_tasks();
        let response = self.transport.execute(&request)?;
        self.client.parse_list_tasks(response)
    }

    pub fn create_task(&self, message: &str) -> Result<Task, ApiError> {
        let request = self.client.build_create_task(message)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_create_task(response)
    }

    pub fn update_task(&self, patch: &TaskPatch) -> Result<Task, ApiError> {
        let request = self.client.build_update_task(patch)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_update_task(response)
    }

    /// Mark every given task completed on the server, one request each.
    ///
    /// Requests run concurrently with no ordering among them. Outcomes are
    /// discarded: a refused or failed sub-call is logged and nothing more.
    pub fn complete_all_tasks(&self, tasks: &[Task]) {
        debug!(count = tasks.len(), "completing tasks");
        thread::scope(|scope| {
            let handles: Vec<_> = tasks
                .iter()
                .map(|task| {
                    let patch = TaskPatch::from(task).completed(true);
                    scope.spawn(move || (patch.id.clone(), self.update_task(&patch)))
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok((_, Ok(_))) => {}
                    Ok((id, Err(error))) => warn!(%id, %error, "complete-all sub-call failed"),
                    Err(_) => warn!("complete-all sub-call panicked"),
                }
            }
        });
    }

    pub fn remove_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let request = self.client.build_remove_task(id);
        let response = self.transport.execute(&request)?;
        self.client.parse_remove_task(response)
    }
}
