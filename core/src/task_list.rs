//! The task-list controller: sole owner of the in-memory collection.
//!
//! # Design
//! Every operation is a failure boundary. It raises the busy flag, calls the
//! API, folds a successful result into `tasks`, and lowers the flag whatever
//! happened. Failures are logged and leave state exactly as it was; there is
//! no rollback and no retry. Complete-all marks the whole collection
//! completed without waiting for confirmation from the server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::TasksApi;
use crate::task_view::TaskIntent;
use crate::transport::Transport;
use crate::types::{clamp_message, Task, TaskId, TaskPatch};

/// Shared read side of the busy flag. A renderer on another thread can poll
/// it while an operation blocks on the network.
#[derive(Debug, Clone, Default)]
pub struct BusyHandle(Arc<AtomicBool>);

impl BusyHandle {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, busy: bool) {
        self.0.store(busy, Ordering::Release);
    }
}

pub struct TaskList<T> {
    api: TasksApi<T>,
    tasks: Vec<Task>,
    busy: BusyHandle,
    filter: String,
    draft_message: String,
}

impl<T: Transport> TaskList<T> {
    pub fn new(api: TasksApi<T>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            busy: BusyHandle::default(),
            filter: String::new(),
            draft_message: String::new(),
        }
    }

    /// The canonical collection in storage order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn is_fetching(&self) -> bool {
        self.busy.is_busy()
    }

    /// Stays set for as long as a request is in flight; a hung request
    /// leaves it set.
    pub fn busy_handle(&self) -> BusyHandle {
        self.busy.clone()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn draft_message(&self) -> &str {
        &self.draft_message
    }

    pub fn set_draft_message(&mut self, message: &str) {
        self.draft_message = clamp_message(message);
    }

    /// Stored lower-cased; matching is case-insensitive.
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_lowercase();
    }

    /// True when nothing is left to complete, including the empty list.
    pub fn are_all_completed(&self) -> bool {
        self.tasks.iter().all(|task| task.completed)
    }

    /// Replace the collection with the server's list.
    pub fn load(&mut self) {
        self.busy.set(true);
        match self.api.list_tasks() {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
            }
            Err(error) => warn!(%error, "loading tasks failed"),
        }
        self.busy.set(false);
    }

    /// Create a task from the draft message. An empty draft does nothing.
    pub fn create(&mut self) {
        if self.draft_message.is_empty() {
            return;
        }
        self.busy.set(true);
        match self.api.create_task(&self.draft_message) {
            Ok(task) => {
                debug!(id = %task.id, "task created");
                self.tasks.insert(0, task);
                self.draft_message.clear();
            }
            Err(error) => warn!(%error, "creating task failed"),
        }
        self.busy.set(false);
    }

    /// Send `patch` and replace the matching record with the server's echo.
    pub fn update(&mut self, patch: TaskPatch) {
        self.busy.set(true);
        match self.api.update_task(&patch) {
            Ok(updated) => {
                debug!(id = %updated.id, "task updated");
                self.replace(updated);
            }
            Err(error) => warn!(id = %patch.id, %error, "updating task failed"),
        }
        self.busy.set(false);
    }

    pub fn remove(&mut self, id: &TaskId) {
        self.busy.set(true);
        match self.api.remove_task(id) {
            Ok(()) => {
                debug!(%id, "task removed");
                self.tasks.retain(|task| &task.id != id);
            }
            Err(error) => warn!(%id, %error, "removing task failed"),
        }
        self.busy.set(false);
    }

    /// Complete every incomplete task. No request is issued when everything
    /// is already completed. Sub-call failures are not visible here, so the
    /// whole collection ends up completed locally regardless.
    pub fn complete_all(&mut self) {
        if self.are_all_completed() {
            return;
        }
        self.busy.set(true);
        let pending: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| Task {
                completed: true,
                ..task.clone()
            })
            .collect();
        self.api.complete_all_tasks(&pending);
        for task in &mut self.tasks {
            task.completed = true;
        }
        self.busy.set(false);
    }

    pub fn dispatch(&mut self, intent: TaskIntent) {
        match intent {
            TaskIntent::Update(patch) => self.update(patch),
            TaskIntent::Remove(id) => self.remove(&id),
        }
    }

    /// Tasks matching the filter, incomplete before completed and, within
    /// each group, favorites first. Ties keep storage order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let mut visible: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| matches_filter(task, &self.filter))
            .collect();
        visible.sort_by_key(|task| (task.completed, !task.favorite));
        visible
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    }
}

fn matches_filter(task: &Task, filter: &str) -> bool {
    filter.is_empty() || task.message.to_lowercase().contains(filter)
}
