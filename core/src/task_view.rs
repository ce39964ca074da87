//! Per-task view state and the intents it emits.
//!
//! A `TaskView` keeps a transient copy of its record plus an edit draft. It
//! never touches the collection: every user action becomes a `TaskIntent`
//! for `TaskList::dispatch`, or nothing at all.

use crate::types::{clamp_message, Task, TaskId, TaskPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    Update(TaskPatch),
    Remove(TaskId),
}

/// Keys the message input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub struct TaskView {
    task: Task,
    is_editing: bool,
    draft: String,
}

impl TaskView {
    pub fn new(task: &Task) -> Self {
        Self {
            task: task.clone(),
            is_editing: false,
            draft: task.message.clone(),
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Pick up the controller's latest copy of the record. An in-progress
    /// edit keeps its draft.
    pub fn refresh(&mut self, task: &Task) {
        self.task = task.clone();
        if !self.is_editing {
            self.draft = task.message.clone();
        }
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = clamp_message(text);
    }

    pub fn toggle_completed(&self) -> TaskIntent {
        let patch = TaskPatch::from(&self.task).completed(!self.task.completed);
        TaskIntent::Update(patch)
    }

    pub fn toggle_favorite(&self) -> TaskIntent {
        let patch = TaskPatch::from(&self.task).favorite(!self.task.favorite);
        TaskIntent::Update(patch)
    }

    pub fn remove(&self) -> TaskIntent {
        TaskIntent::Remove(self.task.id.clone())
    }

    /// The edit button: opens the editor, or commits when already open.
    pub fn click_edit(&mut self) -> Option<TaskIntent> {
        if self.is_editing {
            return self.commit();
        }
        self.is_editing = true;
        None
    }

    pub fn key_down(&mut self, key: Key) -> Option<TaskIntent> {
        match key {
            Key::Enter if self.draft.is_empty() => None,
            Key::Enter => self.commit(),
            Key::Escape => {
                self.cancel();
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.draft = self.task.message.clone();
        self.is_editing = false;
    }

    /// Leave edit mode; only a changed draft produces an update.
    fn commit(&mut self) -> Option<TaskIntent> {
        self.is_editing = false;
        if self.draft == self.task.message {
            return None;
        }
        let patch = TaskPatch::from(&self.task).message(self.draft.clone());
        Some(TaskIntent::Update(patch))
    }
}
