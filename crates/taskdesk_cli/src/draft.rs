//! Raw user input to candidate task conversion.
//!
//! # Responsibility
//! - Turn free-text form fields into a `Task` without rejecting the edit.
//!
//! # Invariants
//! - Non-numeric priority text falls back to the caller-provided default.
//! - Unparseable deadline text is kept verbatim as `Deadline::Raw`.
//! - Empty status falls back to `DEFAULT_STATUS`.

use taskdesk_core::{Deadline, Task, DEFAULT_STATUS};

/// Form fields exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub deadline: String,
    pub status: String,
    pub priority: String,
}

impl TaskDraft {
    /// Pre-fills a draft from a stored task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category.clone(),
            deadline: task.deadline.to_string(),
            status: task.status.clone(),
            priority: task.priority.to_string(),
        }
    }

    /// Builds a new task (fresh id).
    pub fn to_new_task(&self, default_priority: i64) -> Task {
        Task::new(
            self.title.clone(),
            self.description.clone(),
            self.category.clone(),
            self.parse_deadline(),
        )
        .with_status(self.parse_status())
        .with_priority(self.parse_priority(default_priority))
    }

    /// Writes the draft onto an existing task, keeping its id.
    pub fn apply_to(&self, task: &mut Task, default_priority: i64) {
        task.title = self.title.clone();
        task.description = self.description.clone();
        task.category = self.category.clone();
        task.deadline = self.parse_deadline();
        task.status = self.parse_status();
        task.priority = self.parse_priority(default_priority);
    }

    fn parse_deadline(&self) -> Deadline {
        Deadline::from_text(self.deadline.trim())
    }

    fn parse_status(&self) -> String {
        let status = self.status.trim();
        if status.is_empty() {
            DEFAULT_STATUS.to_string()
        } else {
            status.to_string()
        }
    }

    fn parse_priority(&self, default_priority: i64) -> i64 {
        let text = self.priority.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return default_priority;
        }
        text.parse().unwrap_or(default_priority)
    }
}
