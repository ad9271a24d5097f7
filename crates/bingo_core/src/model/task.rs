//! Task domain record.
//!
//! # Responsibility
//! - Define the atomic unit every container and the backlog operate on.
//! - Own the two-state completion lifecycle (`pending` <-> `completed`).
//!
//! # Invariants
//! - `id` and `text` never change after construction.
//! - `complete()` and `reset()` are idempotent.
//! - `due_date` is Unix epoch milliseconds when set.
//! - Deserialized tasks must carry non-blank text.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Backlog-scoped task identifier.
///
/// Assigned monotonically by `BingoManager`, starting at 1.
pub type TaskId = u32;

/// Completion state projected from `Task::is_completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Completed,
}

/// Validation errors for task records read from external data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankText { id: TaskId },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText { id } => write!(f, "task {id} has blank text"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    text: String,
    /// Serialized as `is_completed` to match the UI schema.
    pub is_completed: bool,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
}

/// Unvalidated wire shape of `Task`.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    text: String,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    due_date: Option<i64>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        if record.text.trim().is_empty() {
            return Err(TaskValidationError::BlankText { id: record.id });
        }
        Ok(Self {
            id: record.id,
            text: record.text,
            is_completed: record.is_completed,
            due_date: record.due_date,
        })
    }
}

impl Task {
    /// Creates a pending task without a due date.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_completed: false,
            due_date: None,
        }
    }

    /// Creates a pending task with an optional due date.
    pub fn with_due_date(id: TaskId, text: impl Into<String>, due_date: Option<i64>) -> Self {
        Self {
            due_date,
            ..Self::new(id, text)
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> TaskState {
        if self.is_completed {
            TaskState::Completed
        } else {
            TaskState::Pending
        }
    }

    /// Marks the task completed.
    ///
    /// Returns `true` when the state actually changed.
    pub fn complete(&mut self) -> bool {
        let changed = !self.is_completed;
        self.is_completed = true;
        changed
    }

    /// Marks the task pending.
    ///
    /// Returns `true` when the state actually changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.is_completed;
        self.is_completed = false;
        changed
    }

    /// Returns whether the due date falls within `threshold_ms` of `now_ms`.
    ///
    /// Overdue tasks count as due soon. Tasks without a due date never match.
    pub fn is_due_within(&self, now_ms: i64, threshold_ms: i64) -> bool {
        self.due_date
            .is_some_and(|due| due.saturating_sub(now_ms) <= threshold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskState};

    #[test]
    fn complete_and_reset_report_changes() {
        let mut task = Task::new(1, "walk dog");
        assert_eq!(task.state(), TaskState::Pending);

        assert!(task.complete());
        assert!(!task.complete());
        assert_eq!(task.state(), TaskState::Completed);

        assert!(task.reset());
        assert!(!task.reset());
        assert_eq!(task.state(), TaskState::Pending);
    }

    #[test]
    fn overdue_task_counts_as_due_soon() {
        let task = Task::with_due_date(1, "pay rent", Some(1_000));
        assert!(task.is_due_within(5_000, 0));
        assert!(!Task::new(2, "no deadline").is_due_within(5_000, i64::MAX));
    }
}
