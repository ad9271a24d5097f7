//! Completable task containers.
//!
//! # Responsibility
//! - Provide the uniform `complete`/`reset` capability over one or many tasks.
//! - Unify the single, multi-subtask and grid shapes under `TaskContainer`.
//!
//! # Invariants
//! - `AdvancedTask` keeps insertion order and permits duplicate ids.
//! - Snapshots returned to callers are copies; mutating them never touches
//!   container state.

use crate::model::grid::BingoTask;
use crate::model::task::{Task, TaskId};

/// Shared capability of every task container.
pub trait Completable {
    /// Marks every contained task completed.
    fn complete(&mut self);
    /// Marks every contained task pending.
    fn reset(&mut self);
    /// Contained tasks in presentation order.
    fn tasks(&self) -> Vec<&Task>;

    fn is_completed(&self) -> bool {
        self.tasks().iter().all(|task| task.is_completed)
    }
}

/// Container wrapping exactly one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTask {
    task: Task,
}

impl SimpleTask {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Human-readable one-line summary, e.g. `3: Walk dog [✓]`.
    pub fn describe(&self) -> String {
        let marker = if self.task.is_completed { "✓" } else { " " };
        format!("{}: {} [{marker}]", self.task.id(), self.task.text())
    }
}

impl Completable for SimpleTask {
    fn complete(&mut self) {
        self.task.complete();
    }

    fn reset(&mut self) {
        self.task.reset();
    }

    fn tasks(&self) -> Vec<&Task> {
        vec![&self.task]
    }
}

/// Container wrapping an ordered list of subtasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedTask {
    tasks: Vec<Task>,
}

impl AdvancedTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a subtask. Duplicate ids are not rejected.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes every subtask with `id`; returns how many were removed.
    pub fn remove_task(&mut self, id: TaskId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        before - self.tasks.len()
    }

    /// Returns a snapshot copy of current subtasks.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Completable for AdvancedTask {
    fn complete(&mut self) {
        for task in &mut self.tasks {
            task.complete();
        }
    }

    fn reset(&mut self) {
        for task in &mut self.tasks {
            task.reset();
        }
    }

    fn tasks(&self) -> Vec<&Task> {
        self.tasks.iter().collect()
    }
}

impl Completable for BingoTask {
    fn complete(&mut self) {
        self.complete_grid();
    }

    fn reset(&mut self) {
        self.reset_grid();
    }

    fn tasks(&self) -> Vec<&Task> {
        self.iter().collect()
    }
}

/// Tagged union over every container shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskContainer {
    Simple(SimpleTask),
    Advanced(AdvancedTask),
    Bingo(BingoTask),
}

impl TaskContainer {
    /// Stable kind label (`simple|advanced|bingo`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::Advanced(_) => "advanced",
            Self::Bingo(_) => "bingo",
        }
    }

    fn as_completable(&self) -> &dyn Completable {
        match self {
            Self::Simple(inner) => inner,
            Self::Advanced(inner) => inner,
            Self::Bingo(inner) => inner,
        }
    }

    fn as_completable_mut(&mut self) -> &mut dyn Completable {
        match self {
            Self::Simple(inner) => inner,
            Self::Advanced(inner) => inner,
            Self::Bingo(inner) => inner,
        }
    }
}

impl Completable for TaskContainer {
    fn complete(&mut self) {
        self.as_completable_mut().complete();
    }

    fn reset(&mut self) {
        self.as_completable_mut().reset();
    }

    fn tasks(&self) -> Vec<&Task> {
        self.as_completable().tasks()
    }
}

impl From<SimpleTask> for TaskContainer {
    fn from(value: SimpleTask) -> Self {
        Self::Simple(value)
    }
}

impl From<AdvancedTask> for TaskContainer {
    fn from(value: AdvancedTask) -> Self {
        Self::Advanced(value)
    }
}

impl From<BingoTask> for TaskContainer {
    fn from(value: BingoTask) -> Self {
        Self::Bingo(value)
    }
}
