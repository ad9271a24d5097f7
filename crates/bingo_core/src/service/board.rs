//! Ordered board of task containers.
//!
//! # Responsibility
//! - Keep the list of simple, advanced and bingo containers a user sees.
//! - Give each entry a stable id independent of its position.
//!
//! # Invariants
//! - Entries keep insertion order.
//! - An advanced entry whose last subtask is removed leaves the board.

use crate::model::container::TaskContainer;
use crate::model::grid::GridError;
use crate::model::task::TaskId;
use crate::service::bingo_manager::BingoManager;
use log::info;
use rand::Rng;
use uuid::Uuid;

/// Stable identifier of one board entry.
pub type BoardEntryId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub id: BoardEntryId,
    pub container: TaskContainer,
}

/// Outcome of removing a subtask from an advanced entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtaskRemoval {
    /// Entry missing or not an advanced container.
    NotFound,
    /// Subtasks removed; entry still has tasks left.
    Removed(usize),
    /// Last subtask removed; entry dropped from the board.
    EntryDropped,
}

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    entries: Vec<BoardEntry>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a container and returns its entry id.
    pub fn push(&mut self, container: impl Into<TaskContainer>) -> BoardEntryId {
        let container = container.into();
        let id = Uuid::new_v4();
        info!(
            "event=board_push module=board status=ok kind={} entry={id}",
            container.kind()
        );
        self.entries.push(BoardEntry { id, container });
        id
    }

    /// Generates a grid from `manager` and appends it.
    pub fn add_bingo<R: Rng + ?Sized>(
        &mut self,
        manager: &BingoManager,
        rng: &mut R,
    ) -> Result<BoardEntryId, GridError> {
        let grid = manager.generate_bingo_grid_with_rng(rng)?;
        Ok(self.push(grid))
    }

    pub fn remove(&mut self, id: BoardEntryId) -> Option<TaskContainer> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).container)
    }

    pub fn get(&self, id: BoardEntryId) -> Option<&TaskContainer> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.container)
    }

    pub fn get_mut(&mut self, id: BoardEntryId) -> Option<&mut TaskContainer> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.container)
    }

    /// Removes subtask `task_id` from an advanced entry.
    pub fn remove_task_from_advanced(
        &mut self,
        id: BoardEntryId,
        task_id: TaskId,
    ) -> SubtaskRemoval {
        let Some(TaskContainer::Advanced(advanced)) = self.get_mut(id) else {
            return SubtaskRemoval::NotFound;
        };

        let removed = advanced.remove_task(task_id);
        if advanced.is_empty() {
            self.remove(id);
            return SubtaskRemoval::EntryDropped;
        }
        SubtaskRemoval::Removed(removed)
    }

    pub fn entries(&self) -> &[BoardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
