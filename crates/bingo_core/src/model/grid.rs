//! Bingo grid container and sizing rules.
//!
//! # Responsibility
//! - Lay out a flat task sequence as an N x N matrix (row-major).
//! - Provide per-cell completion and bulk reset.
//! - Decide grid size from backlog size (`GridSizePolicy`).
//!
//! # Invariants
//! - A grid of size `N` always holds exactly `N * N` tasks.
//! - Flat element `i` lives at row `i / N`, column `i % N`.
//! - Cell access outside `[0, N)` is an error, never a panic.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest edge length produced by adaptive sizing.
pub const ADAPTIVE_MIN_SIZE: usize = 2;
/// Largest edge length produced by adaptive sizing.
pub const ADAPTIVE_MAX_SIZE: usize = 5;
/// Edge length used by the fixed policy.
pub const FIXED_SIZE: usize = 3;

/// Grid construction and access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Backlog holds fewer tasks than the sizing policy needs.
    InsufficientTasks { required: usize, available: usize },
    /// Cell coordinate outside the grid.
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Flat task sequence length is not `size * size`.
    SizeMismatch { size: usize, task_count: usize },
    /// Grid size of zero.
    InvalidSize(usize),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientTasks {
                required,
                available,
            } => write!(
                f,
                "not enough tasks for a bingo grid: need at least {required}, have {available}"
            ),
            Self::OutOfBounds { row, col, size } => write!(
                f,
                "cell ({row}, {col}) is outside the {size}x{size} grid"
            ),
            Self::SizeMismatch { size, task_count } => match size.checked_mul(*size) {
                Some(cells) => write!(
                    f,
                    "a {size}x{size} grid needs {cells} tasks, got {task_count}"
                ),
                None => write!(
                    f,
                    "a {size}x{size} grid is too large to fill, got {task_count} tasks"
                ),
            },
            Self::InvalidSize(size) => write!(f, "grid size must be positive, got {size}"),
        }
    }
}

impl Error for GridError {}

/// Grid sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSizePolicy {
    /// Always 3x3; needs at least 9 tasks.
    #[serde(rename = "fixed3x3")]
    Fixed3x3,
    /// `clamp(floor(sqrt(count)), 2, 5)`; needs at least 4 tasks.
    #[default]
    Adaptive,
}

impl GridSizePolicy {
    /// Stable string id used by config and FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed3x3 => "fixed3x3",
            Self::Adaptive => "adaptive",
        }
    }

    /// Minimum backlog size this policy accepts.
    pub fn min_tasks(self) -> usize {
        match self {
            Self::Fixed3x3 => FIXED_SIZE * FIXED_SIZE,
            Self::Adaptive => ADAPTIVE_MIN_SIZE * ADAPTIVE_MIN_SIZE,
        }
    }

    /// Returns the grid edge length for a backlog of `task_count` tasks.
    ///
    /// # Errors
    /// - `GridError::InsufficientTasks` when `task_count < min_tasks()`.
    pub fn grid_size(self, task_count: usize) -> Result<usize, GridError> {
        let required = self.min_tasks();
        if task_count < required {
            return Err(GridError::InsufficientTasks {
                required,
                available: task_count,
            });
        }

        Ok(match self {
            Self::Fixed3x3 => FIXED_SIZE,
            Self::Adaptive => integer_sqrt(task_count).clamp(ADAPTIVE_MIN_SIZE, ADAPTIVE_MAX_SIZE),
        })
    }
}

// Floor square root without float rounding surprises near perfect squares.
fn integer_sqrt(value: usize) -> usize {
    let square_fits = |root: usize| root.checked_mul(root).is_some_and(|sq| sq <= value);
    let mut root = (value as f64).sqrt() as usize;
    while !square_fits(root) {
        root -= 1;
    }
    while square_fits(root + 1) {
        root += 1;
    }
    root
}

/// Square bingo card over sampled tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoTask {
    size: usize,
    cells: Vec<Vec<Task>>,
}

impl BingoTask {
    /// Builds a grid from a flat row-major sequence of exactly `size * size` tasks.
    pub fn new(size: usize, tasks: Vec<Task>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize(size));
        }
        if size.checked_mul(size) != Some(tasks.len()) {
            return Err(GridError::SizeMismatch {
                size,
                task_count: tasks.len(),
            });
        }

        let mut cells: Vec<Vec<Task>> = Vec::with_capacity(size);
        let mut remaining = tasks.into_iter();
        for _ in 0..size {
            cells.push(remaining.by_ref().take(size).collect());
        }

        Ok(Self { size, cells })
    }

    /// Grid edge length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> &[Vec<Task>] {
        &self.cells
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.cells.iter().flatten()
    }

    pub fn task_at(&self, row: usize, col: usize) -> Result<&Task, GridError> {
        self.check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    /// Completes the cell at `(row, col)`.
    ///
    /// Returns `true` when the cell changed state.
    pub fn complete_task_at(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[row][col].complete())
    }

    /// Flips the cell at `(row, col)` between pending and completed.
    ///
    /// Returns the new completion state.
    pub fn toggle_task_at(&mut self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check_bounds(row, col)?;
        let task = &mut self.cells[row][col];
        if task.is_completed {
            task.reset();
        } else {
            task.complete();
        }
        Ok(task.is_completed)
    }

    /// Completes every cell.
    pub fn complete_grid(&mut self) {
        for task in self.cells.iter_mut().flatten() {
            task.complete();
        }
    }

    /// Resets every cell to pending.
    pub fn reset_grid(&mut self) {
        for task in self.cells.iter_mut().flatten() {
            task.reset();
        }
    }

    pub fn completed_count(&self) -> usize {
        self.iter().filter(|task| task.is_completed).count()
    }

    pub fn is_fully_completed(&self) -> bool {
        self.iter().all(|task| task.is_completed)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl Display for BingoTask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|task| {
                    if task.is_completed {
                        format!("✓ {}", task.text())
                    } else {
                        task.text().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}
