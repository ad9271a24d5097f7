//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose backlog and bingo grid use-cases to Dart via FRB.
//! - Own the process-wide manager and the currently open grid.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All backlog access goes through one `SharedBingoManager` lock.
//! - The caller supplies wall-clock time; Rust never reads the clock here.

use bingo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BingoConfig, BingoTask, SharedBingoManager, Task,
};
use log::warn;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static MANAGER: Lazy<SharedBingoManager> = Lazy::new(|| {
    let config = BingoConfig::from_env().unwrap_or_else(|err| {
        warn!("event=config_load module=ffi status=fallback error={err}");
        BingoConfig::default()
    });
    SharedBingoManager::with_config(config)
});
static CURRENT_GRID: Lazy<Mutex<Option<BingoTask>>> = Lazy::new(|| Mutex::new(None));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: u32,
    pub text: String,
    pub is_completed: bool,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_string(),
            is_completed: task.is_completed,
            due_date: task.due_date,
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the call changed state.
    pub ok: bool,
    /// Affected task id, when known.
    pub task_id: Option<u32>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<u32>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn noop(message: impl Into<String>, task_id: Option<u32>) -> Self {
        Self {
            ok: false,
            task_id,
            message: message.into(),
        }
    }
}

/// Bingo grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoGridResponse {
    pub ok: bool,
    /// Grid edge length; zero when no grid is available.
    pub size: u32,
    /// Cells in row-major order.
    pub cells: Vec<TaskItem>,
    pub message: String,
}

impl BingoGridResponse {
    fn from_grid(grid: &BingoTask, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            size: grid.size() as u32,
            cells: grid.iter().map(TaskItem::from).collect(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            size: 0,
            cells: Vec::new(),
            message: message.into(),
        }
    }
}

/// Adds a task with optional due date.
///
/// # FFI contract
/// - Blank text is ignored and reported with `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String, due_date: Option<i64>) -> TaskActionResponse {
    match MANAGER.with(|manager| manager.add_task(&text, due_date)) {
        Some(id) => TaskActionResponse::success("Task added.", Some(id)),
        None => TaskActionResponse::noop("Task text is blank; nothing added.", None),
    }
}

/// Removes every task with `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(id: u32) -> TaskActionResponse {
    match MANAGER.with(|manager| manager.remove_task(id)) {
        0 => TaskActionResponse::noop("No task with that id.", Some(id)),
        _ => TaskActionResponse::success("Task removed.", Some(id)),
    }
}

/// Marks the task with `id` completed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_complete(id: u32) -> TaskActionResponse {
    if MANAGER.with(|manager| manager.complete_task(id)) {
        TaskActionResponse::success("Task completed.", Some(id))
    } else {
        TaskActionResponse::noop("Task missing or already completed.", Some(id))
    }
}

/// Resets completion of every backlog task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_reset_all() -> TaskActionResponse {
    let reset = MANAGER.with(|manager| manager.reset_completion());
    TaskActionResponse::success(format!("Reset {reset} task(s)."), None)
}

/// Lists backlog tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    MANAGER.with(|manager| manager.all_tasks().iter().map(TaskItem::from).collect())
}

/// Lists tasks due within `threshold_ms` of `now_ms` (configured default when `None`).
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_due_soon(now_ms: i64, threshold_ms: Option<i64>) -> Vec<TaskItem> {
    MANAGER.with(|manager| {
        let due = match threshold_ms {
            Some(threshold) => manager.tasks_due_within(now_ms, threshold),
            None => manager.tasks_due_soon(now_ms),
        };
        due.iter().map(TaskItem::from).collect()
    })
}

/// Generates a new bingo grid and makes it the current one.
///
/// # FFI contract
/// - On insufficient tasks the current grid is left unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn bingo_generate() -> BingoGridResponse {
    match MANAGER.with(|manager| manager.generate_bingo_grid()) {
        Ok(grid) => {
            let response = BingoGridResponse::from_grid(&grid, "Bingo grid generated.");
            *current_grid() = Some(grid);
            response
        }
        Err(err) => BingoGridResponse::failure(format!("bingo_generate failed: {err}")),
    }
}

/// Returns the current grid, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn bingo_current() -> BingoGridResponse {
    match current_grid().as_ref() {
        Some(grid) => BingoGridResponse::from_grid(grid, "Current bingo grid."),
        None => BingoGridResponse::failure("No bingo grid generated yet."),
    }
}

/// Completes one cell of the current grid.
#[flutter_rust_bridge::frb(sync)]
pub fn bingo_complete_cell(row: u32, col: u32) -> BingoGridResponse {
    let mut guard = current_grid();
    let Some(grid) = guard.as_mut() else {
        return BingoGridResponse::failure("No bingo grid generated yet.");
    };
    match grid.complete_task_at(row as usize, col as usize) {
        Ok(_) => {
            let message = if grid.is_fully_completed() {
                "Bingo! Every cell is complete."
            } else {
                "Cell completed."
            };
            BingoGridResponse::from_grid(grid, message)
        }
        Err(err) => BingoGridResponse::failure(format!("bingo_complete_cell failed: {err}")),
    }
}

/// Flips one cell of the current grid, undoing a mistaken tap.
#[flutter_rust_bridge::frb(sync)]
pub fn bingo_toggle_cell(row: u32, col: u32) -> BingoGridResponse {
    let mut guard = current_grid();
    let Some(grid) = guard.as_mut() else {
        return BingoGridResponse::failure("No bingo grid generated yet.");
    };
    match grid.toggle_task_at(row as usize, col as usize) {
        Ok(true) => BingoGridResponse::from_grid(grid, "Cell completed."),
        Ok(false) => BingoGridResponse::from_grid(grid, "Cell reopened."),
        Err(err) => BingoGridResponse::failure(format!("bingo_toggle_cell failed: {err}")),
    }
}

/// Resets every cell of the current grid.
#[flutter_rust_bridge::frb(sync)]
pub fn bingo_reset() -> BingoGridResponse {
    let mut guard = current_grid();
    let Some(grid) = guard.as_mut() else {
        return BingoGridResponse::failure("No bingo grid generated yet.");
    };
    grid.reset_grid();
    BingoGridResponse::from_grid(grid, "Bingo grid reset.")
}

fn current_grid() -> std::sync::MutexGuard<'static, Option<BingoTask>> {
    CURRENT_GRID
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
