//! Task backlog and bingo grid generation.
//!
//! # Responsibility
//! - Own the flat task backlog and assign task ids.
//! - Sample backlog tasks into bingo grids.
//! - Answer due-soon queries against a caller-supplied clock.
//!
//! # Invariants
//! - Ids start at 1, increase monotonically and are never reused; once the
//!   id space is exhausted further adds are no-ops.
//! - Blank task text is a silent no-op.
//! - Grid generation never mutates the backlog; grids hold task copies.
//! - The manager never reads the wall clock.

use crate::config::BingoConfig;
use crate::model::grid::{BingoTask, GridError, GridSizePolicy};
use crate::model::task::{Task, TaskId};
use crate::service::events::{BacklogEvent, ChangeNotifier, Subscriber, SubscriptionId};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// In-memory task backlog with bingo grid generation.
#[derive(Debug)]
pub struct BingoManager {
    tasks: Vec<Task>,
    next_id: TaskId,
    config: BingoConfig,
    notifier: ChangeNotifier,
    /// Queue events for the owner to dispatch instead of publishing inline.
    defer_events: bool,
    pending_events: Vec<BacklogEvent>,
}

impl Default for BingoManager {
    fn default() -> Self {
        Self::with_config(BingoConfig::default())
    }
}

impl BingoManager {
    /// Creates an empty manager with default config (adaptive sizing).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BingoConfig) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            config,
            notifier: ChangeNotifier::new(),
            defer_events: false,
            pending_events: Vec::new(),
        }
    }

    pub fn config(&self) -> &BingoConfig {
        &self.config
    }

    pub fn grid_policy(&self) -> GridSizePolicy {
        self.config.grid_policy
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registers a backlog change subscriber.
    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&BacklogEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let shared: Subscriber = Arc::new(subscriber);
        self.notifier.subscribe(shared)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Adds a trimmed task to the backlog.
    ///
    /// Returns the assigned id, or `None` when `text` is blank (no-op).
    pub fn add_task(&mut self, text: &str, due_date: Option<i64>) -> Option<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=task_add module=backlog status=skipped reason=blank_text");
            return None;
        }

        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            warn!("event=task_add module=backlog status=skipped reason=id_space_exhausted");
            return None;
        };
        self.next_id = next_id;
        self.tasks.push(Task::with_due_date(id, trimmed, due_date));

        info!(
            "event=task_add module=backlog status=ok id={id} has_due_date={}",
            due_date.is_some()
        );
        self.emit(BacklogEvent::TaskAdded(id));
        Some(id)
    }

    /// Removes every task with `id`.
    ///
    /// Returns the number of removed tasks; zero is a no-op, not an error.
    pub fn remove_task(&mut self, id: TaskId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        let removed = before - self.tasks.len();

        if removed > 0 {
            info!("event=task_remove module=backlog status=ok id={id} removed={removed}");
            self.emit(BacklogEvent::TaskRemoved(id));
        } else {
            debug!("event=task_remove module=backlog status=skipped id={id} reason=not_found");
        }
        removed
    }

    /// Returns a snapshot copy of the backlog in insertion order.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Completes the first task with `id`.
    ///
    /// Returns `true` when a pending task became completed.
    pub fn complete_task(&mut self, id: TaskId) -> bool {
        let changed = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .is_some_and(Task::complete);

        if changed {
            info!("event=task_complete module=backlog status=ok id={id}");
            self.emit(BacklogEvent::TaskCompleted(id));
        }
        changed
    }

    /// Resets every backlog task to pending.
    ///
    /// Returns how many tasks changed state.
    pub fn reset_completion(&mut self) -> usize {
        let reset = self
            .tasks
            .iter_mut()
            .map(Task::reset)
            .filter(|changed| *changed)
            .count();

        info!("event=completion_reset module=backlog status=ok reset={reset}");
        if reset > 0 {
            self.emit(BacklogEvent::CompletionReset);
        }
        reset
    }

    /// Switches to queued notifications, drained by `take_pending_events`.
    pub(crate) fn defer_events(&mut self) {
        self.defer_events = true;
    }

    /// Drains queued events together with the subscribers to deliver them to.
    pub(crate) fn take_pending_events(&mut self) -> (Vec<BacklogEvent>, Vec<Subscriber>) {
        if self.pending_events.is_empty() {
            return (Vec::new(), Vec::new());
        }
        (
            std::mem::take(&mut self.pending_events),
            self.notifier.subscribers(),
        )
    }

    fn emit(&mut self, event: BacklogEvent) {
        if self.defer_events {
            self.pending_events.push(event);
        } else {
            self.notifier.publish(event);
        }
    }

    /// Generates a bingo grid using the thread-local RNG.
    pub fn generate_bingo_grid(&self) -> Result<BingoTask, GridError> {
        self.generate_bingo_grid_with_rng(&mut rand::thread_rng())
    }

    /// Generates a bingo grid by shuffling the backlog and taking the first
    /// `N * N` tasks, row-major.
    ///
    /// # Errors
    /// - `GridError::InsufficientTasks` when the backlog is smaller than the
    ///   policy minimum. The backlog is left untouched.
    pub fn generate_bingo_grid_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BingoTask, GridError> {
        let policy = self.config.grid_policy;
        let size = policy.grid_size(self.tasks.len()).map_err(|err| {
            warn!(
                "event=grid_generate module=backlog status=error policy={} available={}",
                policy.as_str(),
                self.tasks.len()
            );
            err
        })?;

        let mut selection = self.tasks.clone();
        selection.shuffle(rng);
        selection.truncate(size * size);

        let grid = BingoTask::new(size, selection)?;
        info!(
            "event=grid_generate module=backlog status=ok policy={} size={size} backlog={}",
            policy.as_str(),
            self.tasks.len()
        );
        Ok(grid)
    }

    /// Returns tasks due within the configured threshold of `now_ms`.
    pub fn tasks_due_soon(&self, now_ms: i64) -> Vec<Task> {
        self.tasks_due_within(now_ms, self.config.due_soon_threshold_ms)
    }

    /// Returns tasks whose `due_date - now_ms <= threshold_ms`, in backlog order.
    ///
    /// Overdue tasks are included; tasks without a due date are not.
    pub fn tasks_due_within(&self, now_ms: i64, threshold_ms: i64) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_due_within(now_ms, threshold_ms))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::BingoManager;
    use crate::service::events::BacklogEvent;

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut manager = BingoManager::new();
        let first = manager.add_task("one", None).expect("added");
        manager.remove_task(first);
        let second = manager.add_task("two", None).expect("added");
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn add_task_is_noop_once_ids_run_out() {
        let mut manager = BingoManager::new();
        manager.next_id = u32::MAX - 1;

        assert_eq!(manager.add_task("last", None), Some(u32::MAX - 1));
        assert_eq!(manager.add_task("overflow", None), None);
        assert_eq!(manager.add_task("overflow again", None), None);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn deferred_events_are_queued_until_taken() {
        let mut manager = BingoManager::new();
        manager.defer_events();
        let (events, subscribers) = manager.take_pending_events();
        assert!(events.is_empty() && subscribers.is_empty());

        manager.subscribe(|_| {});
        manager.add_task("a", None);
        manager.complete_task(1);

        let (events, subscribers) = manager.take_pending_events();
        assert_eq!(
            events,
            vec![BacklogEvent::TaskAdded(1), BacklogEvent::TaskCompleted(1)]
        );
        assert_eq!(subscribers.len(), 1);
        assert!(manager.take_pending_events().0.is_empty());
    }

    #[test]
    fn add_task_trims_text() {
        let mut manager = BingoManager::new();
        manager.add_task("  Wash car \n", Some(42));
        let tasks = manager.all_tasks();
        assert_eq!(tasks[0].text(), "Wash car");
        assert_eq!(tasks[0].due_date, Some(42));
    }
}
