//! Thread-safe handle over one `BingoManager`.
//!
//! # Responsibility
//! - Serialize backlog access from multiple call sites (UI thread, timers).
//!
//! # Invariants
//! - The single manager lock is held for the whole closure passed to `with`.
//! - A poisoned lock is recovered; backlog operations cannot leave the
//!   manager half-mutated.
//! - Change subscribers run after the lock is released, so they may call
//!   `with` again.

use crate::config::BingoConfig;
use crate::service::bingo_manager::BingoManager;
use crate::service::events::dispatch;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, lock-protected manager handle.
#[derive(Debug, Clone)]
pub struct SharedBingoManager {
    inner: Arc<Mutex<BingoManager>>,
}

impl SharedBingoManager {
    pub fn new(mut manager: BingoManager) -> Self {
        manager.defer_events();
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn with_config(config: BingoConfig) -> Self {
        Self::new(BingoManager::with_config(config))
    }

    /// Runs `f` with exclusive access to the manager, then notifies
    /// subscribers of the changes `f` made.
    pub fn with<T>(&self, f: impl FnOnce(&mut BingoManager) -> T) -> T {
        let (result, events, subscribers) = {
            let mut guard = self.lock();
            let result = f(&mut guard);
            let (events, subscribers) = guard.take_pending_events();
            (result, events, subscribers)
        };
        dispatch(&subscribers, &events);
        result
    }

    fn lock(&self) -> MutexGuard<'_, BingoManager> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SharedBingoManager {
    fn default() -> Self {
        Self::new(BingoManager::default())
    }
}

#[cfg(test)]
mod tests {
    use super::SharedBingoManager;
    use crate::service::events::BacklogEvent;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn subscriber_can_read_backlog_through_handle() {
        let shared = SharedBingoManager::default();
        let observed = Arc::new(Mutex::new(Vec::new()));

        let reader = shared.clone();
        let sink = Arc::clone(&observed);
        shared.with(|manager| {
            manager.subscribe(move |event| {
                let len = reader.with(|manager| manager.len());
                sink.lock().expect("lock").push((*event, len));
            })
        });

        let (done_tx, done_rx) = mpsc::channel();
        let writer = shared.clone();
        thread::spawn(move || {
            writer.with(|manager| manager.add_task("wash car", None));
            writer.with(|manager| manager.remove_task(1));
            let _ = done_tx.send(());
        });
        done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("writer should finish without blocking on the subscriber");

        assert_eq!(
            *observed.lock().expect("lock"),
            vec![
                (BacklogEvent::TaskAdded(1), 1),
                (BacklogEvent::TaskRemoved(1), 0),
            ]
        );
    }

    #[test]
    fn concurrent_adds_get_unique_ids() {
        let shared = SharedBingoManager::default();
        let handles = (0..8)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for index in 0..25 {
                        shared.with(|manager| {
                            manager.add_task(&format!("worker {worker} task {index}"), None)
                        });
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().expect("worker should not panic");
        }

        let mut ids = shared.with(|manager| {
            manager
                .all_tasks()
                .iter()
                .map(|task| task.id())
                .collect::<Vec<_>>()
        });
        ids.sort_unstable();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }
}
