//! Backlog change notifications.
//!
//! # Responsibility
//! - Let presentation layers observe backlog mutations instead of mirroring
//!   the task list into their own state.
//!
//! # Invariants
//! - Subscribers run synchronously, in registration order.
//! - Behind `SharedBingoManager`, subscribers run after the manager lock is
//!   released, so they may read the backlog again.
//! - Events are published only for mutations that changed state.
//! - Subscription ids are never reused within one notifier.

use crate::model::task::TaskId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Backlog mutation published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklogEvent {
    TaskAdded(TaskId),
    TaskRemoved(TaskId),
    TaskCompleted(TaskId),
    /// At least one task went back to pending during a bulk reset.
    CompletionReset,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Arc<dyn Fn(&BacklogEvent) + Send + Sync>;

/// Ordered subscriber registry.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, subscriber);
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn publish(&self, event: BacklogEvent) {
        dispatch(&self.subscribers(), &[event]);
    }

    /// Current subscribers in registration order.
    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.values().cloned().collect()
    }
}

/// Delivers `events` in order, each to every subscriber in order.
pub fn dispatch(subscribers: &[Subscriber], events: &[BacklogEvent]) {
    for event in events {
        for subscriber in subscribers {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{BacklogEvent, ChangeNotifier};
    use std::sync::{Arc, Mutex};

    #[test]
    fn publishes_in_registration_order_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        let first_log = Arc::clone(&seen);
        let first = notifier.subscribe(Arc::new(move |event: &BacklogEvent| {
            first_log.lock().expect("lock").push(("first", *event));
        }));
        let second_log = Arc::clone(&seen);
        notifier.subscribe(Arc::new(move |event: &BacklogEvent| {
            second_log.lock().expect("lock").push(("second", *event));
        }));

        notifier.publish(BacklogEvent::TaskAdded(1));
        assert!(notifier.unsubscribe(first));
        assert!(!notifier.unsubscribe(first));
        notifier.publish(BacklogEvent::CompletionReset);

        assert_eq!(
            *seen.lock().expect("lock"),
            vec![
                ("first", BacklogEvent::TaskAdded(1)),
                ("second", BacklogEvent::TaskAdded(1)),
                ("second", BacklogEvent::CompletionReset),
            ]
        );
    }
}
