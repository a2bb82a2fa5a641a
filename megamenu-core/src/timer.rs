//! Cancellable deadlines.
//!
//! Nothing in here sleeps. Deadlines are stored against the host clock and
//! fire when [TimerQueue::take_due] is called with a time past them, the same
//! way the tooltip delays of a UI loop are polled once per frame.

use std::time::Duration;

/// Identifies what a deadline is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Hover-intent close of a collected node.
    HoverIntent {
        /// Index of the node in the current collection.
        node: usize,
        /// Collection pass the node belongs to.
        generation: u64,
    },
    /// Measure full-width dropdowns again once layout settled.
    LayoutSettle,
}

/// Handle returned when a deadline is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    key: TimerKey,
    due: Duration,
}

/// Deadline queue keyed by [TimerKey].
///
/// Scheduling a key that is already pending replaces the older deadline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire `delay` after `now`.
    pub fn schedule(&mut self, key: TimerKey, now: Duration, delay: Duration) -> TimerHandle {
        self.cancel_key(key);
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            key,
            due: now + delay,
        });
        handle
    }

    /// Cancel a deadline. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }

    /// Cancel whatever is pending for `key`.
    pub fn cancel_key(&mut self, key: TimerKey) {
        self.entries.retain(|e| e.key != key);
    }

    /// Drop every pending deadline.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `handle` is still pending.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of pending deadlines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return every key due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<TimerKey> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.due <= now {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.due, e.handle.0));
        due.into_iter().map(|e| e.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn hover(node: usize) -> TimerKey {
        TimerKey::HoverIntent { node, generation: 0 }
    }

    #[test]
    fn test_fires_only_after_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(hover(0), ms(0), ms(500));
        assert!(queue.take_due(ms(499)).is_empty());
        assert_eq!(queue.take_due(ms(500)), vec![hover(0)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rescheduling_replaces() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(hover(1), ms(0), ms(500));
        let second = queue.schedule(hover(1), ms(300), ms(500));
        assert!(!queue.is_pending(first));
        assert!(queue.is_pending(second));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(ms(800)));
    }

    #[test]
    fn test_cancel_and_ordering() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(hover(0), ms(0), ms(500));
        queue.schedule(hover(1), ms(0), ms(100));
        queue.schedule(TimerKey::LayoutSettle, ms(0), ms(250));
        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert_eq!(
            queue.take_due(ms(1000)),
            vec![hover(1), TimerKey::LayoutSettle]
        );
    }
}
