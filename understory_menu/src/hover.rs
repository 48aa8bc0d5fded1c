// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced hover: cancellable deadlines keyed by element.
//!
//! ## Usage
//!
//! 1) On pointer-enter, call [`Debouncer::schedule`] and keep the returned [`TimerId`] with the item.
//! 2) On pointer-leave (or when the item is torn down), call [`Debouncer::cancel`] with that id.
//! 3) Periodically call [`Debouncer::expire`] with the current time and run the action for each returned key.
//!
//! A second `schedule` for a key that is still pending replaces the earlier deadline,
//! which also makes this usable as a "settle" timer (re-armed on every event).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_menu::hover::Debouncer;
//!
//! let mut d: Debouncer<u32> = Debouncer::new(Duration::from_millis(150));
//! let t = d.schedule(Duration::ZERO, 7);
//! assert!(d.expire(Duration::from_millis(100)).is_empty());
//! assert!(d.is_pending(t));
//! assert_eq!(d.expire(Duration::from_millis(150)), vec![7]);
//! assert!(!d.is_pending(t));
//! ```

use alloc::vec::Vec;
use core::time::Duration;

/// Handle to a scheduled deadline.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Pending<K> {
    id: TimerId,
    deadline: Duration,
    key: K,
}

/// A set of pending deadlines, each firing at most once.
#[derive(Clone, Debug)]
pub struct Debouncer<K> {
    delay: Duration,
    next_id: u64,
    pending: Vec<Pending<K>>,
}

impl<K: Copy + Eq> Debouncer<K> {
    /// Create a debouncer with a fixed delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `key` to fire at `now + delay`, replacing any pending deadline for `key`.
    pub fn schedule(&mut self, now: Duration, key: K) -> TimerId {
        self.pending.retain(|p| p.key != key);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + self.delay,
            key,
        });
        id
    }

    /// Cancel a pending deadline. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Whether anything is waiting to fire.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, for hosts that sleep until the next tick.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// ordered by deadline and then by scheduling order.
    pub fn expire(&mut self, now: Duration) -> Vec<K> {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                due.push((p.deadline, p.id, p.key));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(deadline, id, _)| (deadline, id));
        due.into_iter().map(|(_, _, key)| key).collect()
    }

    /// Drop every pending deadline.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
