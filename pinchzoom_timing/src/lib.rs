// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom Timing: a host-agnostic queue of cancellable scheduled tasks.
//!
//! Gesture recognizers need a handful of short-lived timers (long-press,
//! deferred single tap) that can be cancelled from several call sites. This
//! crate models them as plain data: the caller owns the clock and feeds the
//! current time in, the queue hands back whatever has come due.
//!
//! ```rust
//! use pinchzoom_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let long_press = timers.schedule(800, "long-press");
//! let _tap = timers.schedule(175, "tap");
//!
//! // Motion disqualifies the long press.
//! assert_eq!(timers.cancel(long_press), Some("long-press"));
//!
//! assert!(timers.pop_due(100).is_none());
//! let (_, fired) = timers.pop_due(200).unwrap();
//! assert_eq!(fired, "tap");
//! assert!(timers.is_empty());
//! ```
//!
//! Time is an opaque monotonic `u64` millisecond count. The queue never reads
//! a clock, sleeps, or spawns anything, so it is usable from any event loop.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Handle to a scheduled timer.
///
/// Handles are never reused by a given queue, so cancelling a handle whose
/// timer already fired (or was cancelled) is a harmless no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline_ms: u64,
    id: TimerId,
    payload: T,
}

/// A queue of pending timers ordered by deadline.
///
/// Timers with equal deadlines fire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // Sorted by (deadline, id).
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire once `now_ms >= deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let at = self
            .entries
            .partition_point(|e| (e.deadline_ms, e.id) <= (deadline_ms, id));
        self.entries.insert(
            at,
            Entry {
                deadline_ms,
                id,
                payload,
            },
        );
        id
    }

    /// Cancels a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index).payload)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Deadline of the earliest pending timer, if any.
    ///
    /// Hosts use this to arm their own wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline_ms)
    }

    /// Removes and returns the earliest timer that is due at `now_ms`.
    ///
    /// Call repeatedly until it returns `None` to drain everything due.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, T)> {
        if self.entries.first()?.deadline_ms > now_ms {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.id, entry.payload))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
