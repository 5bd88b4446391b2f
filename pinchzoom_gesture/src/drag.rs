// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental drag deltas from a cumulative gesture displacement.
//!
//! Touch sources usually report the displacement since the gesture started.
//! [`DeltaTracker`] turns that into per-event deltas and keeps a running total.
//! The first update of a gesture yields a zero delta, since there is no
//! previous displacement to compare against.
//!
//! ```
//! use kurbo::Vec2;
//! use pinchzoom_gesture::drag::DeltaTracker;
//!
//! let mut drag = DeltaTracker::default();
//!
//! assert_eq!(drag.update(Vec2::new(4.0, 1.0)), Vec2::ZERO);
//! assert_eq!(drag.update(Vec2::new(10.0, 3.0)), Vec2::new(6.0, 2.0));
//! assert_eq!(drag.total, Vec2::new(6.0, 2.0));
//! ```

use kurbo::Vec2;

/// Tracks the previous cumulative displacement of a gesture.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DeltaTracker {
    /// Cumulative displacement seen by the previous update.
    pub last: Option<Vec2>,
    /// Sum of every delta returned so far.
    pub total: Vec2,
}

impl DeltaTracker {
    /// Feeds the current cumulative displacement, returning the delta since
    /// the previous update (zero on the first update).
    pub fn update(&mut self, cumulative: Vec2) -> Vec2 {
        let delta = match self.last {
            Some(last) => cumulative - last,
            None => Vec2::ZERO,
        };
        self.last = Some(cumulative);
        self.total += delta;
        delta
    }

    /// Forgets the previous displacement and the running total.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` once an update has been seen.
    pub fn is_tracking(&self) -> bool {
        self.last.is_some()
    }
}
